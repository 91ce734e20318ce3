//! Report structures for single sheets and batch accuracy runs

use crate::error::Result;
use crate::processing::balance_sheet::BalanceSheet;
use crate::processing::validator::{FieldStats, ValidationResult};
use chrono::{DateTime, Local};
use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Validation outcome of one populated balance sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetReport {
    /// File the sheet was populated from
    pub source: String,
    pub sheet: BalanceSheet,
    pub validation: ValidationResult,
    pub field_extraction: FieldStats,
    pub generated_at: DateTime<Local>,
}

impl SheetReport {
    pub fn new(source: impl Into<String>, sheet: BalanceSheet, validation: ValidationResult, field_extraction: FieldStats) -> Self {
        Self {
            source: source.into(),
            sheet,
            validation,
            field_extraction,
            generated_at: Local::now(),
        }
    }
}

/// Result of running the pipeline over one PDF
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub pdf_name: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_extraction: Option<FieldStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl TestResult {
    pub fn succeeded(pdf_name: impl Into<String>, report: &SheetReport) -> Self {
        let or_unknown = |value: &str| {
            if value.is_empty() {
                "Unknown".to_string()
            } else {
                value.to_string()
            }
        };

        Self {
            pdf_name: pdf_name.into(),
            success: true,
            company_name: Some(or_unknown(&report.sheet.company_name)),
            report_date: Some(or_unknown(&report.sheet.report_date)),
            validation: Some(report.validation.clone()),
            field_extraction: Some(report.field_extraction.clone()),
            error: None,
            timestamp: Local::now(),
        }
    }

    pub fn failed(pdf_name: impl Into<String>, error: impl ToString) -> Self {
        Self {
            pdf_name: pdf_name.into(),
            success: false,
            company_name: None,
            report_date: None,
            validation: None,
            field_extraction: None,
            error: Some(error.to_string()),
            timestamp: Local::now(),
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.validation.as_ref().map_or(false, |v| v.is_balanced)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub total_tests: usize,
    pub successful_tests: usize,
    /// Percent of PDFs that went through the pipeline without error
    pub success_rate: f64,
    /// Mean field extraction rate over successful PDFs
    pub avg_extraction_rate: f64,
    /// Percent of successful PDFs whose sheet balances
    pub balance_accuracy: f64,
}

impl AccuracySummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let total_tests = results.len();
        let successful: Vec<&TestResult> = results.iter().filter(|r| r.success).collect();
        let successful_tests = successful.len();

        let success_rate = percentage(successful_tests, total_tests);

        let (avg_extraction_rate, balance_accuracy) = if successful.is_empty() {
            (0.0, 0.0)
        } else {
            let rate_sum: f64 = successful
                .iter()
                .filter_map(|r| r.field_extraction.as_ref())
                .map(|stats| stats.extraction_rate)
                .sum();
            let balanced = successful.iter().filter(|r| r.is_balanced()).count();
            (
                rate_sum / successful_tests as f64,
                percentage(balanced, successful_tests),
            )
        };

        Self {
            total_tests,
            successful_tests,
            success_rate,
            avg_extraction_rate,
            balance_accuracy,
        }
    }

    pub fn balanced_count(&self) -> usize {
        (self.balance_accuracy / 100.0 * self.successful_tests as f64).round() as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub test_timestamp: DateTime<Local>,
    pub summary: AccuracySummary,
    pub detailed_results: Vec<TestResult>,
}

/// One line of the CSV summary
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "PDF_Name")]
    pdf_name: &'a str,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Report_Date")]
    report_date: &'a str,
    #[serde(rename = "Fields_Extracted")]
    fields_extracted: usize,
    #[serde(rename = "Total_Fields")]
    total_fields: usize,
    #[serde(rename = "Extraction_Rate_%")]
    extraction_rate: f64,
    #[serde(rename = "Is_Balanced")]
    is_balanced: bool,
    #[serde(rename = "Total_Assets")]
    total_assets: f64,
    #[serde(rename = "Total_Liabilities")]
    total_liabilities: f64,
    #[serde(rename = "Total_Equity")]
    total_equity: f64,
    #[serde(rename = "Balance_Difference")]
    balance_difference: f64,
    #[serde(rename = "Success")]
    success: &'a str,
    #[serde(rename = "Error")]
    error: &'a str,
}

impl<'a> CsvRow<'a> {
    fn from_result(result: &'a TestResult) -> Self {
        match (&result.validation, &result.field_extraction) {
            (Some(validation), Some(stats)) if result.success => Self {
                pdf_name: &result.pdf_name,
                company: result.company_name.as_deref().unwrap_or("Unknown"),
                report_date: result.report_date.as_deref().unwrap_or("Unknown"),
                fields_extracted: stats.extracted_fields,
                total_fields: stats.total_fields,
                extraction_rate: (stats.extraction_rate * 10.0).round() / 10.0,
                is_balanced: validation.is_balanced,
                total_assets: to_f64(validation.total_assets),
                total_liabilities: to_f64(validation.total_liabilities),
                total_equity: to_f64(validation.total_equity),
                balance_difference: to_f64(validation.balance_difference.round_dp(2)),
                success: "Yes",
                error: "",
            },
            _ => Self {
                pdf_name: &result.pdf_name,
                company: "ERROR",
                report_date: "ERROR",
                fields_extracted: 0,
                total_fields: 0,
                extraction_rate: 0.0,
                is_balanced: false,
                total_assets: 0.0,
                total_liabilities: 0.0,
                total_equity: 0.0,
                balance_difference: 0.0,
                success: "No",
                error: result.error.as_deref().unwrap_or("Unknown error"),
            },
        }
    }
}

impl AccuracyReport {
    pub fn from_results(detailed_results: Vec<TestResult>) -> Self {
        Self {
            test_timestamp: Local::now(),
            summary: AccuracySummary::from_results(&detailed_results),
            detailed_results,
        }
    }

    fn stamp(&self) -> String {
        self.test_timestamp.format("%Y%m%d_%H%M%S").to_string()
    }

    /// Write `accuracy_report_<timestamp>.json` into `results_dir`
    pub fn save_json(&self, results_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(results_dir)?;
        let path = results_dir.join(format!("accuracy_report_{}.json", self.stamp()));
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        info!("Detailed report saved to: {}", path.display());
        Ok(path)
    }

    /// Write `accuracy_summary_<timestamp>.csv` into `results_dir`
    pub fn save_csv(&self, results_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(results_dir)?;
        let path = results_dir.join(format!("accuracy_summary_{}.csv", self.stamp()));

        let mut writer = csv::Writer::from_path(&path)?;
        for result in &self.detailed_results {
            writer.serialize(CsvRow::from_result(result))?;
        }
        writer.flush()?;

        info!("CSV summary saved to: {}", path.display());
        Ok(path)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
