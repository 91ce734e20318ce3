//! Output formatters for sheet validations and accuracy reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AccuracyReport, SheetReport};
use crate::processing::amount::format_amount;
use crate::processing::chart::LineItem;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering reports in one output format
pub trait OutputFormatter {
    fn format_sheet(&self, report: &SheetReport) -> Result<String>;
    fn format_accuracy(&self, report: &AccuracyReport) -> Result<String>;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON for piping into other tools
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_status(&self, ok: bool, yes: &str, no: &str) -> String {
        match (ok, self.use_colors) {
            (true, true) => format!("✓ {}", yes).green().bold().to_string(),
            (false, true) => format!("✗ {}", no).red().bold().to_string(),
            (true, false) => format!("[OK] {}", yes),
            (false, false) => format!("[!!] {}", no),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_sheet(&self, report: &SheetReport) -> Result<String> {
        let mut output = String::new();
        let sheet = &report.sheet;
        let validation = &report.validation;
        let stats = &report.field_extraction;

        output.push_str(&self.format_header("📊 BALANCE SHEET VALIDATION", 1));
        output.push_str(&format!("Source: {}\n", report.source));
        output.push_str(&format!("Company: {}\n", display_or_unknown(&sheet.company_name)));
        output.push_str(&format!("Report Date: {}\n", display_or_unknown(&sheet.report_date)));

        output.push_str(&self.format_header("Accounting Equation", 2));
        output.push_str(&format!("Total Assets:                 ${}\n", format_amount(validation.total_assets)));
        output.push_str(&format!("Total Liabilities:            ${}\n", format_amount(validation.total_liabilities)));
        output.push_str(&format!("Total Equity:                 ${}\n", format_amount(validation.total_equity)));
        output.push_str(&format!("Total Liabilities and Equity: ${}\n", format_amount(validation.stated_total)));
        output.push_str(&format!(
            "Balance difference: ${}  {}\n",
            format_amount(validation.balance_difference),
            self.format_status(validation.is_balanced, "BALANCED", "UNBALANCED")
        ));
        output.push_str(&format!(
            "Stated total difference: ${}  {}\n",
            format_amount(validation.stated_difference),
            self.format_status(validation.matches_stated, "MATCHES", "MISMATCH")
        ));

        let broken: Vec<_> = validation.inconsistent_subtotals().collect();
        if !validation.subtotals.is_empty() {
            output.push_str(&self.format_header("Subtotals", 3));
            if broken.is_empty() {
                output.push_str(&format!("  {}\n", self.colorize("All subtotals agree with their rows", Color::Green)));
            }
            for check in &broken {
                output.push_str(&format!(
                    "  • {}: stated {} vs computed {} (off by {})\n",
                    self.colorize(&check.name, Color::Red),
                    format_amount(check.stated),
                    format_amount(check.computed),
                    format_amount(check.difference)
                ));
            }
        }

        output.push_str(&self.format_header("Field Extraction", 2));
        output.push_str(&format!(
            "Fields extracted: {}/{} ({:.1}%)\n",
            stats.extracted_fields, stats.total_fields, stats.extraction_rate
        ));
        if !stats.missing_fields.is_empty() {
            output.push_str(&self.colorize("Fields not matched (missing or zero):\n", Color::Yellow));
            for field in &stats.missing_fields {
                output.push_str(&format!("  - {}\n", field));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Line Items", 2));
            for item in LineItem::ALL {
                let line = format!("{:<45} {:>15}", item.to_string(), format_amount(sheet.get(item)));
                if item.is_total() {
                    output.push_str(&format!("{}\n", self.colorize(&line, Color::Cyan)));
                } else {
                    output.push_str(&format!("{}\n", line));
                }
            }
        }

        Ok(output)
    }

    fn format_accuracy(&self, report: &AccuracyReport) -> Result<String> {
        let summary = &report.summary;
        let mut output = String::new();

        output.push_str(&self.format_header("TEST SUMMARY REPORT", 1));
        output.push_str(&format!("Total PDFs tested: {}\n", summary.total_tests));
        output.push_str(&format!("Successful extractions: {}\n", summary.successful_tests));
        output.push_str(&format!("Success rate: {:.1}%\n", summary.success_rate));

        let successful: Vec<_> = report.detailed_results.iter().filter(|r| r.success).collect();
        if !successful.is_empty() {
            output.push_str(&self.format_header("EXTRACTION ACCURACY", 2));
            output.push_str(&format!("Average field extraction rate: {:.1}%\n", summary.avg_extraction_rate));
            output.push_str(&format!(
                "Balance sheet accuracy: {:.1}% ({}/{} balanced)\n",
                summary.balance_accuracy,
                summary.balanced_count(),
                summary.successful_tests
            ));

            output.push_str(&self.format_header("INDIVIDUAL RESULTS", 2));
            for result in &successful {
                let rate = result.field_extraction.as_ref().map_or(0.0, |s| s.extraction_rate);
                output.push_str(&format!(
                    "{:<30} | {:>6.1}% | {}\n",
                    result.pdf_name,
                    rate,
                    self.format_status(result.is_balanced(), "BALANCED", "UNBALANCED")
                ));
            }
        }

        let failed: Vec<_> = report.detailed_results.iter().filter(|r| !r.success).collect();
        if !failed.is_empty() {
            output.push_str(&self.format_header("ERRORS", 2));
            for result in failed {
                output.push_str(&format!(
                    "{:<30} | {}\n",
                    result.pdf_name,
                    self.colorize(
                        &format!("ERROR: {}", result.error.as_deref().unwrap_or("Unknown error")),
                        Color::Red
                    )
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_sheet(&self, report: &SheetReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn format_accuracy(&self, report: &AccuracyReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn status_badge(ok: bool) -> &'static str {
        if ok {
            "🟢 Balanced"
        } else {
            "🔴 Unbalanced"
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_sheet(&self, report: &SheetReport) -> Result<String> {
        let sheet = &report.sheet;
        let validation = &report.validation;
        let mut output = String::new();

        output.push_str(&format!(
            "# {} | {}\n\n",
            display_or_unknown(&sheet.company_name),
            display_or_unknown(&sheet.report_title)
        ));
        if self.include_metadata {
            output.push_str(&format!(
                "**Source:** `{}` | **Report Date:** {} | **Generated:** {}\n\n",
                Path::new(&report.source).file_name().map_or_else(|| report.source.clone(), |n| n.to_string_lossy().to_string()),
                display_or_unknown(&sheet.report_date),
                report.generated_at.format("%Y-%m-%d %H:%M:%S")
            ));
        }

        output.push_str(&format!("**Status:** {}\n\n", Self::status_badge(validation.is_balanced)));

        output.push_str("| Account | Line Item | Amount |\n");
        output.push_str("|---------|-----------|-------:|\n");
        for item in LineItem::ALL {
            let account = item.account_number().map(|n| n.to_string()).unwrap_or_default();
            let label = if item.is_total() {
                format!("**{}**", item.label())
            } else {
                item.label().to_string()
            };
            output.push_str(&format!("| {} | {} | {} |\n", account, label, format_amount(sheet.get(item))));
        }
        output.push('\n');

        output.push_str("## Validation\n\n");
        output.push_str(&format!("- Calculated liabilities + equity: {}\n", format_amount(validation.calculated_total)));
        output.push_str(&format!("- Balance difference: {}\n", format_amount(validation.balance_difference)));
        output.push_str(&format!("- Matches stated total: {}\n", if validation.matches_stated { "yes" } else { "no" }));
        for check in validation.inconsistent_subtotals() {
            output.push_str(&format!(
                "- ⚠️ {}: stated {} vs computed {}\n",
                check.name,
                format_amount(check.stated),
                format_amount(check.computed)
            ));
        }
        output.push('\n');

        let stats = &report.field_extraction;
        output.push_str("## Field Extraction\n\n");
        output.push_str(&format!(
            "{}/{} fields extracted ({:.1}%)\n",
            stats.extracted_fields, stats.total_fields, stats.extraction_rate
        ));
        if !stats.missing_fields.is_empty() {
            output.push_str(&format!("\n**Missing:** `{}`\n", stats.missing_fields.join("`, `")));
        }

        Ok(output)
    }

    fn format_accuracy(&self, report: &AccuracyReport) -> Result<String> {
        let summary = &report.summary;
        let mut output = String::new();

        output.push_str("# Balance Sheet Extraction Accuracy\n\n");
        if self.include_metadata {
            output.push_str(&format!("**Run:** {}\n\n", report.test_timestamp.format("%Y-%m-%d %H:%M:%S")));
        }

        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|------:|\n");
        output.push_str(&format!("| PDFs tested | {} |\n", summary.total_tests));
        output.push_str(&format!("| Successful extractions | {} |\n", summary.successful_tests));
        output.push_str(&format!("| Success rate | {:.1}% |\n", summary.success_rate));
        output.push_str(&format!("| Average extraction rate | {:.1}% |\n", summary.avg_extraction_rate));
        output.push_str(&format!("| Balance accuracy | {:.1}% |\n\n", summary.balance_accuracy));

        output.push_str("## Results\n\n");
        output.push_str("| PDF | Extraction | Status |\n");
        output.push_str("|-----|-----------:|--------|\n");
        for result in &report.detailed_results {
            match (&result.field_extraction, &result.error) {
                (Some(stats), _) => output.push_str(&format!(
                    "| {} | {:.1}% | {} |\n",
                    result.pdf_name,
                    stats.extraction_rate,
                    Self::status_badge(result.is_balanced())
                )),
                (None, error) => output.push_str(&format!(
                    "| {} | – | ❌ {} |\n",
                    result.pdf_name,
                    error.as_deref().unwrap_or("Unknown error")
                )),
            }
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn sheet_report(&self, report: &SheetReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_sheet(report)
    }

    pub fn accuracy_report(&self, report: &AccuracyReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_accuracy(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn display_or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "Unknown"
    } else {
        value
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::TestResult;
    use crate::processing::balance_sheet::BalanceSheet;
    use crate::processing::validator::{count_extracted_fields, Validator};
    use rust_decimal_macros::dec;

    fn report() -> SheetReport {
        let mut sheet = BalanceSheet::default();
        sheet.company_name = "XYZ".to_string();
        sheet.report_date = "December 31, 2018".to_string();
        sheet.set(LineItem::TotalAssets, dec!(6858029));
        sheet.set(LineItem::TotalLiabilities, dec!(2887230));
        sheet.set(LineItem::TotalEquity, dec!(3970799));
        sheet.set(LineItem::TreasuryStock, dec!(-1250000));
        let validation = Validator::default().validate(&sheet);
        let stats = count_extracted_fields(&sheet);
        SheetReport::new("data/Balance-Sheet-Example_text.txt", sheet, validation, stats)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_sheet(&report()).unwrap();
        assert!(output.contains("Company: XYZ"));
        assert!(output.contains("Total Assets:                 $6,858,029"));
        assert!(output.contains("[OK] BALANCED"));
        assert!(output.contains("(1,250,000)"));
        assert!(output.contains("  - assets.current_assets.cash.1010_checking"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_flags_broken_subtotals() {
        let output = ConsoleFormatter::new(false, false).format_sheet(&report()).unwrap();
        assert!(output.contains("Total Equity: stated 3,970,799 vs computed (1,250,000)"));
    }

    #[test]
    fn test_json_round_trips() {
        let output = JsonFormatter::new(false).format_sheet(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["validation"]["is_balanced"], true);
        assert_eq!(value["sheet"]["company_name"], "XYZ");
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(true).format_sheet(&report()).unwrap();
        assert!(output.starts_with("# XYZ | Unknown"));
        assert!(output.contains("`Balance-Sheet-Example_text.txt`"));
        assert!(output.contains("| 3100 | Treasury Stock | (1,250,000) |"));
        assert!(output.contains("|  | **Total Assets** | 6,858,029 |"));
    }

    #[test]
    fn test_accuracy_console_lists_errors() {
        let accuracy = AccuracyReport::from_results(vec![
            TestResult::succeeded("good.pdf", &report()),
            TestResult::failed("scan.pdf", "No text layer found"),
        ]);
        let generator = ReportGenerator::with_options(false, false, true, false);
        let output = generator.accuracy_report(&accuracy, &OutputFormat::Console).unwrap();

        assert!(output.contains("Total PDFs tested: 2"));
        assert!(output.contains("Success rate: 50.0%"));
        assert!(output.contains("(1/1 balanced)"));
        assert!(output.contains("ERROR: No text layer found"));
    }

    #[test]
    fn test_accuracy_markdown() {
        let accuracy = AccuracyReport::from_results(vec![TestResult::failed("scan.pdf", "boom")]);
        let output = MarkdownFormatter::new(false).format_accuracy(&accuracy).unwrap();
        assert!(output.contains("| PDFs tested | 1 |"));
        assert!(output.contains("| scan.pdf | – | ❌ boom |"));
    }
}
