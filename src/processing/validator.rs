//! Balance sheet validation
//!
//! Checks the accounting equation (Assets = Liabilities + Equity), the
//! statement's own subtotals, and how many fields extraction filled in.

use crate::error::Result;
use crate::processing::balance_sheet::BalanceSheet;
use crate::processing::chart::{LineItem, SUBTOTALS};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    /// Liabilities + equity as computed from the two totals
    pub calculated_total: Decimal,
    /// "Total Liabilities and Equity" as printed
    pub stated_total: Decimal,
    pub balance_difference: Decimal,
    pub stated_difference: Decimal,
    pub is_balanced: bool,
    pub matches_stated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtotals: Vec<SubtotalCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtotalCheck {
    pub name: String,
    pub stated: Decimal,
    pub computed: Decimal,
    pub difference: Decimal,
    pub consistent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub extracted_fields: usize,
    pub total_fields: usize,
    /// Percentage of non-zero fields
    pub extraction_rate: f64,
    pub missing_fields: Vec<String>,
}

pub struct Validator {
    tolerance: Decimal,
    check_subtotals: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Decimal::ONE)
    }
}

impl Validator {
    pub fn new(tolerance: Decimal) -> Self {
        Self {
            tolerance,
            check_subtotals: true,
        }
    }

    pub fn with_subtotals(mut self, enable: bool) -> Self {
        self.check_subtotals = enable;
        self
    }

    pub fn validate(&self, sheet: &BalanceSheet) -> ValidationResult {
        let total_assets = sheet.get(LineItem::TotalAssets);
        let total_liabilities = sheet.get(LineItem::TotalLiabilities);
        let total_equity = sheet.get(LineItem::TotalEquity);
        let stated_total = sheet.get(LineItem::TotalLiabilitiesAndEquity);

        let calculated_total = total_liabilities + total_equity;
        let balance_difference = (total_assets - calculated_total).abs();
        let stated_difference = (total_assets - stated_total).abs();

        let subtotals = if self.check_subtotals {
            self.check_subtotals(sheet)
        } else {
            Vec::new()
        };

        ValidationResult {
            total_assets,
            total_liabilities,
            total_equity,
            calculated_total,
            stated_total,
            balance_difference,
            stated_difference,
            is_balanced: balance_difference < self.tolerance,
            matches_stated: stated_difference < self.tolerance,
            subtotals,
        }
    }

    /// Compare every printed subtotal with the sum of its rows
    pub fn check_subtotals(&self, sheet: &BalanceSheet) -> Vec<SubtotalCheck> {
        SUBTOTALS
            .iter()
            .map(|subtotal| {
                let stated = sheet.get(subtotal.total);
                let computed: Decimal = subtotal.components.iter().map(|item| sheet.get(*item)).sum();
                let difference = (stated - computed).abs();
                SubtotalCheck {
                    name: subtotal.total.label().to_string(),
                    stated,
                    computed,
                    difference,
                    consistent: difference < self.tolerance,
                }
            })
            .collect()
    }
}

impl ValidationResult {
    pub fn inconsistent_subtotals(&self) -> impl Iterator<Item = &SubtotalCheck> {
        self.subtotals.iter().filter(|check| !check.consistent)
    }
}

/// Count non-zero line items; header fields are not counted
pub fn count_extracted_fields(sheet: &BalanceSheet) -> FieldStats {
    let total_fields = LineItem::ALL.len();
    let missing_fields: Vec<String> = LineItem::ALL
        .iter()
        .filter(|item| sheet.get(**item).is_zero())
        .map(LineItem::path)
        .collect();
    let extracted_fields = total_fields - missing_fields.len();

    let extraction_rate = if total_fields > 0 {
        extracted_fields as f64 / total_fields as f64 * 100.0
    } else {
        0.0
    };

    FieldStats {
        extracted_fields,
        total_fields,
        extraction_rate,
        missing_fields,
    }
}

/// Move a populated sheet into the validated or mistakes folder
pub fn file_by_validation(
    path: &Path,
    is_balanced: bool,
    validated_dir: &Path,
    mistakes_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(validated_dir)?;
    std::fs::create_dir_all(mistakes_dir)?;

    let target_dir = if is_balanced { validated_dir } else { mistakes_dir };
    let file_name = path.file_name().ok_or_else(|| {
        crate::error::ExtractorError::InvalidInput(format!("Not a file: {}", path.display()))
    })?;
    let destination = target_dir.join(file_name);

    if std::fs::rename(path, &destination).is_err() {
        // rename fails across filesystems
        std::fs::copy(path, &destination)?;
        std::fs::remove_file(path)?;
    }

    if is_balanced {
        info!("Balance sheet is VALID, moved to {}", destination.display());
    } else {
        warn!("Balance sheet is INVALID, moved to {}", destination.display());
    }
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn sample_sheet() -> BalanceSheet {
        let values = [
            (LineItem::Checking, dec!(583961)),
            (LineItem::Savings, dec!(224600)),
            (LineItem::PettyCash, dec!(89840)),
            (LineItem::TotalCash, dec!(898402)),
            (LineItem::AccountsReceivable, dec!(3593607)),
            (LineItem::WorkInProcess, dec!(589791)),
            (LineItem::PrepaidRent, dec!(178311)),
            (LineItem::PrepaidLiabilityInsurance, dec!(96010)),
            (LineItem::TotalOtherCurrentAssets, dec!(274321)),
            (LineItem::TotalCurrentAssets, dec!(5356121)),
            (LineItem::NetComputerEquipment, dec!(125744)),
            (LineItem::NetFurnitureFixturesEquipment, dec!(98256)),
            (LineItem::NetFieldEquipment, dec!(412908)),
            (LineItem::NetRealEstate, dec!(650000)),
            (LineItem::NetLeaseholdImprovements, dec!(185000)),
            (LineItem::OtherAssets, dec!(30000)),
            (LineItem::TotalNonCurrentAssets, dec!(1501908)),
            (LineItem::TotalAssets, dec!(6858029)),
            (LineItem::AccountsPayable, dec!(612450)),
            (LineItem::DeferredTaxes, dec!(145780)),
            (LineItem::LineOfCreditBorrowing, dec!(500000)),
            (LineItem::CurrentPortionLongTermDebt, dec!(240000)),
            (LineItem::OtherCurrentLiabilities, dec!(89000)),
            (LineItem::TotalCurrentLiabilities, dec!(1587230)),
            (LineItem::LongTermDebt, dec!(1200000)),
            (LineItem::OtherLiabilities, dec!(100000)),
            (LineItem::TotalNonCurrentLiabilities, dec!(1300000)),
            (LineItem::TotalLiabilities, dec!(2887230)),
            (LineItem::CapitalStock, dec!(2500000)),
            (LineItem::TreasuryStock, dec!(-1250000)),
            (LineItem::RetainedEarnings, dec!(2720799)),
            (LineItem::TotalEquity, dec!(3970799)),
            (LineItem::TotalLiabilitiesAndEquity, dec!(6858029)),
        ];
        let mut sheet = BalanceSheet::default();
        for (item, value) in values {
            sheet.set(item, value);
        }
        sheet
    }

    #[test]
    fn test_sample_balances() {
        let result = Validator::default().validate(&sample_sheet());
        assert!(result.is_balanced);
        assert!(result.matches_stated);
        assert_eq!(result.calculated_total, dec!(6858029));
        assert_eq!(result.balance_difference, Decimal::ZERO);
        assert_eq!(result.inconsistent_subtotals().count(), 0);
        assert_eq!(result.subtotals.len(), SUBTOTALS.len());
    }

    #[test]
    fn test_unbalanced_sheet() {
        let mut sheet = sample_sheet();
        sheet.set(LineItem::TotalEquity, dec!(3970000));

        let result = Validator::default().validate(&sheet);
        assert!(!result.is_balanced);
        assert_eq!(result.balance_difference, dec!(799));
        assert!(result.matches_stated);

        let broken: Vec<&str> = result.inconsistent_subtotals().map(|c| c.name.as_str()).collect();
        assert_eq!(broken, vec!["Total Equity", "Total Liabilities and Equity"]);
    }

    #[test]
    fn test_tolerance_is_exclusive() {
        let mut sheet = sample_sheet();
        sheet.set(LineItem::TotalAssets, dec!(6858030));

        assert!(!Validator::new(dec!(1)).validate(&sheet).is_balanced);
        assert!(Validator::new(dec!(1.5)).validate(&sheet).is_balanced);
    }

    #[test]
    fn test_subtotal_checks_can_be_disabled() {
        let result = Validator::default().with_subtotals(false).validate(&sample_sheet());
        assert!(result.subtotals.is_empty());
    }

    #[test]
    fn test_empty_sheet_balances_trivially() {
        let sheet = BalanceSheet::default();
        let result = Validator::default().validate(&sheet);
        assert!(result.is_balanced);

        let stats = count_extracted_fields(&sheet);
        assert_eq!(stats.extracted_fields, 0);
        assert_eq!(stats.extraction_rate, 0.0);
        assert_eq!(stats.missing_fields.len(), LineItem::ALL.len());
    }

    #[test]
    fn test_field_stats() {
        let mut sheet = sample_sheet();
        sheet.set(LineItem::PettyCash, Decimal::ZERO);
        sheet.company_name.clear();

        let stats = count_extracted_fields(&sheet);
        assert_eq!(stats.total_fields, 33);
        assert_eq!(stats.extracted_fields, 32);
        assert_eq!(stats.missing_fields, vec!["assets.current_assets.cash.1030_petty_cash".to_string()]);
        assert!((stats.extraction_rate - 32.0 / 33.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_file_by_validation() {
        let temp_dir = TempDir::new().unwrap();
        let validated = temp_dir.path().join("Validated");
        let mistakes = temp_dir.path().join("Mistakes detected");

        let good = temp_dir.path().join("good.json");
        std::fs::write(&good, "{}").unwrap();
        let moved = file_by_validation(&good, true, &validated, &mistakes).unwrap();
        assert_eq!(moved, validated.join("good.json"));
        assert!(moved.exists());
        assert!(!good.exists());

        let bad = temp_dir.path().join("bad.json");
        std::fs::write(&bad, "{}").unwrap();
        let moved = file_by_validation(&bad, false, &validated, &mistakes).unwrap();
        assert_eq!(moved, mistakes.join("bad.json"));
        assert!(mistakes.is_dir() && validated.is_dir());
    }
}
