//! Balance sheet template structures
//!
//! The JSON layout mirrors the statement: assets, liabilities and equity
//! sections with one field per account, keyed `<number>_<name>`.

use crate::error::{ExtractorError, Result};
use crate::processing::chart::LineItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheet {
    pub company_name: String,
    pub report_date: String,
    pub report_title: String,
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: Equity,
    pub total_liabilities_and_equity: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    pub current_assets: CurrentAssets,
    pub non_current_assets: NonCurrentAssets,
    pub total_assets: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentAssets {
    pub cash: Cash,
    #[serde(rename = "1100_accounts_receivable")]
    pub accounts_receivable: Decimal,
    #[serde(rename = "1200_work_in_process")]
    pub work_in_process: Decimal,
    pub other_current_assets: OtherCurrentAssets,
    pub total_current_assets: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cash {
    #[serde(rename = "1010_checking")]
    pub checking: Decimal,
    #[serde(rename = "1020_savings")]
    pub savings: Decimal,
    #[serde(rename = "1030_petty_cash")]
    pub petty_cash: Decimal,
    pub total_cash: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherCurrentAssets {
    #[serde(rename = "1310_prepaid_rent")]
    pub prepaid_rent: Decimal,
    #[serde(rename = "1320_prepaid_liability_insurance")]
    pub prepaid_liability_insurance: Decimal,
    pub total_other_current_assets: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonCurrentAssets {
    #[serde(rename = "1400_net_computer_equipment")]
    pub net_computer_equipment: Decimal,
    #[serde(rename = "1500_net_furniture_fixtures_equipment")]
    pub net_furniture_fixtures_equipment: Decimal,
    #[serde(rename = "1600_net_field_equipment")]
    pub net_field_equipment: Decimal,
    #[serde(rename = "1700_net_real_estate")]
    pub net_real_estate: Decimal,
    #[serde(rename = "1800_net_leasehold_improvements")]
    pub net_leasehold_improvements: Decimal,
    #[serde(rename = "1900_other_assets")]
    pub other_assets: Decimal,
    pub total_non_current_assets: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Liabilities {
    pub current_liabilities: CurrentLiabilities,
    pub non_current_liabilities: NonCurrentLiabilities,
    pub total_liabilities: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentLiabilities {
    #[serde(rename = "2000_accounts_payable")]
    pub accounts_payable: Decimal,
    #[serde(rename = "2100_deferred_taxes")]
    pub deferred_taxes: Decimal,
    #[serde(rename = "2200_line_of_credit_borrowing")]
    pub line_of_credit_borrowing: Decimal,
    #[serde(rename = "2300_current_portion_long_term_debt")]
    pub current_portion_long_term_debt: Decimal,
    #[serde(rename = "2400_other_current_liabilities")]
    pub other_current_liabilities: Decimal,
    pub total_current_liabilities: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonCurrentLiabilities {
    #[serde(rename = "2500_long_term_debt")]
    pub long_term_debt: Decimal,
    #[serde(rename = "2600_other_liabilities")]
    pub other_liabilities: Decimal,
    pub total_non_current_liabilities: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equity {
    #[serde(rename = "3000_capital_stock")]
    pub capital_stock: Decimal,
    #[serde(rename = "3100_treasury_stock")]
    pub treasury_stock: Decimal,
    #[serde(rename = "3200_retained_earnings")]
    pub retained_earnings: Decimal,
    pub total_equity: Decimal,
}

impl BalanceSheet {
    /// Load a (possibly partial) JSON template
    pub fn load_template(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractorError::Template(format!("Failed to read template '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ExtractorError::Template(format!("Failed to parse template '{}': {}", path.display(), e))
        })
    }

    /// Load a populated balance sheet written by [`BalanceSheet::save`]
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn get(&self, item: LineItem) -> Decimal {
        *self.field(item)
    }

    pub fn set(&mut self, item: LineItem, value: Decimal) {
        *self.field_mut(item) = value;
    }

    fn field(&self, item: LineItem) -> &Decimal {
        use LineItem::*;
        let ca = &self.assets.current_assets;
        let nca = &self.assets.non_current_assets;
        let cl = &self.liabilities.current_liabilities;
        let ncl = &self.liabilities.non_current_liabilities;
        match item {
            Checking => &ca.cash.checking,
            Savings => &ca.cash.savings,
            PettyCash => &ca.cash.petty_cash,
            TotalCash => &ca.cash.total_cash,
            AccountsReceivable => &ca.accounts_receivable,
            WorkInProcess => &ca.work_in_process,
            PrepaidRent => &ca.other_current_assets.prepaid_rent,
            PrepaidLiabilityInsurance => &ca.other_current_assets.prepaid_liability_insurance,
            TotalOtherCurrentAssets => &ca.other_current_assets.total_other_current_assets,
            TotalCurrentAssets => &ca.total_current_assets,
            NetComputerEquipment => &nca.net_computer_equipment,
            NetFurnitureFixturesEquipment => &nca.net_furniture_fixtures_equipment,
            NetFieldEquipment => &nca.net_field_equipment,
            NetRealEstate => &nca.net_real_estate,
            NetLeaseholdImprovements => &nca.net_leasehold_improvements,
            OtherAssets => &nca.other_assets,
            TotalNonCurrentAssets => &nca.total_non_current_assets,
            TotalAssets => &self.assets.total_assets,
            AccountsPayable => &cl.accounts_payable,
            DeferredTaxes => &cl.deferred_taxes,
            LineOfCreditBorrowing => &cl.line_of_credit_borrowing,
            CurrentPortionLongTermDebt => &cl.current_portion_long_term_debt,
            OtherCurrentLiabilities => &cl.other_current_liabilities,
            TotalCurrentLiabilities => &cl.total_current_liabilities,
            LongTermDebt => &ncl.long_term_debt,
            OtherLiabilities => &ncl.other_liabilities,
            TotalNonCurrentLiabilities => &ncl.total_non_current_liabilities,
            TotalLiabilities => &self.liabilities.total_liabilities,
            CapitalStock => &self.equity.capital_stock,
            TreasuryStock => &self.equity.treasury_stock,
            RetainedEarnings => &self.equity.retained_earnings,
            TotalEquity => &self.equity.total_equity,
            TotalLiabilitiesAndEquity => &self.total_liabilities_and_equity,
        }
    }

    fn field_mut(&mut self, item: LineItem) -> &mut Decimal {
        use LineItem::*;
        let ca = &mut self.assets.current_assets;
        let nca = &mut self.assets.non_current_assets;
        let cl = &mut self.liabilities.current_liabilities;
        let ncl = &mut self.liabilities.non_current_liabilities;
        match item {
            Checking => &mut ca.cash.checking,
            Savings => &mut ca.cash.savings,
            PettyCash => &mut ca.cash.petty_cash,
            TotalCash => &mut ca.cash.total_cash,
            AccountsReceivable => &mut ca.accounts_receivable,
            WorkInProcess => &mut ca.work_in_process,
            PrepaidRent => &mut ca.other_current_assets.prepaid_rent,
            PrepaidLiabilityInsurance => &mut ca.other_current_assets.prepaid_liability_insurance,
            TotalOtherCurrentAssets => &mut ca.other_current_assets.total_other_current_assets,
            TotalCurrentAssets => &mut ca.total_current_assets,
            NetComputerEquipment => &mut nca.net_computer_equipment,
            NetFurnitureFixturesEquipment => &mut nca.net_furniture_fixtures_equipment,
            NetFieldEquipment => &mut nca.net_field_equipment,
            NetRealEstate => &mut nca.net_real_estate,
            NetLeaseholdImprovements => &mut nca.net_leasehold_improvements,
            OtherAssets => &mut nca.other_assets,
            TotalNonCurrentAssets => &mut nca.total_non_current_assets,
            TotalAssets => &mut self.assets.total_assets,
            AccountsPayable => &mut cl.accounts_payable,
            DeferredTaxes => &mut cl.deferred_taxes,
            LineOfCreditBorrowing => &mut cl.line_of_credit_borrowing,
            CurrentPortionLongTermDebt => &mut cl.current_portion_long_term_debt,
            OtherCurrentLiabilities => &mut cl.other_current_liabilities,
            TotalCurrentLiabilities => &mut cl.total_current_liabilities,
            LongTermDebt => &mut ncl.long_term_debt,
            OtherLiabilities => &mut ncl.other_liabilities,
            TotalNonCurrentLiabilities => &mut ncl.total_non_current_liabilities,
            TotalLiabilities => &mut self.liabilities.total_liabilities,
            CapitalStock => &mut self.equity.capital_stock,
            TreasuryStock => &mut self.equity.treasury_stock,
            RetainedEarnings => &mut self.equity.retained_earnings,
            TotalEquity => &mut self.equity.total_equity,
            TotalLiabilitiesAndEquity => &mut self.total_liabilities_and_equity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get_every_line_item() {
        let mut sheet = BalanceSheet::default();
        for (i, item) in LineItem::ALL.iter().enumerate() {
            sheet.set(*item, Decimal::from(i as u32 + 1));
        }
        for (i, item) in LineItem::ALL.iter().enumerate() {
            assert_eq!(sheet.get(*item), Decimal::from(i as u32 + 1), "{:?}", item);
        }
    }

    #[test]
    fn test_json_keys_follow_line_item_paths() {
        let mut sheet = BalanceSheet::default();
        sheet.set(LineItem::TreasuryStock, dec!(-1250000));
        sheet.set(LineItem::PrepaidLiabilityInsurance, dec!(96010));

        let value = serde_json::to_value(&sheet).unwrap();
        for item in LineItem::ALL {
            let pointer = format!("/{}", item.path().replace('.', "/"));
            assert!(value.pointer(&pointer).is_some(), "missing {}", pointer);
        }
        assert_eq!(value.pointer("/equity/3100_treasury_stock").unwrap().as_f64(), Some(-1250000.0));
    }

    #[test]
    fn test_partial_template_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("template.json");
        std::fs::write(
            &path,
            r#"{"report_title": "Balance Sheet", "assets": {"current_assets": {"cash": {"1010_checking": 0}}}}"#,
        )
        .unwrap();

        let sheet = BalanceSheet::load_template(&path).unwrap();
        assert_eq!(sheet.report_title, "Balance Sheet");
        assert_eq!(sheet.get(LineItem::Checking), Decimal::ZERO);
        assert!(sheet.company_name.is_empty());
    }

    #[test]
    fn test_bad_template_is_template_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("template.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(BalanceSheet::load_template(&path), Err(ExtractorError::Template(_))));
        assert!(matches!(
            BalanceSheet::load_template(&temp_dir.path().join("missing.json")),
            Err(ExtractorError::Template(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("populated_balance_sheet.json");

        let mut sheet = BalanceSheet::default();
        sheet.company_name = "XYZ".to_string();
        sheet.set(LineItem::TotalAssets, dec!(6858029));
        sheet.save(&path).unwrap();

        let reloaded = BalanceSheet::from_json_file(&path).unwrap();
        assert_eq!(reloaded, sheet);
    }
}
