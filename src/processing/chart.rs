//! Chart of accounts for the balance sheet layout
//!
//! Account numbers and names vary between organizations; this is the
//! four-digit chart used by the ICR schedule balance sheet template.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineItem {
    Checking,
    Savings,
    PettyCash,
    TotalCash,
    AccountsReceivable,
    WorkInProcess,
    PrepaidRent,
    PrepaidLiabilityInsurance,
    TotalOtherCurrentAssets,
    TotalCurrentAssets,
    NetComputerEquipment,
    NetFurnitureFixturesEquipment,
    NetFieldEquipment,
    NetRealEstate,
    NetLeaseholdImprovements,
    OtherAssets,
    TotalNonCurrentAssets,
    TotalAssets,
    AccountsPayable,
    DeferredTaxes,
    LineOfCreditBorrowing,
    CurrentPortionLongTermDebt,
    OtherCurrentLiabilities,
    TotalCurrentLiabilities,
    LongTermDebt,
    OtherLiabilities,
    TotalNonCurrentLiabilities,
    TotalLiabilities,
    CapitalStock,
    TreasuryStock,
    RetainedEarnings,
    TotalEquity,
    TotalLiabilitiesAndEquity,
}

impl LineItem {
    /// Every line item in statement order
    pub const ALL: [LineItem; 33] = [
        LineItem::Checking,
        LineItem::Savings,
        LineItem::PettyCash,
        LineItem::TotalCash,
        LineItem::AccountsReceivable,
        LineItem::WorkInProcess,
        LineItem::PrepaidRent,
        LineItem::PrepaidLiabilityInsurance,
        LineItem::TotalOtherCurrentAssets,
        LineItem::TotalCurrentAssets,
        LineItem::NetComputerEquipment,
        LineItem::NetFurnitureFixturesEquipment,
        LineItem::NetFieldEquipment,
        LineItem::NetRealEstate,
        LineItem::NetLeaseholdImprovements,
        LineItem::OtherAssets,
        LineItem::TotalNonCurrentAssets,
        LineItem::TotalAssets,
        LineItem::AccountsPayable,
        LineItem::DeferredTaxes,
        LineItem::LineOfCreditBorrowing,
        LineItem::CurrentPortionLongTermDebt,
        LineItem::OtherCurrentLiabilities,
        LineItem::TotalCurrentLiabilities,
        LineItem::LongTermDebt,
        LineItem::OtherLiabilities,
        LineItem::TotalNonCurrentLiabilities,
        LineItem::TotalLiabilities,
        LineItem::CapitalStock,
        LineItem::TreasuryStock,
        LineItem::RetainedEarnings,
        LineItem::TotalEquity,
        LineItem::TotalLiabilitiesAndEquity,
    ];

    /// Four-digit account number; `None` for subtotal and total rows
    pub fn account_number(&self) -> Option<u16> {
        use LineItem::*;
        let number = match self {
            Checking => 1010,
            Savings => 1020,
            PettyCash => 1030,
            AccountsReceivable => 1100,
            WorkInProcess => 1200,
            PrepaidRent => 1310,
            PrepaidLiabilityInsurance => 1320,
            NetComputerEquipment => 1400,
            NetFurnitureFixturesEquipment => 1500,
            NetFieldEquipment => 1600,
            NetRealEstate => 1700,
            NetLeaseholdImprovements => 1800,
            OtherAssets => 1900,
            AccountsPayable => 2000,
            DeferredTaxes => 2100,
            LineOfCreditBorrowing => 2200,
            CurrentPortionLongTermDebt => 2300,
            OtherCurrentLiabilities => 2400,
            LongTermDebt => 2500,
            OtherLiabilities => 2600,
            CapitalStock => 3000,
            TreasuryStock => 3100,
            RetainedEarnings => 3200,
            TotalCash
            | TotalOtherCurrentAssets
            | TotalCurrentAssets
            | TotalNonCurrentAssets
            | TotalAssets
            | TotalCurrentLiabilities
            | TotalNonCurrentLiabilities
            | TotalLiabilities
            | TotalEquity
            | TotalLiabilitiesAndEquity => return None,
        };
        Some(number)
    }

    /// Account name as printed on the statement
    pub fn label(&self) -> &'static str {
        use LineItem::*;
        match self {
            Checking => "Checking",
            Savings => "Savings",
            PettyCash => "Petty Cash",
            TotalCash => "Total Cash",
            AccountsReceivable => "Accounts Receivable",
            WorkInProcess => "Work in Process",
            PrepaidRent => "Prepaid Rent",
            PrepaidLiabilityInsurance => "Prepaid Liability Insurance",
            TotalOtherCurrentAssets => "Total Other Current Assets",
            TotalCurrentAssets => "Total Current Assets",
            NetComputerEquipment => "Net Computer Equipment",
            NetFurnitureFixturesEquipment => "Net Furniture, Fixtures, & Equipment",
            NetFieldEquipment => "Net Field Equipment",
            NetRealEstate => "Net Real Estate",
            NetLeaseholdImprovements => "Net Leasehold Improvements",
            OtherAssets => "Other Assets",
            TotalNonCurrentAssets => "Total Non-Current Assets",
            TotalAssets => "Total Assets",
            AccountsPayable => "Accounts Payable",
            DeferredTaxes => "Deferred Taxes",
            LineOfCreditBorrowing => "Line of Credit Borrowing",
            CurrentPortionLongTermDebt => "Current Portion of Long-Term Debt",
            OtherCurrentLiabilities => "Other Current Liabilities",
            TotalCurrentLiabilities => "Total Current Liabilities",
            LongTermDebt => "Long-Term Debt",
            OtherLiabilities => "Other Liabilities",
            TotalNonCurrentLiabilities => "Total Non-Current Liabilities",
            TotalLiabilities => "Total Liabilities",
            CapitalStock => "Capital Stock",
            TreasuryStock => "Treasury Stock",
            RetainedEarnings => "Retained Earnings",
            TotalEquity => "Total Equity",
            TotalLiabilitiesAndEquity => "Total Liabilities and Equity",
        }
    }

    /// JSON key of the field inside its section
    pub fn key(&self) -> &'static str {
        use LineItem::*;
        match self {
            Checking => "1010_checking",
            Savings => "1020_savings",
            PettyCash => "1030_petty_cash",
            TotalCash => "total_cash",
            AccountsReceivable => "1100_accounts_receivable",
            WorkInProcess => "1200_work_in_process",
            PrepaidRent => "1310_prepaid_rent",
            PrepaidLiabilityInsurance => "1320_prepaid_liability_insurance",
            TotalOtherCurrentAssets => "total_other_current_assets",
            TotalCurrentAssets => "total_current_assets",
            NetComputerEquipment => "1400_net_computer_equipment",
            NetFurnitureFixturesEquipment => "1500_net_furniture_fixtures_equipment",
            NetFieldEquipment => "1600_net_field_equipment",
            NetRealEstate => "1700_net_real_estate",
            NetLeaseholdImprovements => "1800_net_leasehold_improvements",
            OtherAssets => "1900_other_assets",
            TotalNonCurrentAssets => "total_non_current_assets",
            TotalAssets => "total_assets",
            AccountsPayable => "2000_accounts_payable",
            DeferredTaxes => "2100_deferred_taxes",
            LineOfCreditBorrowing => "2200_line_of_credit_borrowing",
            CurrentPortionLongTermDebt => "2300_current_portion_long_term_debt",
            OtherCurrentLiabilities => "2400_other_current_liabilities",
            TotalCurrentLiabilities => "total_current_liabilities",
            LongTermDebt => "2500_long_term_debt",
            OtherLiabilities => "2600_other_liabilities",
            TotalNonCurrentLiabilities => "total_non_current_liabilities",
            TotalLiabilities => "total_liabilities",
            CapitalStock => "3000_capital_stock",
            TreasuryStock => "3100_treasury_stock",
            RetainedEarnings => "3200_retained_earnings",
            TotalEquity => "total_equity",
            TotalLiabilitiesAndEquity => "total_liabilities_and_equity",
        }
    }

    /// Sections enclosing the field in the populated JSON
    pub fn section(&self) -> &'static [&'static str] {
        use LineItem::*;
        match self {
            Checking | Savings | PettyCash | TotalCash => &["assets", "current_assets", "cash"],
            PrepaidRent | PrepaidLiabilityInsurance | TotalOtherCurrentAssets => {
                &["assets", "current_assets", "other_current_assets"]
            }
            AccountsReceivable | WorkInProcess | TotalCurrentAssets => &["assets", "current_assets"],
            NetComputerEquipment
            | NetFurnitureFixturesEquipment
            | NetFieldEquipment
            | NetRealEstate
            | NetLeaseholdImprovements
            | OtherAssets
            | TotalNonCurrentAssets => &["assets", "non_current_assets"],
            TotalAssets => &["assets"],
            AccountsPayable
            | DeferredTaxes
            | LineOfCreditBorrowing
            | CurrentPortionLongTermDebt
            | OtherCurrentLiabilities
            | TotalCurrentLiabilities => &["liabilities", "current_liabilities"],
            LongTermDebt | OtherLiabilities | TotalNonCurrentLiabilities => {
                &["liabilities", "non_current_liabilities"]
            }
            TotalLiabilities => &["liabilities"],
            CapitalStock | TreasuryStock | RetainedEarnings | TotalEquity => &["equity"],
            TotalLiabilitiesAndEquity => &[],
        }
    }

    /// Dotted path, e.g. `assets.current_assets.cash.1010_checking`
    pub fn path(&self) -> String {
        let mut parts: Vec<&str> = self.section().to_vec();
        parts.push(self.key());
        parts.join(".")
    }

    /// Contra accounts reduce their section and are always stored negative
    pub fn is_contra(&self) -> bool {
        matches!(self, LineItem::TreasuryStock)
    }

    pub fn is_total(&self) -> bool {
        self.account_number().is_none()
    }

    /// Regex fragment matching the printed row label, tolerant of the label
    /// being broken across lines or columns.
    pub fn label_pattern(&self) -> String {
        let words: Vec<String> = self.label().split_whitespace().map(regex::escape).collect();
        let label = words.join(r"\s+");
        match self.account_number() {
            Some(number) => format!(r"{}\s+{}", number, label),
            None => label,
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.account_number() {
            Some(number) => write!(f, "{} {}", number, self.label()),
            None => write!(f, "{}", self.label()),
        }
    }
}

/// A subtotal row and the rows it aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subtotal {
    pub total: LineItem,
    pub components: &'static [LineItem],
}

/// Aggregation rules of the statement, innermost first
pub const SUBTOTALS: [Subtotal; 10] = [
    Subtotal {
        total: LineItem::TotalCash,
        components: &[LineItem::Checking, LineItem::Savings, LineItem::PettyCash],
    },
    Subtotal {
        total: LineItem::TotalOtherCurrentAssets,
        components: &[LineItem::PrepaidRent, LineItem::PrepaidLiabilityInsurance],
    },
    Subtotal {
        total: LineItem::TotalCurrentAssets,
        components: &[
            LineItem::TotalCash,
            LineItem::AccountsReceivable,
            LineItem::WorkInProcess,
            LineItem::TotalOtherCurrentAssets,
        ],
    },
    Subtotal {
        total: LineItem::TotalNonCurrentAssets,
        components: &[
            LineItem::NetComputerEquipment,
            LineItem::NetFurnitureFixturesEquipment,
            LineItem::NetFieldEquipment,
            LineItem::NetRealEstate,
            LineItem::NetLeaseholdImprovements,
            LineItem::OtherAssets,
        ],
    },
    Subtotal {
        total: LineItem::TotalAssets,
        components: &[LineItem::TotalCurrentAssets, LineItem::TotalNonCurrentAssets],
    },
    Subtotal {
        total: LineItem::TotalCurrentLiabilities,
        components: &[
            LineItem::AccountsPayable,
            LineItem::DeferredTaxes,
            LineItem::LineOfCreditBorrowing,
            LineItem::CurrentPortionLongTermDebt,
            LineItem::OtherCurrentLiabilities,
        ],
    },
    Subtotal {
        total: LineItem::TotalNonCurrentLiabilities,
        components: &[LineItem::LongTermDebt, LineItem::OtherLiabilities],
    },
    Subtotal {
        total: LineItem::TotalLiabilities,
        components: &[LineItem::TotalCurrentLiabilities, LineItem::TotalNonCurrentLiabilities],
    },
    Subtotal {
        total: LineItem::TotalEquity,
        components: &[LineItem::CapitalStock, LineItem::TreasuryStock, LineItem::RetainedEarnings],
    },
    Subtotal {
        total: LineItem::TotalLiabilitiesAndEquity,
        components: &[LineItem::TotalLiabilities, LineItem::TotalEquity],
    },
];
