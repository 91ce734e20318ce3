//! Populate a balance sheet template from extracted statement text

use crate::error::{ExtractorError, Result};
use crate::processing::amount::{clean_amount, AMOUNT_PATTERN};
use crate::processing::balance_sheet::BalanceSheet;
use crate::processing::chart::LineItem;
use log::{debug, info};
use regex::Regex;
use rust_decimal::Decimal;
use std::path::Path;

pub struct Populator {
    company_regex: Regex,
    date_regex: Regex,
    title_regex: Regex,
    account_row_regex: Regex,
    line_items: Vec<(LineItem, Regex)>,
}

impl Default for Populator {
    fn default() -> Self {
        Self::new()
    }
}

impl Populator {
    pub fn new() -> Self {
        // Company names are printed as e.g. "XYZ, Inc."
        let company_regex = Regex::new(r"([A-Z]+),?\s*Inc\.?").expect("Invalid company regex");

        let date_regex = Regex::new(r"(?i)\bAs[ \t]+of[ \t]+([^\n]+)").expect("Invalid report date regex");

        let title_regex = Regex::new(r"(?im)^[ \t]*(balance[ \t]+sheet|statement[ \t]+of[ \t]+financial[ \t]+position)[ \t]*\r?$")
            .expect("Invalid report title regex");

        let account_row_regex = Regex::new(r"^\d{4}[ \t]+[A-Za-z]").expect("Invalid account row regex");

        let line_items = LineItem::ALL
            .iter()
            .map(|item| {
                let pattern = format!(r"(?ims)\b{}\s+{}", item.label_pattern(), AMOUNT_PATTERN);
                let regex = Regex::new(&pattern).expect("Invalid line item regex");
                (*item, regex)
            })
            .collect();

        Self {
            company_regex,
            date_regex,
            title_regex,
            account_row_regex,
            line_items,
        }
    }

    /// Fill `template` with the values found in `text`.
    ///
    /// Header fields keep their template value when not found; every line
    /// item is overwritten, with zero standing in for a missing row.
    pub fn populate(&self, text: &str, template: &BalanceSheet) -> BalanceSheet {
        let mut populated = template.clone();

        if let Some(caps) = self.company_regex.captures(text) {
            populated.company_name = caps[1].trim().to_string();
        }
        if let Some(caps) = self.date_regex.captures(text) {
            populated.report_date = caps[1].trim().to_string();
        }
        if let Some(caps) = self.title_regex.captures(text) {
            populated.report_title = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
        }

        for (item, regex) in &self.line_items {
            let value = self.extract_value(text, *item, regex);
            populated.set(*item, value);
        }

        populated
    }

    fn extract_value(&self, text: &str, item: LineItem, regex: &Regex) -> Decimal {
        // a row printed without an amount would otherwise take the next row's account number
        let amount = regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .find(|m| !self.account_row_regex.is_match(&text[m.start()..]));
        let Some(amount) = amount else {
            debug!("No match for {}", item);
            return Decimal::ZERO;
        };

        let value = clean_amount(amount.as_str());
        if item.is_contra() {
            -value.abs()
        } else {
            value
        }
    }
}

/// Load the template and text, populate, and write the result to `output_path`
pub fn populate_from_files(
    template_path: Option<&Path>,
    text_file_path: &Path,
    output_path: &Path,
) -> Result<BalanceSheet> {
    let template = match template_path {
        Some(path) => BalanceSheet::load_template(path)?,
        None => BalanceSheet::default(),
    };

    if !text_file_path.exists() {
        return Err(ExtractorError::InvalidInput(format!(
            "Text file not found: {}",
            text_file_path.display()
        )));
    }
    let text_content = std::fs::read_to_string(text_file_path)?;

    let populated = Populator::new().populate(&text_content, &template);
    populated.save(output_path)?;

    info!("Populated balance sheet saved to: {}", output_path.display());
    Ok(populated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "XYZ, Inc.\nBalance Sheet\nAs of December 31, 2018\n\
        Assets\nCurrent Assets\nCash\n\
        1010 Checking 583,961\n1020 Savings 224,600\n1030 Petty Cash 89,840\nTotal Cash 898,402\n\
        Equity\n3000 Capital Stock 2,500,000\n3100 Treasury Stock (1,250,000)\n\
        3200 Retained Earnings 2,720,799\nTotal Equity 3,970,799\n\
        Total Liabilities 2,887,230\nTotal Liabilities and Equity 6,858,029\n";

    #[test]
    fn test_header_fields() {
        let sheet = Populator::new().populate(SAMPLE, &BalanceSheet::default());
        assert_eq!(sheet.company_name, "XYZ");
        assert_eq!(sheet.report_date, "December 31, 2018");
        assert_eq!(sheet.report_title, "Balance Sheet");
    }

    #[test]
    fn test_cash_lines() {
        let sheet = Populator::new().populate(SAMPLE, &BalanceSheet::default());
        assert_eq!(sheet.get(LineItem::Checking), dec!(583961));
        assert_eq!(sheet.get(LineItem::Savings), dec!(224600));
        assert_eq!(sheet.get(LineItem::PettyCash), dec!(89840));
        assert_eq!(sheet.get(LineItem::TotalCash), dec!(898402));
    }

    #[test]
    fn test_treasury_stock_is_negative() {
        let sheet = Populator::new().populate(SAMPLE, &BalanceSheet::default());
        assert_eq!(sheet.get(LineItem::TreasuryStock), dec!(-1250000));

        let unbracketed = "3100 Treasury Stock 1,250,000";
        let sheet = Populator::new().populate(unbracketed, &BalanceSheet::default());
        assert_eq!(sheet.get(LineItem::TreasuryStock), dec!(-1250000));
    }

    #[test]
    fn test_totals_do_not_shadow_each_other() {
        let sheet = Populator::new().populate(SAMPLE, &BalanceSheet::default());
        assert_eq!(sheet.get(LineItem::TotalLiabilities), dec!(2887230));
        assert_eq!(sheet.get(LineItem::TotalLiabilitiesAndEquity), dec!(6858029));
        assert_eq!(sheet.get(LineItem::TotalEquity), dec!(3970799));
    }

    #[test]
    fn test_missing_rows_become_zero() {
        let mut template = BalanceSheet::default();
        template.set(LineItem::AccountsPayable, dec!(10));
        template.company_name = "Template Co".to_string();

        let sheet = Populator::new().populate("nothing to see here", &template);
        assert_eq!(sheet.get(LineItem::AccountsPayable), Decimal::ZERO);
        assert_eq!(sheet.company_name, "Template Co");
    }

    #[test]
    fn test_labels_split_across_lines() {
        let text = "1500 Net Furniture,\nFixtures, & Equipment\n98,256\nTotal Non-Current\nAssets 1,501,908";
        let sheet = Populator::new().populate(text, &BalanceSheet::default());
        assert_eq!(sheet.get(LineItem::NetFurnitureFixturesEquipment), dec!(98256));
        assert_eq!(sheet.get(LineItem::TotalNonCurrentAssets), dec!(1501908));
    }

    #[test]
    fn test_row_without_amount_is_missing() {
        let text = "1030 Petty Cash\n1100 Accounts Receivable 3,593,607\n";
        let sheet = Populator::new().populate(text, &BalanceSheet::default());
        assert_eq!(sheet.get(LineItem::PettyCash), Decimal::ZERO);
        assert_eq!(sheet.get(LineItem::AccountsReceivable), dec!(3593607));
    }

    #[test]
    fn test_crlf_text() {
        let text = "XYZ, Inc.\r\nBalance Sheet\r\nAs of December 31, 2018\r\n1010 Checking 583,961\r\n";
        let sheet = Populator::new().populate(text, &BalanceSheet::default());
        assert_eq!(sheet.report_title, "Balance Sheet");
        assert_eq!(sheet.report_date, "December 31, 2018");
        assert_eq!(sheet.get(LineItem::Checking), dec!(583961));
    }

    #[test]
    fn test_dollar_signs_and_cents() {
        let text = "1100 Accounts Receivable $3,593,607.25";
        let sheet = Populator::new().populate(text, &BalanceSheet::default());
        assert_eq!(sheet.get(LineItem::AccountsReceivable), dec!(3593607.25));
    }
}
