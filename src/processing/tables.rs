//! Rebuild statement tables from page text
//!
//! The PDF text layer loses column structure. A page is read as one table:
//! every line ending in an amount is a row, and heading lines between the
//! first and last row are kept as label-only rows.

use crate::processing::amount::AMOUNT_PATTERN;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub account: Option<String>,
    pub name: String,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageTable {
    /// 1-based page number
    pub page: usize,
    pub rows: Vec<TableRow>,
}

pub struct TableExtractor {
    row_regex: Regex,
    min_amount_rows: usize,
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor {
    pub fn new() -> Self {
        let row_regex = Regex::new(&format!(r"^(?:(\d{{4}})\s+)?(.+?)\s+{}\s*$", AMOUNT_PATTERN))
            .expect("Invalid table row regex");
        Self {
            row_regex,
            min_amount_rows: 2,
        }
    }

    /// One table per page that carries at least two amount rows
    pub fn extract(&self, pages: &[String]) -> Vec<PageTable> {
        pages
            .iter()
            .enumerate()
            .filter_map(|(i, text)| self.extract_page(i + 1, text))
            .collect()
    }

    fn extract_page(&self, page: usize, text: &str) -> Option<PageTable> {
        let rows: Vec<TableRow> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.parse_line(line))
            .collect();

        let amount_rows = rows.iter().filter(|row| row.amount.is_some()).count();
        if amount_rows < self.min_amount_rows {
            return None;
        }

        let first = rows.iter().position(|row| row.amount.is_some())?;
        let last = rows.iter().rposition(|row| row.amount.is_some())?;

        Some(PageTable {
            page,
            rows: rows[first..=last].to_vec(),
        })
    }

    fn parse_line(&self, line: &str) -> TableRow {
        // "As of December 31, 2018" ends in a number but is a date
        let row = self
            .row_regex
            .captures(line)
            .filter(|caps| !caps[2].trim_end().ends_with(','));

        match row {
            Some(caps) => TableRow {
                account: caps.get(1).map(|m| m.as_str().to_string()),
                name: caps[2].trim().to_string(),
                amount: Some(caps[3].to_string()),
            },
            None => TableRow {
                account: None,
                name: line.to_string(),
                amount: None,
            },
        }
    }
}

impl PageTable {
    /// Tab separated rendering, one row per line
    pub fn to_tsv(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                [
                    row.account.as_deref().unwrap_or(""),
                    row.name.as_str(),
                    row.amount.as_deref().unwrap_or(""),
                ]
                .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
