//! Statement processing module
//! Amount parsing, chart of accounts, template population, table rebuilding and validation

pub mod amount;
pub mod balance_sheet;
pub mod chart;
pub mod populator;
pub mod tables;
pub mod validator;

pub use balance_sheet::BalanceSheet;
pub use chart::LineItem;
pub use populator::Populator;
pub use validator::{FieldStats, ValidationResult, Validator};
