//! Balance sheet extractor library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod storage;

pub use error::{Result, ExtractorError};
pub use config::Config;
