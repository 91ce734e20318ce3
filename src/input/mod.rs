//! Input processing module
//! Handles file detection, text extraction, and PDF discovery

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::{discover_pdfs, InputManager};
