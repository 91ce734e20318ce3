//! Text extraction from balance sheet documents

use crate::error::{ExtractorError, Result};
use std::path::Path;
use tokio::fs;

/// Form feed separating pages in plain text dumps
const PAGE_BREAK: char = '\u{000C}';

pub trait TextExtractor {
    /// Extract the text of every page, in page order
    fn extract_pages(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path).await.map_err(ExtractorError::Io)?;

        // pdf-extract is CPU bound and may panic on malformed files
        let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
            .await
            .map_err(|e| {
                ExtractorError::PdfExtraction(format!("PDF parser aborted on '{}': {}", path.display(), e))
            })?
            .map_err(|e| {
                ExtractorError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
            })?;

        if pages.iter().all(|page| page.trim().is_empty()) {
            return Err(ExtractorError::PdfExtraction(format!(
                "No text layer found in '{}' (scanned or image-only PDF?)",
                path.display()
            )));
        }
        Ok(pages)
    }
}

/// Plain text dumps; form feeds (as written by pdftotext) separate pages
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path).await.map_err(ExtractorError::Io)?;
        Ok(split_pages(&content))
    }
}

/// Split extracted text on page breaks, dropping blank trailing pages
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_BREAK).map(|page| page.to_string()).collect();
    while pages.len() > 1 && pages.last().map_or(false, |page| page.trim().is_empty()) {
        pages.pop();
    }
    pages
}
