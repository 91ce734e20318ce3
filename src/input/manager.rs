//! Input manager for handling different file types

use crate::error::{ExtractorError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, Vec<String>>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract page texts from a PDF or plain text file
    pub async fn extract_pages(&mut self, path: &Path) -> Result<Vec<String>> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(ExtractorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let pages = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract_pages(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract_pages(path).await?
            }
            FileType::Unknown => {
                return Err(ExtractorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };
        debug!("{} page(s) read from {}", pages.len(), path.display());

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), pages.clone());
        }

        Ok(pages)
    }

    /// Extract the whole document as one string
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        Ok(self.extract_pages(path).await?.join("\n"))
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Recursively collect every PDF below `dir`, sorted by path
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ExtractorError::InvalidInput(format!(
            "Folder not found: {}",
            dir.display()
        )));
    }

    let mut pdfs = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if FileType::from_path(&path) == FileType::Pdf {
                pdfs.push(path);
            }
        }
    }

    pdfs.sort();
    Ok(pdfs)
}
