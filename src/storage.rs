//! Data directory layout for extracted and populated files

use crate::error::{ExtractorError, Result};
use crate::processing::tables::PageTable;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    /// Opens the data directory, creating it if needed
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn text_path(&self, stem: &str) -> PathBuf {
        self.data_dir.join(format!("{}_text.txt", stem))
    }

    pub fn tables_path(&self, stem: &str) -> PathBuf {
        self.data_dir.join(format!("{}_tables.txt", stem))
    }

    pub fn populated_path(&self, stem: &str) -> PathBuf {
        self.data_dir.join(format!("{}_populated.json", stem))
    }

    /// Write the page texts of `source`; `None` when every page is blank
    pub fn save_text(&self, source: &Path, pages: &[String]) -> Result<Option<PathBuf>> {
        let sections: Vec<String> = pages
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| format!("=== PAGE {} TEXT ===\n{}\n", i + 1, text))
            .collect();

        if sections.is_empty() {
            return Ok(None);
        }

        let path = self.text_path(&file_stem(source)?);
        let content = format!(
            "=== TEXT CONTENT FROM {} ===\n\n{}",
            file_name(source)?,
            sections.join("\n")
        );
        fs::write(&path, content)?;

        info!("Saved text to: {}", path.display());
        Ok(Some(path))
    }

    /// Write the rebuilt tables of `source`; `None` when there are none
    pub fn save_tables(&self, source: &Path, tables: &[PageTable]) -> Result<Option<PathBuf>> {
        if tables.is_empty() {
            return Ok(None);
        }

        let mut counters = std::collections::HashMap::new();
        let blocks: Vec<String> = tables
            .iter()
            .map(|table| {
                let index = counters.entry(table.page).or_insert(0usize);
                *index += 1;
                format!("=== PAGE {} TABLE {} ===\n{}\n", table.page, index, table.to_tsv())
            })
            .collect();

        let path = self.tables_path(&file_stem(source)?);
        let content = format!(
            "=== TABLE CONTENT FROM {} ===\n\n{}",
            file_name(source)?,
            blocks.join("\n")
        );
        fs::write(&path, content)?;

        info!("Saved tables to: {}", path.display());
        Ok(Some(path))
    }
}

pub fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| ExtractorError::InvalidInput(format!("No file name in path: {}", path.display())))
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| ExtractorError::InvalidInput(format!("No file name in path: {}", path.display())))
}
