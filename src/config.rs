//! Configuration management for the balance sheet extractor

use crate::error::{ExtractorError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub validation: ValidationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Folder scanned (recursively) for balance sheet PDFs
    pub downloads_dir: PathBuf,
    /// Extracted text, tables and populated JSON land here
    pub data_dir: PathBuf,
    pub template: PathBuf,
    pub validated_dir: PathBuf,
    pub mistakes_dir: PathBuf,
    pub results_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum difference, in currency units, still considered balanced
    pub tolerance: f64,
    pub check_subtotals: bool,
    pub move_files: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub detailed: bool,
    pub write_csv: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                downloads_dir: PathBuf::from("downloads"),
                data_dir: PathBuf::from("data"),
                template: PathBuf::from("template.json"),
                validated_dir: PathBuf::from("Validated"),
                mistakes_dir: PathBuf::from("Mistakes detected"),
                results_dir: PathBuf::from("test_results"),
            },
            validation: ValidationConfig {
                tolerance: 1.0,
                check_subtotals: true,
                move_files: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                detailed: false,
                write_csv: true,
            },
        }
    }
}

impl Config {
    /// Load the config from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ExtractorError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.check()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("balance-sheet-extractor")
            .join("config.toml")
    }

    /// Tolerance as a decimal amount
    pub fn tolerance(&self) -> Result<Decimal> {
        Decimal::try_from(self.validation.tolerance).map_err(|e| {
            ExtractorError::Configuration(format!(
                "Invalid validation tolerance {}: {}",
                self.validation.tolerance, e
            ))
        })
    }

    fn check(&self) -> Result<()> {
        if !self.validation.tolerance.is_finite() || self.validation.tolerance < 0.0 {
            return Err(ExtractorError::Configuration(format!(
                "validation.tolerance must be a non-negative number, got {}",
                self.validation.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_custom_values_survive_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.validation.tolerance = 0.5;
        config.output.format = OutputFormat::Markdown;
        config.paths.data_dir = PathBuf::from("extracted");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
        assert_eq!(loaded.paths.data_dir, PathBuf::from("extracted"));
        assert_eq!(loaded.tolerance().unwrap(), dec!(0.5));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.validation.tolerance = -1.0;
        config.save_to(&path).unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ExtractorError::Configuration(_))));
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "paths = 3").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ExtractorError::Configuration(_))));
    }
}
