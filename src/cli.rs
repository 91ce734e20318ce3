//! CLI interface for the balance sheet extractor

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "balance-sheet-extractor")]
#[command(about = "Extract, populate and validate balance sheets from PDF statements")]
#[command(long_about = "Pull text and tables out of balance sheet PDFs, fill a structured chart-of-accounts template, \
check that Assets = Liabilities + Equity, and score extraction accuracy over a folder of statements")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract text and tables from a PDF or every PDF in a directory
    Extract {
        /// PDF file or directory (defaults to the downloads directory)
        path: Option<PathBuf>,
    },

    /// Fill the balance sheet template from an extracted text file
    Populate {
        /// Extracted text file (e.g. data/<name>_text.txt)
        #[arg(short, long)]
        text: PathBuf,

        /// Template JSON file
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output JSON path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a populated balance sheet and file it by result
    Validate {
        /// Populated JSON file (defaults to data/populated_balance_sheet.json)
        file: Option<PathBuf>,

        /// Leave the file where it is
        #[arg(long)]
        no_move: bool,
    },

    /// Run extraction, population and validation on one PDF
    Process {
        /// Path to the statement (PDF or TXT)
        pdf: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output_format: String,

        /// Leave the populated file in the data directory
        #[arg(long)]
        no_move: bool,

        /// Save the report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Score extraction over every PDF in a directory
    Accuracy {
        /// Directory of PDFs (defaults to the downloads directory)
        dir: Option<PathBuf>,

        /// Skip the CSV summary
        #[arg(long)]
        no_csv: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("console").unwrap(), OutputFormat::Console);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("sheet.PDF"), &["pdf"]).is_ok());
        assert!(validate_file_extension(Path::new("sheet.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("sheet"), &["pdf"]).is_err());
    }

    #[test]
    fn test_parse_process_command() {
        let cli = Cli::try_parse_from([
            "balance-sheet-extractor",
            "-v",
            "process",
            "downloads/sheet.pdf",
            "--output-format",
            "json",
            "--no-move",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Process { pdf, output_format, no_move, save } => {
                assert_eq!(pdf, PathBuf::from("downloads/sheet.pdf"));
                assert_eq!(output_format, "json");
                assert!(no_move);
                assert!(save.is_none());
            }
            _ => panic!("expected process command"),
        }
    }

    #[test]
    fn test_config_action_is_optional() {
        let cli = Cli::try_parse_from(["balance-sheet-extractor", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { action: None }));
    }
}
