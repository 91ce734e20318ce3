//! End-to-end processing: extract, populate, validate, report

use crate::config::Config;
use crate::error::{ExtractorError, Result};
use crate::input::{discover_pdfs, InputManager};
use crate::output::report::{AccuracyReport, SheetReport, TestResult};
use crate::processing::balance_sheet::BalanceSheet;
use crate::processing::populator::Populator;
use crate::processing::tables::TableExtractor;
use crate::processing::validator::{count_extracted_fields, file_by_validation, Validator};
use crate::storage::{file_stem, DataStore};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Files written while extracting one document
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub text_file: PathBuf,
    pub tables_file: Option<PathBuf>,
    pub pages: usize,
    pub tables: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ProcessedSheet {
    pub report: SheetReport,
    pub populated_file: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

pub struct Pipeline {
    config: Config,
    input: InputManager,
    store: DataStore,
    populator: Populator,
    tables: TableExtractor,
    validator: Validator,
    template: BalanceSheet,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        let template_path = &config.paths.template;
        let template = if template_path.exists() {
            BalanceSheet::load_template(template_path)?
        } else {
            warn!("Template file not found: {}, using built-in layout", template_path.display());
            BalanceSheet::default()
        };

        let validator = Validator::new(config.tolerance()?).with_subtotals(config.validation.check_subtotals);

        Ok(Self {
            store: DataStore::new(&config.paths.data_dir)?,
            input: InputManager::new().with_cache(false),
            populator: Populator::new(),
            tables: TableExtractor::new(),
            validator,
            template,
            config,
        })
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Extract page text and tables from a document into the data directory
    pub async fn extract(&mut self, source: &Path) -> Result<ExtractionOutcome> {
        info!("Processing document: {}", source.display());
        let pages = self.input.extract_pages(source).await?;

        let text_file = self.store.save_text(source, &pages)?.ok_or_else(|| {
            ExtractorError::Processing(format!("Text file not generated: no text in {}", source.display()))
        })?;

        let tables = self.tables.extract(&pages);
        let tables_file = self.store.save_tables(source, &tables)?;
        for table in &tables {
            info!("  -> Page {}: table with {} rows", table.page, table.rows.len());
        }

        Ok(ExtractionOutcome {
            text_file,
            tables_file,
            pages: pages.len(),
            tables: tables.len(),
            text: pages.join("\n"),
        })
    }

    /// Extract, populate and validate one document
    pub async fn process(&mut self, source: &Path) -> Result<ProcessedSheet> {
        let extraction = self.extract(source).await?;

        let sheet = self.populator.populate(&extraction.text, &self.template);
        let populated_file = self.store.populated_path(&file_stem(source)?);
        sheet.save(&populated_file)?;
        info!("Populated balance sheet saved to: {}", populated_file.display());

        let report = self.report_for(source.display().to_string(), sheet);
        Ok(ProcessedSheet { report, populated_file })
    }

    /// Validate a populated balance sheet JSON file
    pub fn validate_file(&self, path: &Path) -> Result<SheetReport> {
        if !path.exists() {
            return Err(ExtractorError::InvalidInput(format!("File not found: {}", path.display())));
        }
        let sheet = BalanceSheet::from_json_file(path)?;
        Ok(self.report_for(path.display().to_string(), sheet))
    }

    /// Move a populated file into the validated or mistakes folder
    pub fn file_result(&self, path: &Path, report: &SheetReport) -> Result<PathBuf> {
        file_by_validation(
            path,
            report.validation.is_balanced,
            &self.config.paths.validated_dir,
            &self.config.paths.mistakes_dir,
        )
    }

    fn report_for(&self, source: String, sheet: BalanceSheet) -> SheetReport {
        let validation = self.validator.validate(&sheet);
        let stats = count_extracted_fields(&sheet);
        SheetReport::new(source, sheet, validation, stats)
    }

    /// Extract every PDF below `dir`; failures are logged, not fatal
    pub async fn extract_all(&mut self, dir: &Path) -> Result<BatchSummary> {
        let pdfs = discover_pdfs(dir)?;
        if pdfs.is_empty() {
            return Err(ExtractorError::InvalidInput(format!("No PDF files found in {}", dir.display())));
        }
        info!("Found {} PDF files to process", pdfs.len());

        let mut summary = BatchSummary::default();
        for (i, pdf) in pdfs.iter().enumerate() {
            info!("=== Processing PDF {}/{} ===", i + 1, pdfs.len());
            match self.extract(pdf).await {
                Ok(_) => summary.processed += 1,
                Err(e) => {
                    error!("Error processing {}: {}", pdf.display(), e);
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }

    /// Run the full pipeline over every PDF below `dir` and score the results
    pub async fn run_accuracy(&mut self, dir: &Path, show_progress: bool) -> Result<AccuracyReport> {
        let pdfs = discover_pdfs(dir)?;
        if pdfs.is_empty() {
            return Err(ExtractorError::InvalidInput(format!("No PDF files found in {}", dir.display())));
        }
        self.run_accuracy_on(&pdfs, show_progress).await
    }

    pub async fn run_accuracy_on(&mut self, sources: &[PathBuf], show_progress: bool) -> Result<AccuracyReport> {
        let progress = if show_progress {
            let bar = ProgressBar::new(sources.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut results = Vec::with_capacity(sources.len());
        for source in sources {
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| source.display().to_string());
            progress.set_message(name.clone());

            let result = match self.process(source).await {
                Ok(processed) => {
                    let stats = &processed.report.field_extraction;
                    info!(
                        "{}: {}/{} fields ({:.1}%), balanced: {}",
                        name,
                        stats.extracted_fields,
                        stats.total_fields,
                        stats.extraction_rate,
                        processed.report.validation.is_balanced
                    );
                    TestResult::succeeded(name, &processed.report)
                }
                Err(e) => {
                    warn!("{}: {}", name, e);
                    TestResult::failed(name, e)
                }
            };
            results.push(result);
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(AccuracyReport::from_results(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::LineItem;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.paths.data_dir = dir.join("data");
        config.paths.template = dir.join("template.json");
        config.paths.validated_dir = dir.join("Validated");
        config.paths.mistakes_dir = dir.join("Mistakes detected");
        config.paths.results_dir = dir.join("test_results");
        config
    }

    #[tokio::test]
    async fn test_process_plain_text_statement() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("Mini.txt");
        std::fs::write(
            &source,
            "ABC, Inc.\nAs of June 30, 2020\nTotal Assets 100\nTotal Liabilities 40\nTotal Equity 60\n\
             Total Liabilities and Equity 100\n",
        )
        .unwrap();

        let mut pipeline = Pipeline::new(config_in(temp_dir.path())).unwrap();
        let processed = pipeline.process(&source).await.unwrap();

        assert_eq!(processed.populated_file, temp_dir.path().join("data").join("Mini_populated.json"));
        assert!(processed.populated_file.exists());
        assert!(pipeline.store().text_path("Mini").exists());
        assert_eq!(processed.report.sheet.company_name, "ABC");
        assert_eq!(processed.report.sheet.get(LineItem::TotalAssets), dec!(100));
        assert!(processed.report.validation.is_balanced);
    }

    #[tokio::test]
    async fn test_empty_document_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("blank.txt");
        std::fs::write(&source, "   \n").unwrap();

        let mut pipeline = Pipeline::new(config_in(temp_dir.path())).unwrap();
        let result = pipeline.process(&source).await;
        assert!(matches!(result, Err(ExtractorError::Processing(_))));
    }

    #[tokio::test]
    async fn test_accuracy_records_failures() {
        let temp_dir = TempDir::new().unwrap();
        let broken = temp_dir.path().join("broken.pdf");
        std::fs::write(&broken, b"not a pdf").unwrap();

        let mut pipeline = Pipeline::new(config_in(temp_dir.path())).unwrap();
        let report = pipeline.run_accuracy(temp_dir.path(), false).await.unwrap();

        assert_eq!(report.summary.total_tests, 1);
        assert_eq!(report.summary.successful_tests, 0);
        assert!(!report.detailed_results[0].success);
        assert_eq!(report.detailed_results[0].pdf_name, "broken.pdf");
    }

    #[tokio::test]
    async fn test_extract_all_requires_pdfs() {
        let temp_dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline::new(config_in(temp_dir.path())).unwrap();
        let result = pipeline.extract_all(temp_dir.path()).await;
        assert!(matches!(result, Err(ExtractorError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = Pipeline::new(config_in(temp_dir.path())).unwrap();
        let result = pipeline.validate_file(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(ExtractorError::InvalidInput(_))));
    }
}
