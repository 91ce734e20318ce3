//! Balance sheet extractor: PDF statements to validated, structured JSON

use balance_sheet_extractor::cli::{self, Cli, Commands, ConfigAction};
use balance_sheet_extractor::config::Config;
use balance_sheet_extractor::error::{ExtractorError, Result};
use balance_sheet_extractor::output::{save_report_to_file, ReportGenerator};
use balance_sheet_extractor::pipeline::Pipeline;
use balance_sheet_extractor::processing::populator::populate_from_files;
use balance_sheet_extractor::processing::amount::format_amount;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

const DEFAULT_POPULATED_FILE: &str = "populated_balance_sheet.json";

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Extract { path } => {
            let target = path.unwrap_or_else(|| config.paths.downloads_dir.clone());
            let mut pipeline = Pipeline::new(config)?;

            if target.is_dir() {
                println!("📂 Extracting every PDF in {}", target.display());
                let summary = pipeline.extract_all(&target).await?;
                println!("\n📊 Extraction completed!");
                println!("  • Processed: {}", summary.processed);
                println!("  • Failed: {}", summary.failed);
                println!("📁 Output: {}", pipeline.store().data_dir().display());
            } else {
                cli::validate_file_extension(&target, &["pdf", "txt"]).map_err(ExtractorError::InvalidInput)?;
                println!("📄 Extracting {}", target.display());
                let outcome = pipeline.extract(&target).await?;
                println!("\n📊 Extraction completed!");
                println!("  • Pages: {}", outcome.pages);
                println!("  • Tables: {}", outcome.tables);
                println!("📝 Text: {}", outcome.text_file.display());
                if let Some(tables_file) = &outcome.tables_file {
                    println!("📋 Tables: {}", tables_file.display());
                }
            }
        }

        Commands::Populate { text, template, output } => {
            let template = template.or_else(|| {
                let default = config.paths.template.clone();
                default.exists().then_some(default)
            });
            let output = output.unwrap_or_else(|| config.paths.data_dir.join(DEFAULT_POPULATED_FILE));

            println!("📝 Populating balance sheet from {}", text.display());
            let sheet = populate_from_files(template.as_deref(), &text, &output)?;

            println!("✅ Balance sheet populated: {}", output.display());
            println!("  • Company: {}", sheet.company_name);
            println!("  • Report date: {}", sheet.report_date);
        }

        Commands::Validate { file, no_move } => {
            let file = file.unwrap_or_else(|| config.paths.data_dir.join(DEFAULT_POPULATED_FILE));
            let move_files = config.validation.move_files && !no_move;
            let generator = report_generator(&config);
            let format = config.output.format;
            let pipeline = Pipeline::new(config)?;

            info!("Validating {}", file.display());
            let report = pipeline.validate_file(&file)?;
            println!("{}", generator.sheet_report(&report, &format)?);

            if move_files {
                let destination = pipeline.file_result(&file, &report)?;
                println!("📁 Moved to {}", destination.display());
            }
        }

        Commands::Process { pdf, output_format, no_move, save } => {
            cli::validate_file_extension(&pdf, &["pdf", "txt"]).map_err(ExtractorError::InvalidInput)?;
            let format = cli::parse_output_format(&output_format).map_err(ExtractorError::InvalidInput)?;
            let move_files = config.validation.move_files && !no_move;
            let generator = report_generator(&config);
            let mut pipeline = Pipeline::new(config)?;

            println!("🚀 Processing {}", pdf.display());
            let processed = pipeline.process(&pdf).await?;

            let content = generator.sheet_report(&processed.report, &format)?;
            println!("{}", content);

            if let Some(save_path) = save {
                save_report_to_file(&content, &save_path)?;
                println!("💾 Report saved to {}", save_path.display());
            }

            if move_files {
                let destination = pipeline.file_result(&processed.populated_file, &processed.report)?;
                println!("📁 Moved to {}", destination.display());
            }
        }

        Commands::Accuracy { dir, no_csv } => {
            let dir = dir.unwrap_or_else(|| config.paths.downloads_dir.clone());
            let results_dir = config.paths.results_dir.clone();
            let write_csv = config.output.write_csv && !no_csv;
            let generator = report_generator(&config);
            let format = config.output.format;
            let mut pipeline = Pipeline::new(config)?;

            println!("🔍 Running accuracy test on {}", dir.display());
            let report = pipeline.run_accuracy(&dir, true).await?;

            println!("{}", generator.accuracy_report(&report, &format)?);

            let json_path = report.save_json(&results_dir)?;
            println!("💾 Detailed results saved to: {}", json_path.display());
            if write_csv {
                let csv_path = report.save_csv(&results_dir)?;
                println!("📊 Summary CSV saved to: {}", csv_path.display());
            }
        }

        Commands::Config { action } => {
            let config_path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Downloads Directory: {}", config.paths.downloads_dir.display());
                    println!("Data Directory: {}", config.paths.data_dir.display());
                    println!("Template: {}", config.paths.template.display());
                    println!("Validated Directory: {}", config.paths.validated_dir.display());
                    println!("Mistakes Directory: {}", config.paths.mistakes_dir.display());
                    println!("Results Directory: {}", config.paths.results_dir.display());
                    println!("\nValidation:");
                    println!("  Tolerance: {}", format_amount(config.tolerance()?));
                    println!("  Check subtotals: {}", config.validation.check_subtotals);
                    println!("  Move files: {}", config.validation.move_files);
                    println!("\nOutput:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Colors: {}", config.output.color_output);
                    println!("  Detailed: {}", config.output.detailed);
                    println!("  CSV summary: {}", config.output.write_csv);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
        }
    }

    Ok(())
}

fn report_generator(config: &Config) -> ReportGenerator {
    ReportGenerator::with_options(config.output.color_output, config.output.detailed, true, true)
}
