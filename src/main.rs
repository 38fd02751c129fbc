use analytics::{InventorySummary, PerformanceAnalyzer, filter_by_class};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use configuration::{Config, RowOrder, init_tracing, load_config};
use core_types::{AbcClass, EnrichedRecord};
use dataset::{SheetLayout, load_table_file, write_enriched_file};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

mod display;

/// The main entry point for the Giro inventory analyzer.
fn main() -> ExitCode {
    // GIRO__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::from(2);
        }
    };

    // Held until exit so the file appender flushes.
    let _log_guard = match init_tracing(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Analyze(args) => handle_analyze(args, &config),
        Commands::Columns => {
            display::print_columns(&config.columns);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Analysis failed.");
            eprintln!("Error processing the file: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Inventory turnover, coverage and ABC analysis for spreadsheet exports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to an optional giro.toml in the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a product spreadsheet and print the performance report.
    Analyze(AnalyzeArgs),
    /// List the required input columns under their configured labels.
    Columns,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The spreadsheet export to analyse (delimited text, see [ingest] in giro.toml).
    #[arg(long, short)]
    input: PathBuf,

    /// Write the complete enriched dataset to this file.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Only show these ABC classes in the data table (e.g. --class A,B).
    #[arg(long = "class", value_delimiter = ',')]
    classes: Vec<AbcClass>,

    /// Row order of the exported file; overrides report.order.
    #[arg(long, value_enum)]
    order: Option<RowOrder>,

    /// Print the summary and the selected rows as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    summary: &'a InventorySummary,
    records: Vec<&'a EnrichedRecord>,
}

/// Handles the orchestration of one analysis run.
fn handle_analyze(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let analyzer = PerformanceAnalyzer::new(config.analysis.clone())?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Analysing data...");

    let (table, records) = with_spinner(&spinner, || {
        let table = load_table_file(&args.input, &config.ingest)
            .with_context(|| format!("Failed to read '{}'", args.input.display()))?;
        let records =
            analyzer.analyze_table(&table, &config.columns, config.ingest.decimal_comma)?;
        Ok((table, records))
    })?;

    let summary = InventorySummary::from_records(&records, config.report.stockout_days);
    let classes = if args.classes.is_empty() {
        AbcClass::ALL.to_vec()
    } else {
        args.classes.clone()
    };
    let selected = filter_by_class(&records, &classes);

    if args.json {
        let report = JsonReport {
            generated_at: Utc::now(),
            source: args.input.display().to_string(),
            summary: &summary,
            records: selected,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display::print_report(&summary, &records, &selected, &config.report);
    }

    if let Some(output) = &args.output {
        let layout = SheetLayout::from_table(&table, &config.columns);
        let order = args.order.unwrap_or(config.report.order);
        write_enriched_file(output, &layout, &records, order, config.ingest.delimiter_byte())
            .with_context(|| format!("Failed to write '{}'", output.display()))?;
        if !args.json {
            println!("\nFull analysis exported to {}", output.display());
        }
    }

    Ok(())
}

/// Runs `work` and clears the spinner whether or not it succeeds, so an error
/// is never printed under a stale spinner frame.
fn with_spinner<T>(
    spinner: &ProgressBar,
    work: impl FnOnce() -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let result = work();
    spinner.finish_and_clear();
    result
}
