//! Command implementations for the GEF reader CLI
//!
//! Each file passed to `parse` is decoded independently; one broken file is
//! reported and the run continues with the next.

use crate::cli::args::{Args, ColumnsArgs, Commands, OutputFormat, ParseArgs};
use crate::models::CptRecord;
use crate::parser::GefParser;
use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::path::Path;
use tracing::{debug, error, info};

/// Statistics for a CLI run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Files decoded successfully
    pub files_parsed: usize,
    /// Files that failed to decode
    pub files_failed: usize,
    /// Measurement rows across all parsed files
    pub rows: usize,
}

impl RunStats {
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}

/// Main command runner
pub fn run(args: Args) -> Result<RunStats> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    match args.command {
        Some(Commands::Parse(parse_args)) => run_parse(&parse_args),
        Some(Commands::Columns(columns_args)) => run_columns(&columns_args),
        None => Ok(RunStats::default()),
    }
}

fn run_parse(args: &ParseArgs) -> Result<RunStats> {
    let config = args
        .parser
        .build_config()
        .context("Failed to build parser configuration")?;
    let parser = GefParser::new(config);
    let mut stats = RunStats::default();
    let mut documents = Vec::new();

    info!("Parsing {} file(s)", args.files.len());

    for path in &args.files {
        match parser.parse_file(path) {
            Ok(record) => {
                stats.files_parsed += 1;
                stats.rows += record.measurements().len();
                match args.format {
                    OutputFormat::Summary => print_summary(path, &record),
                    OutputFormat::Json => documents.push(json!({
                        "file": path.display().to_string(),
                        "record": record,
                    })),
                }
            }
            Err(e) => {
                stats.files_failed += 1;
                error!("{}: {}", path.display(), e);
                if args.format == OutputFormat::Json {
                    documents.push(json!({
                        "file": path.display().to_string(),
                        "error": e.to_string(),
                    }));
                }
            }
        }
    }

    match args.format {
        OutputFormat::Summary => print_totals(&stats),
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&documents)
                .context("Failed to serialize parsed records")?;
            println!("{}", output);
        }
    }

    Ok(stats)
}

fn run_columns(args: &ColumnsArgs) -> Result<RunStats> {
    let config = args
        .parser
        .build_config()
        .context("Failed to build parser configuration")?;
    let record = GefParser::new(config)
        .parse_file(&args.file)
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;

    println!(
        "{} ({} dialect)",
        args.file.display().to_string().bright_white().bold(),
        record.dialect().name()
    );
    for (index, column) in record.schema().columns().iter().enumerate() {
        let unit = record.units().get(column).map(String::as_str).unwrap_or("");
        println!("  {:>3}  {:<24} {}", index + 1, column.cyan(), unit.dimmed());
    }

    Ok(RunStats {
        files_parsed: 1,
        files_failed: 0,
        rows: record.measurements().len(),
    })
}

fn print_summary(path: &Path, record: &CptRecord) {
    let header = record.header();

    println!("\n{}", path.display().to_string().bright_green().bold());
    println!(
        "  Dialect:   {} ({})",
        record.dialect().name(),
        record.encoding()
    );
    if let Some(hole_id) = &header.hole_id {
        println!("  Hole:      {}", hole_id);
    }
    if let Some(project_id) = &header.project_id {
        println!("  Project:   {}", project_id);
    }
    if let Some(date) = header.survey_date() {
        println!("  Date:      {}", date);
    }
    if let Some((easting, northing)) = header.coordinates() {
        println!("  Position:  E {} / N {}", easting, northing);
    }
    if let Some(elevation) = header.elevation {
        println!("  Elevation: {}", elevation);
    }
    println!("  Columns:   {}", record.schema().columns().join(", "));
    println!(
        "  Rows:      {}",
        record.measurements().len().to_string().bright_white().bold()
    );
}

fn print_totals(stats: &RunStats) {
    println!("\n{}", "Summary".bright_green().bold());
    println!(
        "  Files parsed: {}",
        stats.files_parsed.to_string().bright_white().bold()
    );
    if stats.has_failures() {
        println!(
            "  Files failed: {}",
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!("  Rows:         {}", stats.rows.to_string().bright_white().bold());
}

/// Set up logging based on verbosity flags
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gef_reader={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
