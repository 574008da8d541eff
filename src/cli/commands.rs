//! Command implementation for the tag-data converter CLI
//!
//! Sets up logging, layers the configuration, runs the batch and reports a
//! summary to the user.

use crate::cli::args::Args;
use crate::config::ConverterConfig;
use crate::constants::LOG_TARGET;
use crate::error::{ConvertError, Result};
use crate::models::ProcessingStats;
use crate::processor::{BatchProcessor, display_name};
use colored::*;
use tracing::{debug, info, warn};

/// Main command runner
///
/// 1. Set up logging and configuration
/// 2. Discover input files
/// 3. Convert them one by one, or list them in dry-run mode
/// 4. Print summary statistics
pub fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args);

    info!("Starting tag-data conversion");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let processor = BatchProcessor::new(config)?.with_progress(args.show_progress());

    let files = match processor.discover() {
        Ok(files) => files,
        Err(ConvertError::NoInputFiles { dir, patterns }) => {
            warn!(
                "No input files matching {:?} found in {}",
                patterns,
                dir.display()
            );
            if !args.quiet {
                println!(
                    "{} no files matching {} in {}",
                    "Nothing to convert:".bright_yellow(),
                    patterns.join(", "),
                    dir.display()
                );
            }
            return Ok(ProcessingStats::default());
        }
        Err(e) => return Err(e),
    };

    info!("Found {} input files", files.len());

    let stats = processor.process_files(&files)?;

    if stats.dry_run {
        print_dry_run(processor.config(), &stats);
    } else if !args.quiet {
        print_summary(&stats);
    }

    Ok(stats)
}

/// Set up tracing on stderr; `RUST_LOG` takes precedence over `-v`/`-q`
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    // try_init: a subscriber may already be installed by an embedding caller
    let installed = if args.quiet {
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
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Layer defaults, the optional config file and CLI overrides
pub fn load_configuration(args: &Args) -> Result<ConverterConfig> {
    let mut config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            ConverterConfig::from_yaml_file(path)?
        }
        None => {
            debug!("No config file given, using defaults");
            ConverterConfig::default()
        }
    };

    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply explicitly given CLI arguments on top of the loaded configuration
pub fn apply_cli_overrides(config: &mut ConverterConfig, args: &Args) {
    if let Some(input_dir) = &args.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(header_fields) = &args.header_fields {
        config.header_fields = header_fields.names.clone();
    }
    if let Some(row_fields) = &args.row_fields {
        config.row_fields = row_fields.names.clone();
    }
    if let Some(suffix) = &args.suffix {
        config.output_suffix = suffix.clone();
    }
    if args.dry_run {
        config.dry_run = true;
    }
}

fn print_dry_run(config: &ConverterConfig, stats: &ProcessingStats) {
    println!("{}", "Dry run - no files will be written".bright_yellow().bold());
    println!(
        "  {} {} header + {} row columns",
        "Layout:".bright_cyan(),
        config.header_fields.len(),
        config.row_fields.len()
    );
    for planned in &stats.planned {
        println!(
            "  {} -> {}",
            planned.input_path.display(),
            planned.output_path.display()
        );
    }
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Conversion summary".bright_green().bold());
    for file in &stats.files {
        println!(
            "  {} {} ({} records)",
            display_name(&file.input_path).bright_white(),
            format!("-> {}", file.output_path.display()).bright_cyan(),
            file.records_written
        );
    }
    for failure in &stats.failures {
        println!(
            "  {} {}: {}",
            "FAILED".bright_red().bold(),
            failure.input_path.display(),
            failure.reason
        );
    }
    println!(
        "  {} {} files, {} records in {} ms",
        "Converted".bright_green(),
        stats.files_processed.to_string().bright_white().bold(),
        stats.total_records.to_string().bright_white().bold(),
        stats.processing_time_ms
    );
    if stats.has_failures() {
        println!(
            "  {} {} files",
            "Failed".bright_red(),
            stats.files_failed.to_string().bright_white().bold()
        );
    }
}
