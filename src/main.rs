use anyhow::Context;
use clap::Parser;
use std::process;
use tagdata_csv::ProcessingStats;
use tagdata_csv::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    let result = commands::run(args).context("Tag-data conversion failed");

    // Per-file failures were already reported by the command
    if let Err(error) = &result {
        eprintln!("Error: {:#}", error);
    }

    process::exit(exit_code(&result));
}

/// 0 for a clean run (including one with nothing to convert), 1 when the run
/// failed or any file could not be converted
fn exit_code(result: &anyhow::Result<ProcessingStats>) -> i32 {
    match result {
        Ok(stats) if stats.has_failures() => 1,
        Ok(_) => 0,
        Err(_) => 1,
    }
}
