//! Command-line argument definitions for the tag-data converter
//!
//! Every flag is optional: a bare invocation converts all `*.txt` and
//! `*.xml` files in the current directory with the built-in field sets.

use crate::error::{ConvertError, Result};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the tag-data to CSV converter
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tagdata-csv",
    version,
    about = "Convert tag-delimited hdata/rdata text files into CSV",
    long_about = "Scans a directory for *.txt and *.xml files made of <hdata> header blocks and \
                  <rdata> row blocks, and writes one CSV file per input. Each closed row block \
                  becomes one CSV line holding the current header values followed by the row \
                  values, one quoted column per declared field."
)]
pub struct Args {
    /// Directory scanned for input files
    #[arg(
        short = 'i',
        long = "input-dir",
        value_name = "PATH",
        help = "Directory scanned for *.txt and *.xml input files [default: .]"
    )]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the generated CSV files
    ///
    /// Created if it does not exist.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "PATH",
        help = "Directory for generated CSV files [default: .]"
    )]
    pub output_dir: Option<PathBuf>,

    /// Path to a YAML configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "YAML configuration file (field sets, patterns, suffix)"
    )]
    pub config_file: Option<PathBuf>,

    /// Header field names, replacing the configured list
    #[arg(
        long = "header-fields",
        value_name = "LIST",
        help = "Comma-separated header field names, in column order"
    )]
    pub header_fields: Option<FieldList>,

    /// Row field names, replacing the configured list
    #[arg(
        long = "row-fields",
        value_name = "LIST",
        help = "Comma-separated row field names, in column order"
    )]
    pub row_fields: Option<FieldList>,

    /// Suffix appended to the input file stem for the CSV name
    #[arg(
        long = "suffix",
        value_name = "TEXT",
        help = "Output file suffix, e.g. data.xml -> data_rs.csv [default: _rs]"
    )]
    pub suffix: Option<String>,

    /// List files that would be converted without writing anything
    #[arg(
        long = "dry-run",
        help = "Show what would be converted without creating output files"
    )]
    pub dry_run: bool,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Wrapper for parsing comma-separated field name lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList {
    pub names: Vec<String>,
}

impl FromStr for FieldList {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let names: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if names.is_empty() {
            return Err(ConvertError::configuration("Field list cannot be empty"));
        }

        Ok(FieldList { names })
    }
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_dir) = &self.input_dir {
            if !input_dir.is_dir() {
                return Err(ConvertError::configuration(format!(
                    "Input path is not a directory: {}",
                    input_dir.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(ConvertError::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
