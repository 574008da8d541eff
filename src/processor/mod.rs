//! Batch conversion pipeline.
//!
//! Discovers input files, then converts them one at a time: each file gets a
//! fresh output CSV (title line first) and a fresh [`RecordAssembler`], and
//! is fully written before the next file is opened. In dry-run mode the
//! batch only lists each input with its output path and writes nothing.

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::FileDiscovery, writer::CsvWriter};

use crate::assembler::RecordAssembler;
use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::fields::FieldSet;
use crate::models::{FileStats, ProcessingStats};

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Converts tag-data files into CSV files
#[derive(Debug)]
pub struct BatchProcessor {
    config: ConverterConfig,
    fields: FieldSet,
    show_progress: bool,
}

impl BatchProcessor {
    /// Create a processor from a validated configuration
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        let fields = config.field_set();

        Ok(Self {
            config,
            fields,
            show_progress: false,
        })
    }

    /// Show a progress bar while converting
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Find the input files for this run
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        FileDiscovery::new(
            self.config.input_dir.clone(),
            self.config.input_patterns.clone(),
        )
        .discover_input_files()
    }

    /// Main processing entry point: discover and convert every input file
    pub fn process(&self) -> Result<ProcessingStats> {
        let files = self.discover()?;
        self.process_files(&files)
    }

    /// Convert the given files in order.
    ///
    /// Unreadable inputs and unwritable outputs are recorded as failures and
    /// the batch continues with the next file. A dry run only returns the
    /// planned conversions.
    pub fn process_files(&self, files: &[PathBuf]) -> Result<ProcessingStats> {
        let start_time = Instant::now();

        for (output, inputs) in self.output_collisions(files) {
            let names: Vec<String> = inputs.iter().map(|p| display_name(p)).collect();
            warn!(
                "{} all write to {}; each replaces the previous output",
                names.join(", "),
                output.display()
            );
        }

        if self.config.dry_run {
            let mut stats = self.plan(files);
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        let mut stats = ProcessingStats::default();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| ConvertError::output_write(&self.config.output_dir, e))?;

        let progress = self
            .show_progress
            .then(|| create_progress_bar(files.len() as u64, "Converting"));

        for input in files {
            if let Some(pb) = &progress {
                pb.set_message(display_name(input));
            }

            match self.convert_file(input) {
                Ok(file_stats) => stats.add_file(file_stats),
                Err(e) if e.is_per_file() => {
                    error!("Failed to convert {}: {}", input.display(), e);
                    stats.add_failure(input.clone(), e.to_string());
                }
                Err(e) => return Err(e),
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        stats.processing_time_ms = start_time.elapsed().as_millis();
        Ok(stats)
    }

    /// List each input with its output path without touching the filesystem
    fn plan(&self, files: &[PathBuf]) -> ProcessingStats {
        let mut stats = ProcessingStats {
            dry_run: true,
            ..Default::default()
        };
        for input in files {
            let output = self.config.output_path_for(input);
            debug!("Would convert {} -> {}", input.display(), output.display());
            stats.add_planned(input.clone(), output);
        }
        stats
    }

    /// Output paths that more than one input maps to, with those inputs in
    /// batch order
    pub fn output_collisions(&self, files: &[PathBuf]) -> Vec<(PathBuf, Vec<PathBuf>)> {
        let mut targets: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for input in files {
            let output = self.config.output_path_for(input);
            match index.get(&output) {
                Some(&i) => targets[i].1.push(input.clone()),
                None => {
                    index.insert(output.clone(), targets.len());
                    targets.push((output, vec![input.clone()]));
                }
            }
        }

        targets.retain(|(_, inputs)| inputs.len() > 1);
        targets
    }

    /// Convert a single input file into its output CSV
    pub fn convert_file(&self, input: &Path) -> Result<FileStats> {
        let output = self.config.output_path_for(input);
        info!("Converting {} -> {}", input.display(), output.display());

        // Open the input first so an unreadable file leaves the output alone
        let reader = File::open(input)
            .map(BufReader::new)
            .map_err(|e| ConvertError::file_read(input, e))?;

        let mut writer = CsvWriter::create(output.clone(), &self.fields.title_line())?;
        let mut assembler = RecordAssembler::new(&self.fields);
        let mut stats = FileStats::new(input.to_path_buf(), output);

        for line in reader.lines() {
            let line = line.map_err(|e| ConvertError::file_read(input, e))?;
            let outcome = assembler.process_line(&line, &mut writer)?;
            stats.record(outcome);
        }

        debug!(
            "Finished {}: {} lines read, {} lines written, {} records, {} skipped",
            input.display(),
            stats.lines_read,
            writer.lines_written(),
            stats.records_written,
            stats.lines_skipped
        );

        Ok(stats)
    }
}

/// File name of `path` for progress and summary output
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
