//! Processing statistics for single files and whole batches.

use crate::assembler::LineOutcome;
use std::path::PathBuf;

/// Outcome of converting one input file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub lines_read: usize,
    pub records_written: usize,
    pub header_blocks_closed: usize,
    pub tags_stored: usize,
    pub lines_skipped: usize,
}

impl FileStats {
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            input_path,
            output_path,
            ..Default::default()
        }
    }

    /// Count one processed line
    pub fn record(&mut self, outcome: LineOutcome) {
        self.lines_read += 1;
        match outcome {
            LineOutcome::RecordEmitted => self.records_written += 1,
            LineOutcome::HeaderReset => self.header_blocks_closed += 1,
            LineOutcome::HeaderFieldSet | LineOutcome::RowFieldSet => self.tags_stored += 1,
            LineOutcome::Skipped => self.lines_skipped += 1,
        }
    }
}

/// A file that could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub input_path: PathBuf,
    pub reason: String,
}

/// An input and the output it would be converted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedConversion {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Processing statistics for a batch run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_records: usize,
    pub files: Vec<FileStats>,
    pub failures: Vec<FileFailure>,
    /// Set when the run only listed its conversions
    pub dry_run: bool,
    pub planned: Vec<PlannedConversion>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    pub fn add_planned(&mut self, input_path: PathBuf, output_path: PathBuf) {
        self.planned.push(PlannedConversion {
            input_path,
            output_path,
        });
    }

    pub fn add_file(&mut self, stats: FileStats) {
        self.files_processed += 1;
        self.total_records += stats.records_written;
        self.files.push(stats);
    }

    pub fn add_failure(&mut self, input_path: PathBuf, reason: impl Into<String>) {
        self.files_failed += 1;
        self.failures.push(FileFailure {
            input_path,
            reason: reason.into(),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stats_counts_outcomes() {
        let mut stats = FileStats::new("a.txt".into(), "a_rs.csv".into());
        for outcome in [
            LineOutcome::Skipped,
            LineOutcome::HeaderFieldSet,
            LineOutcome::Skipped,
            LineOutcome::RowFieldSet,
            LineOutcome::RecordEmitted,
            LineOutcome::HeaderReset,
        ] {
            stats.record(outcome);
        }

        assert_eq!(stats.lines_read, 6);
        assert_eq!(stats.records_written, 1);
        assert_eq!(stats.header_blocks_closed, 1);
        assert_eq!(stats.tags_stored, 2);
        assert_eq!(stats.lines_skipped, 2);
    }

    #[test]
    fn test_processing_stats_totals() {
        let mut stats = ProcessingStats::default();
        assert!(!stats.has_failures());

        let mut file = FileStats::new("a.txt".into(), "a_rs.csv".into());
        file.records_written = 3;
        stats.add_file(file);
        stats.add_failure("b.xml".into(), "unreadable");

        assert_eq!(stats.files_processed, 1);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.total_records, 3);
        assert!(stats.has_failures());
        assert_eq!(stats.failures[0].input_path, PathBuf::from("b.xml"));
    }

    #[test]
    fn test_planned_conversions_are_not_counted() {
        let mut stats = ProcessingStats {
            dry_run: true,
            ..Default::default()
        };
        stats.add_planned("a.txt".into(), "a_rs.csv".into());

        assert_eq!(stats.files_processed, 0);
        assert_eq!(stats.total_records, 0);
        assert!(!stats.has_failures());
        assert_eq!(stats.planned[0].output_path, PathBuf::from("a_rs.csv"));
    }
}
