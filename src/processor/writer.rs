//! CSV output file handling
//!
//! Each write opens the output in append mode, writes one complete line and
//! closes the handle again before returning, so a failed write never leaves
//! an open file behind.

use crate::assembler::RecordSink;
use crate::error::{ConvertError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only CSV writer for a single output file
#[derive(Debug)]
pub struct CsvWriter {
    output_path: PathBuf,
    lines_written: usize,
}

impl CsvWriter {
    /// Start a fresh output file: remove any previous output, then write the
    /// title line
    pub fn create(output_path: PathBuf, title_line: &str) -> Result<Self> {
        remove_existing(&output_path)?;

        let mut writer = Self {
            output_path,
            lines_written: 0,
        };
        writer.append_line(title_line)?;
        Ok(writer)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Lines written so far, including the title line
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Append one line terminated by `\n`
    pub fn append_line(&mut self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)
            .map_err(|e| ConvertError::output_write(&self.output_path, e))?;

        let mut buffer = String::with_capacity(line.len() + 1);
        buffer.push_str(line);
        buffer.push('\n');

        file.write_all(buffer.as_bytes())
            .map_err(|e| ConvertError::output_write(&self.output_path, e))?;

        self.lines_written += 1;
        Ok(())
    }
}

impl RecordSink for CsvWriter {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.append_line(line)
    }
}

/// Delete a previous output file so reruns overwrite instead of appending
fn remove_existing(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed previous output: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConvertError::output_write(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_title() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out_rs.csv");

        let writer = CsvWriter::create(path.clone(), "\"h1\",\"r1\"").unwrap();

        assert_eq!(writer.lines_written(), 1);
        assert_eq!(writer.output_path(), path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "\"h1\",\"r1\"\n");
    }

    #[test]
    fn test_create_replaces_previous_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out_rs.csv");
        fs::write(&path, "stale line\nanother\n").unwrap();

        let mut writer = CsvWriter::create(path.clone(), "\"h1\"").unwrap();
        writer.append_line("\"a\"").unwrap();
        writer.write_line("\"b\"").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "\"h1\"\n\"a\"\n\"b\"\n");
        assert_eq!(writer.lines_written(), 3);
    }

    #[test]
    fn test_missing_output_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out_rs.csv");

        match CsvWriter::create(path.clone(), "\"h1\"") {
            Err(ConvertError::OutputWrite { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected OutputWrite error, got {:?}", other),
        }
    }

    #[test]
    fn test_output_path_is_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("taken_rs.csv");
        fs::create_dir_all(&path).unwrap();

        let result = CsvWriter::create(path, "\"h1\"");
        assert!(matches!(result, Err(ConvertError::OutputWrite { .. })));
    }
}
