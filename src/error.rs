//! Error handling for tag-data conversion operations.
//!
//! Malformed lines and unknown tags are never errors; only file discovery,
//! configuration and I/O failures surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No input files matching {patterns:?} found in: {dir}")]
    NoInputFiles { dir: PathBuf, patterns: Vec<String> },

    #[error("Failed to read input file: {path} - {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path} - {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to parse config file: {path} - {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConvertError {
    /// Create an input read error for a file
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create an output write error for a file
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error only affects the file being converted.
    ///
    /// Per-file failures are reported and the batch moves on to the next file.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::FileRead { .. } | Self::OutputWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_per_file_classification() {
        let read = ConvertError::file_read("a.txt", io::Error::from(io::ErrorKind::NotFound));
        let write = ConvertError::output_write(
            "a_rs.csv",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        let config = ConvertError::configuration("bad field");

        assert!(read.is_per_file());
        assert!(write.is_per_file());
        assert!(!config.is_per_file());
    }

    #[test]
    fn test_error_messages_include_path() {
        let err = ConvertError::file_read("input.xml", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("input.xml"));

        let err = ConvertError::NoInputFiles {
            dir: PathBuf::from("data"),
            patterns: vec!["*.txt".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("data"));
        assert!(message.contains("*.txt"));
    }
}
