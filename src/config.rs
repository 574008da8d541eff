//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! command-line overrides. The field sets are fixed once loaded and define
//! the CSV column layout for every file in the batch.

use crate::constants::{
    DEFAULT_HEADER_FIELDS, DEFAULT_INPUT_PATTERNS, DEFAULT_OUTPUT_SUFFIX, DEFAULT_ROW_FIELDS,
    RESERVED_TAG_NAMES,
};
use crate::error::{ConvertError, Result};
use crate::fields::FieldSet;
use crate::tag::is_tag_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for a conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Header field names in CSV column order
    pub header_fields: Vec<String>,

    /// Row field names in CSV column order, written after the header fields
    pub row_fields: Vec<String>,

    /// Glob patterns for input files, matched in order inside `input_dir`
    pub input_patterns: Vec<String>,

    /// Suffix appended to each input file stem to name its CSV
    pub output_suffix: String,

    /// Directory scanned for input files
    pub input_dir: PathBuf,

    /// Directory receiving the CSV files
    pub output_dir: PathBuf,

    /// List what would be converted without writing anything
    pub dry_run: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            header_fields: to_strings(DEFAULT_HEADER_FIELDS),
            row_fields: to_strings(DEFAULT_ROW_FIELDS),
            input_patterns: to_strings(DEFAULT_INPUT_PATTERNS),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

impl ConverterConfig {
    /// Load a configuration file, filling unspecified settings with defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents).map_err(|source| ConvertError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn from_yaml_str(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes to null rather than an empty mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Replace both field sets
    pub fn with_fields(mut self, header_fields: Vec<String>, row_fields: Vec<String>) -> Self {
        self.header_fields = header_fields;
        self.row_fields = row_fields;
        self
    }

    /// Set the output file suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// Set the directory scanned for input files
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Set the directory receiving CSV files
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Enable dry-run mode
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Column layout derived from the configured field names
    pub fn field_set(&self) -> FieldSet {
        FieldSet::new(self.header_fields.clone(), self.row_fields.clone())
    }

    /// Output CSV path for an input file: `<output_dir>/<stem><suffix>.csv`
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy();
        self.output_dir.join(format!(
            "{}{}.{}",
            stem,
            self.output_suffix,
            crate::constants::OUTPUT_EXTENSION
        ))
    }

    /// Check field sets, suffix and patterns before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.header_fields.is_empty() {
            return Err(ConvertError::configuration("header_fields must not be empty"));
        }
        if self.row_fields.is_empty() {
            return Err(ConvertError::configuration("row_fields must not be empty"));
        }

        let mut seen = HashSet::new();
        for name in self.header_fields.iter().chain(self.row_fields.iter()) {
            validate_field_name(name)?;
            if !seen.insert(name.as_str()) {
                return Err(ConvertError::configuration(format!(
                    "field '{}' is declared more than once",
                    name
                )));
            }
        }

        if self.output_suffix.is_empty() {
            return Err(ConvertError::configuration("output_suffix must not be empty"));
        }
        if self.output_suffix.contains(['/', '\\']) {
            return Err(ConvertError::configuration(format!(
                "output_suffix '{}' must not contain a path separator",
                self.output_suffix
            )));
        }

        if self.input_patterns.is_empty() {
            return Err(ConvertError::configuration("input_patterns must not be empty"));
        }
        for pattern in &self.input_patterns {
            glob::Pattern::new(pattern).map_err(|source| ConvertError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        Ok(())
    }
}

/// Field names must be usable as tag names: one or more word characters
fn validate_field_name(name: &str) -> Result<()> {
    if !is_tag_name(name) {
        return Err(ConvertError::configuration(format!(
            "invalid field name '{}': only word characters are allowed",
            name
        )));
    }
    if RESERVED_TAG_NAMES.contains(&name) {
        return Err(ConvertError::configuration(format!(
            "'{}' is a block marker and cannot be used as a field name",
            name
        )));
    }
    Ok(())
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
