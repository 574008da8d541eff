//! Input file discovery
//!
//! Finds the files to convert in a single directory (no recursion). Files
//! are grouped by pattern in the configured order and sorted by name within
//! each group, so `*.txt` files come before `*.xml` files by default.
//! Symlinks to regular files are inputs; dotfiles only match patterns that
//! start with a literal `.`.

use crate::error::{ConvertError, Result};
use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// File discovery component for tag-data input files
#[derive(Debug)]
pub struct FileDiscovery {
    input_dir: PathBuf,
    patterns: Vec<String>,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(input_dir: PathBuf, patterns: Vec<String>) -> Self {
        Self {
            input_dir,
            patterns,
        }
    }

    /// Discover all matching files
    ///
    /// Returns `ConvertError::NoInputFiles` when nothing matches; callers
    /// decide whether an empty batch is worth more than a warning.
    pub fn discover_input_files(&self) -> Result<Vec<PathBuf>> {
        let compiled = self
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ConvertError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Searching for input files in: {}", self.input_dir.display());
        let file_names = list_file_names(&self.input_dir)?;

        let mut files = Vec::new();
        let mut seen = HashSet::new();
        for pattern in &compiled {
            let mut matched: Vec<&String> = file_names
                .iter()
                .filter(|name| pattern.matches_with(name, MATCH_OPTIONS))
                .filter(|name| !seen.contains(*name))
                .collect();
            matched.sort();

            for name in matched {
                seen.insert(name.clone());
                files.push(self.input_dir.join(name));
            }
        }

        if files.is_empty() {
            return Err(ConvertError::NoInputFiles {
                dir: self.input_dir.clone(),
                patterns: self.patterns.clone(),
            });
        }

        debug!("Found {} input files", files.len());
        for file in &files {
            debug!("  Found: {}", file.display());
        }

        Ok(files)
    }
}

/// Names of the regular files directly inside `dir`, following symlinks
fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Broken links and links to directories are skipped with the rest
        if !entry.path().is_file() {
            continue;
        }
        // Names that are not valid UTF-8 cannot match a pattern
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
