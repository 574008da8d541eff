//! Field definitions and per-file field value stores.
//!
//! A [`FieldSet`] fixes the column layout of the CSV output: header field
//! names followed by row field names. A [`FieldStore`] holds the current
//! value of each declared field while a file is scanned. Its keys never
//! change; only values are overwritten or bulk-reset.

use crate::constants::{CSV_SEPARATOR, DEFAULT_HEADER_FIELDS, DEFAULT_ROW_FIELDS};

/// The two ordered, disjoint lists of field names known at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    header: Vec<String>,
    row: Vec<String>,
}

impl FieldSet {
    /// Create a field set from header and row names
    ///
    /// Names are not checked here; `ConverterConfig::validate` rejects
    /// duplicates and overlaps before a field set is built from user input.
    pub fn new(header: Vec<String>, row: Vec<String>) -> Self {
        Self { header, row }
    }

    pub fn header_fields(&self) -> &[String] {
        &self.header
    }

    pub fn row_fields(&self) -> &[String] {
        &self.row
    }

    /// Total number of CSV columns
    pub fn column_count(&self) -> usize {
        self.header.len() + self.row.len()
    }

    /// Fresh header store with every value empty
    pub fn header_store(&self) -> FieldStore {
        FieldStore::new(&self.header)
    }

    /// Fresh row store with every value empty
    pub fn row_store(&self) -> FieldStore {
        FieldStore::new(&self.row)
    }

    /// CSV title line: quoted field names, header fields first
    pub fn title_line(&self) -> String {
        self.header
            .iter()
            .chain(self.row.iter())
            .map(|name| quote(name))
            .collect::<Vec<_>>()
            .join(CSV_SEPARATOR)
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_HEADER_FIELDS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ROW_FIELDS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

/// Ordered mapping from declared field name to current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStore {
    entries: Vec<(String, String)>,
}

impl FieldStore {
    /// Create a store holding `names` in order, all values empty
    pub fn new(names: &[String]) -> Self {
        Self {
            entries: names
                .iter()
                .map(|name| (name.clone(), String::new()))
                .collect(),
        }
    }

    /// Set every value back to the empty string
    pub fn reset(&mut self) {
        for (_, value) in &mut self.entries {
            value.clear();
        }
    }

    /// Overwrite the value of `name` if it is a declared field.
    ///
    /// Returns `false` and leaves the store untouched for unknown names.
    pub fn set_if_known(&mut self, name: &str, value: &str) -> bool {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, current)) => {
                current.clear();
                current.push_str(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Field names in declared order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Current values in declared order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Each value wrapped in double quotes, in declared order.
    ///
    /// Embedded double quotes are written as-is, not doubled, so a value
    /// containing `"` produces a line that strict CSV readers will reject.
    pub fn serialize(&self) -> Vec<String> {
        self.values().map(quote).collect()
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}
