//! Application constants for the tag-data converter
//!
//! Block markers, the default field sets and file naming conventions.

// =============================================================================
// Block Markers
// =============================================================================

/// Opens a row block; each row block becomes one CSV data line
pub const ROW_BLOCK_OPEN: &str = "<rdata>";

/// Closes a row block and triggers emission of a record
pub const ROW_BLOCK_CLOSE: &str = "</rdata>";

/// Closes a header block and clears the header values
pub const HEADER_BLOCK_CLOSE: &str = "</hdata>";

/// Tag names reserved for block markers, never usable as field names
pub const RESERVED_TAG_NAMES: &[&str] = &["hdata", "rdata"];

// =============================================================================
// Default Field Sets
// =============================================================================

/// Header fields in CSV column order
pub const DEFAULT_HEADER_FIELDS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "h7", "h8", "h9", "h10", "h11", "h12", "h13", "h14",
    "h15", "h19", "h20", "h22",
];

/// Row fields in CSV column order, following all header fields
pub const DEFAULT_ROW_FIELDS: &[&str] = &[
    "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r10", "r12",
];

// =============================================================================
// File Naming
// =============================================================================

/// Input file patterns, scanned in this order
pub const DEFAULT_INPUT_PATTERNS: &[&str] = &["*.txt", "*.xml"];

/// Suffix appended to the input file stem to name the output file
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_rs";

/// Output file extension
pub const OUTPUT_EXTENSION: &str = "csv";

/// Column separator in generated CSV lines
pub const CSV_SEPARATOR: &str = ",";

/// Logging target used when building the default tracing filter
pub const LOG_TARGET: &str = "tagdata_csv";
