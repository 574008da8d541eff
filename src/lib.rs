//! Tag-data CSV converter library
//!
//! Converts line-oriented, tag-delimited text files into CSV. Input files
//! hold `<hdata>` header blocks and `<rdata>` row blocks, one tag per line:
//!
//! ```text
//! <hdata>
//! <h1>LAB-01</h1>
//! <rdata>
//! <r1>glucose</r1>
//! </rdata>
//! </hdata>
//! ```
//!
//! Each closed row block becomes one CSV line with the current header
//! values followed by the row values, one quoted column per declared field.
//!
//! This library provides tools for:
//! - Extracting tag names and contents from single lines
//! - Tracking row blocks and assembling records in a streaming pass
//! - Discovering input files and managing the output CSV lifecycle
//! - Layered configuration of field sets, patterns and output naming

pub mod assembler;
pub mod block;
pub mod config;
pub mod constants;
pub mod error;
pub mod fields;
pub mod models;
pub mod processor;
pub mod tag;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use assembler::{LineOutcome, RecordAssembler, RecordSink};
pub use config::ConverterConfig;
pub use error::{ConvertError, Result};
pub use fields::{FieldSet, FieldStore};
pub use models::{FileStats, PlannedConversion, ProcessingStats};
pub use processor::BatchProcessor;
