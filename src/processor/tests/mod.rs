//! Integration tests for the processor module
//!
//! Tests the complete conversion pipeline against temporary input directories.

pub mod error_handling;
