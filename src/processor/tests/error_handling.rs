//! Error handling integration tests

use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::processor::BatchProcessor;
use std::fs;
use tempfile::TempDir;

const VALID_INPUT: &str = "<h1>a</h1>\n<rdata>\n<r1>b</r1>\n</rdata>\n</hdata>\n";

#[test]
fn test_invalid_config_is_rejected() {
    let config = ConverterConfig::default().with_fields(vec![], vec!["r1".to_string()]);

    match BatchProcessor::new(config) {
        Err(ConvertError::Configuration { message }) => {
            assert!(message.contains("header_fields"));
        }
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[test]
fn test_no_input_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConverterConfig::default().with_input_dir(temp_dir.path());

    let result = BatchProcessor::new(config).unwrap().process();

    assert!(matches!(result, Err(ConvertError::NoInputFiles { .. })));
}

#[test]
fn test_missing_input_file_leaves_output_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("gone_rs.csv"), "previous run\n").unwrap();

    let config = ConverterConfig::default()
        .with_input_dir(dir)
        .with_output_dir(dir);
    let processor = BatchProcessor::new(config).unwrap();

    let result = processor.convert_file(&dir.join("gone.txt"));

    match result {
        Err(ConvertError::FileRead { path, .. }) => assert_eq!(path, dir.join("gone.txt")),
        other => panic!("Expected FileRead error, got {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(dir.join("gone_rs.csv")).unwrap(),
        "previous run\n"
    );
}

#[test]
fn test_unreadable_file_does_not_stop_batch() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("good.txt"), VALID_INPUT).unwrap();
    // Invalid UTF-8 fails while reading lines
    fs::write(dir.join("binary.txt"), [0x3c, 0x68, 0x31, 0x3e, 0xff, 0xfe, 0x0a]).unwrap();

    let config = ConverterConfig::default()
        .with_input_dir(dir)
        .with_output_dir(dir);
    let processor = BatchProcessor::new(config).unwrap();
    let files = vec![dir.join("binary.txt"), dir.join("good.txt")];

    let stats = processor.process_files(&files).unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 1);
    assert!(stats.has_failures());
    assert_eq!(stats.failures[0].input_path, dir.join("binary.txt"));
    assert_eq!(stats.total_records, 1);
    assert!(dir.join("good_rs.csv").exists());
}

#[test]
fn test_unwritable_output_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("blocked.txt"), VALID_INPUT).unwrap();
    fs::write(dir.join("open.txt"), VALID_INPUT).unwrap();
    // A directory in place of the output file cannot be removed as a file
    fs::create_dir_all(dir.join("blocked_rs.csv").join("inner")).unwrap();

    let config = ConverterConfig::default()
        .with_input_dir(dir)
        .with_output_dir(dir);
    let stats = BatchProcessor::new(config).unwrap().process().unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.failures[0].input_path, dir.join("blocked.txt"));
    assert!(stats.failures[0].reason.contains("blocked_rs.csv"));
    assert!(dir.join("open_rs.csv").exists());
}

#[test]
fn test_malformed_lines_are_not_errors() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let contents = "<h1>ok</h1>\n<h1\n<>\n</h1>\n<zz>unknown</zz>\n<rdata>\n<r1>v</r2>\n</rdata>\n";
    fs::write(dir.join("messy.txt"), contents).unwrap();

    let config = ConverterConfig::default()
        .with_input_dir(dir)
        .with_output_dir(dir);
    let stats = BatchProcessor::new(config).unwrap().process().unwrap();

    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.total_records, 1);

    let output = fs::read_to_string(dir.join("messy_rs.csv")).unwrap();
    let record = output.lines().nth(1).unwrap();
    // r1 had no matching close tag, so it is written empty
    assert!(record.starts_with("\"ok\","));
    assert_eq!(record.matches("\"\"").count(), 27);
}
