//! Exit status of the `tagdata-csv` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tagdata-csv"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

#[test]
fn test_empty_directory_exits_zero() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_in(temp_dir.path(), &["-q"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_successful_conversion_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("a.txt"),
        "<h1>x</h1>\n<rdata>\n<r1>y</r1>\n</rdata>\n</hdata>\n",
    )
    .unwrap();

    let output = run_in(temp_dir.path(), &["-q"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(temp_dir.path().join("a_rs.csv").exists());
}

#[test]
fn test_unreadable_input_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bad.txt"), [b'<', b'h', b'1', b'>', 0xff, 0xfe, b'\n']).unwrap();
    fs::write(
        temp_dir.path().join("good.xml"),
        "<rdata>\n<r1>y</r1>\n</rdata>\n",
    )
    .unwrap();

    let output = run_in(temp_dir.path(), &["-q"]);

    assert_eq!(output.status.code(), Some(1));
    // The batch carried on past the bad file
    assert!(temp_dir.path().join("good_rs.csv").exists());
}

#[test]
fn test_invalid_configuration_exits_one() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_in(
        temp_dir.path(),
        &["-q", "--header-fields", "h1", "--row-fields", "h1"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}
