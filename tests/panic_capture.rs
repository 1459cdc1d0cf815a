//! Panic reports travel through the captured stderr once the process-wide
//! logger is published with `capture_panics`.

mod common;

use common::Terminal;
use laplace_logger::{initialize_with, LoggerConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_panic_report_is_logged() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let terminal = Terminal::new();
    let app = initialize_with(
        LoggerConfig::new("app").log_root(root.path()),
        terminal.streams(),
    )
    .expect("initialize");

    let result = std::thread::Builder::new()
        .name("worker".to_string())
        .spawn(|| panic!("boom-panic"))
        .expect("spawn")
        .join();
    assert!(result.is_err());

    let stderr = terminal.stderr.text();
    assert!(stderr.contains("thread 'worker' panicked"));
    assert!(stderr.contains("boom-panic"));
    assert!(!terminal.console.text().contains("boom-panic"));

    let file = fs::read_to_string(app.log_file()).expect("Failed to read log file");
    // The report is one record; its message may span several lines
    let header = "[INFO] [root] thread 'worker' panicked";
    assert_eq!(file.matches(header).count(), 1);
    assert_eq!(file.matches("boom-panic").count(), 1);
    let start = file.find(header).expect("panic record");
    assert!(file[start..].contains("boom-panic"));
}
