//! Integration tests for logger output
//!
//! These tests verify:
//! - File output below path and category directories
//! - File-name patterns
//! - Writer redirection
//! - Level filtering and headers
//! - Caller locations
//! - Async output and flushing
//! - Log injection prevention

use parking_lot::Mutex;
use rust_chain_logger::prelude::*;
use rust_chain_logger::{critical, info, notice, DEFAULT_FILE_PATTERN};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn file_root(dir: &Path) -> Arc<Logger> {
    Logger::builder()
        .path(dir.to_str().unwrap())
        .stdout(false)
        .header(false)
        .stack(false)
        .build()
}

fn writer_root() -> (Arc<Logger>, Buffer) {
    let buffer = Buffer::default();
    let root = Logger::builder()
        .writer(buffer.clone())
        .header(false)
        .stack(false)
        .build();
    (root, buffer)
}

#[test]
fn test_file_output_in_category() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = file_root(temp_dir.path());

    let logger = root.cat("module/user").file("user.log");
    logger.info("created user");
    logger.warn("quota low");

    let file = temp_dir.path().join("module/user/user.log");
    let content = fs::read_to_string(&file).expect("Failed to read log file");
    assert_eq!(content, "created user\nquota low\n");

    // The root keeps writing to its own directory
    root.file("root.log").info("root line");
    let content =
        fs::read_to_string(temp_dir.path().join("root.log")).expect("Failed to read log file");
    assert_eq!(content, "root line\n");
}

#[test]
fn test_dated_file_pattern() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = file_root(temp_dir.path());

    root.cat("access").file("access-{Y-m-d}.log").info("hit");

    let names: Vec<String> = fs::read_dir(temp_dir.path().join("access"))
        .expect("Failed to list directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);

    let name = &names[0];
    assert!(name.starts_with("access-"));
    assert!(name.ends_with(".log"));
    // access-YYYY-MM-DD.log
    assert_eq!(name.len(), "access-".len() + 10 + ".log".len());
    assert!(!name.contains('{'));
}

#[test]
fn test_default_file_pattern() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = file_root(temp_dir.path());
    assert_eq!(root.file_pattern(), DEFAULT_FILE_PATTERN);

    root.info("default");

    let entries = fs::read_dir(temp_dir.path())
        .expect("Failed to list directory")
        .count();
    assert_eq!(entries, 1);
}

#[test]
fn test_writer_replaces_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = file_root(temp_dir.path());
    let buffer = Buffer::default();

    root.to(buffer.clone()).info("to writer");

    assert_eq!(buffer.contents(), "to writer\n");
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_shared_writer_across_loggers() {
    let buffer = Buffer::default();
    let sink = shared_writer(buffer.clone());
    let root = Logger::builder().header(false).stack(false).build();

    root.to_shared(sink.clone()).info("first");
    root.to_shared(sink).level(LogLevel::Error).info("filtered");

    assert_eq!(buffer.contents(), "first\n");
}

#[test]
fn test_level_filtering() {
    let (root, buffer) = writer_root();
    let logger = root.level(LogLevel::Warn);

    logger.debug("debug");
    logger.info("info");
    logger.notice("notice");
    logger.warn("warn");
    logger.error("error");
    logger.critical("critical");
    logger.print("printed");

    assert_eq!(buffer.contents(), "warn\nerror\ncritical\nprinted\n");
}

#[test]
fn test_level_by_name() {
    let (root, buffer) = writer_root();
    let logger = root.level_str("PROD");

    logger.info("hidden");
    logger.warn("shown");

    assert_eq!(buffer.contents(), "shown\n");
}

#[test]
fn test_header_format() {
    let (root, buffer) = writer_root();

    root.header().notice("with header");
    root.header().print("untagged");

    let contents = buffer.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);

    // 2025-01-08 10:30:45.123 [NOTICE] with header
    let (time, rest) = lines[0].split_at(23);
    assert_eq!(time.len(), 23);
    assert_eq!(&time[4..5], "-");
    assert_eq!(&time[19..20], ".");
    assert_eq!(rest, " [NOTICE] with header");

    assert!(lines[1].ends_with(" untagged"));
    assert!(!lines[1].contains('['));
}

#[test]
fn test_header_time_parts() {
    let (root, buffer) = writer_root();
    let logger = root.header();
    logger.set_flags(LogFlags::TIME_DATE);

    logger.info("date only");

    let contents = buffer.contents();
    // 2025-01-08 [INFO] date only
    assert_eq!(contents.len(), "2025-01-08 [INFO] date only\n".len());
    assert!(contents.ends_with(" [INFO] date only\n"));
}

#[test]
fn test_line_numbers() {
    let (root, buffer) = writer_root();

    let line = line!() + 1;
    root.line().info("short");
    root.with_line(true).info("long");

    let contents = buffer.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], format!("integration_tests.rs:{}: short", line));
    assert!(lines[1].ends_with(&format!("integration_tests.rs:{}: long", line + 1)));
    assert!(lines[1].contains("tests"));
}

#[test]
fn test_macros_through_chain() {
    let (root, buffer) = writer_root();

    info!(root.level(LogLevel::Info), "user {} logged in", 42);
    notice!(root.level(LogLevel::Error), "dropped {}", 1);
    critical!(root, "disk {} full", "/var");

    assert_eq!(buffer.contents(), "user 42 logged in\ndisk /var full\n");
}

#[test]
fn test_stack_on_error() {
    let (root, buffer) = writer_root();
    let logger = root.stack(true, None);

    logger.warn("no trace");
    logger.error("with trace");

    let contents = buffer.contents();
    assert!(contents.starts_with("no trace\nwith trace\nStack:\n1. "));
    assert!(contents.contains("integration_tests::test_stack_on_error"));
    assert!(!contents.contains("rust_chain_logger::core::"));
}

#[test]
fn test_stack_trace_includes_caller() {
    let logger = Logger::new();

    let trace = logger.stack_trace();
    let first = trace.lines().next().unwrap_or_default().to_string();
    assert!(first.starts_with("1. "));
    assert!(first.contains("test_stack_trace_includes_caller"));
    assert!(!trace.contains("rust_chain_logger::core::"));

    logger.set_stack_skip(1);
    let skipped = logger.stack_trace();
    assert_ne!(skipped.lines().next().unwrap_or_default(), first);

    logger.set_stack_skip(0);
    logger.set_stack_filter("test_stack_trace_includes_caller");
    let filtered = logger.stack_trace();
    assert!(!filtered.contains("test_stack_trace_includes_caller"));
}

#[test]
fn test_stack_filter() {
    let (root, buffer) = writer_root();

    root.stack_with_filter("integration_tests").error("filtered");

    let contents = buffer.contents();
    assert!(contents.starts_with("filtered"));
    assert!(!contents.contains("integration_tests::"));
}

#[test]
fn test_async_output_and_flush() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = file_root(temp_dir.path());
    let logger = root.file("async.log").async_mode();

    for i in 0..50 {
        logger.info(format!("Message {}", i));
    }
    logger.flush().expect("Failed to flush");

    let content =
        fs::read_to_string(temp_dir.path().join("async.log")).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 50);
    assert_eq!(lines[0], "Message 0");
    assert_eq!(lines[49], "Message 49");
}

#[test]
fn test_log_injection_prevention() {
    let (root, buffer) = writer_root();

    let malicious_message = "User login\nERROR [2024-10-17] Fake error injected\rINFO\tContinuation";
    root.info(malicious_message);

    let contents = buffer.contents();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("\\n"));
    assert!(contents.contains("\\r"));
    assert!(contents.contains("\\t"));
}

#[test]
fn test_config_from_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = Arc::new(Logger::new());
    let json = format!(
        r#"{{
            "path": "{}",
            "file": "json.log",
            "level": "notice",
            "stdout": false,
            "header": false,
            "stack_status": false
        }}"#,
        temp_dir.path().display()
    );
    root.set_config_json(&json).expect("Failed to apply config");

    root.info("dropped");
    root.cat("sub").notice("kept");

    let content =
        fs::read_to_string(temp_dir.path().join("sub/json.log")).expect("Failed to read log file");
    assert_eq!(content, "kept\n");
}

#[test]
fn test_global_root_is_never_mutated() {
    let before = format!("{:?}", root().config());

    let _ = root().level(LogLevel::Critical).with_stdout(false).line();

    assert_eq!(format!("{:?}", root().config()), before);
}
