//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// Destination for rendered log lines
///
/// `line` is the fully rendered text without trailing newline; `entry` is
/// available for destinations that need the level or timestamp.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
