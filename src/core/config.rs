//! Logger configuration record
//!
//! Every option a chaining method can override lives in [`LoggerConfig`].
//! Cloning the record is what deriving a logger means, so all fields are
//! owned values; the output sink is the one deliberately shared part.

use super::{flags::LogFlags, log_context::LogContext, log_level::LogLevel};
use parking_lot::Mutex;
use serde::Deserialize;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Default file-name pattern: one file per day
pub const DEFAULT_FILE_PATTERN: &str = "{Y-m-d}.log";

/// Output sink shared between loggers writing to the same destination
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Wrap a writer so it can be handed to several loggers
pub fn shared_writer<W: Write + Send + 'static>(writer: W) -> SharedWriter {
    Arc::new(Mutex::new(Box::new(writer)))
}

/// Configuration record of a logger
///
/// Deserializable from JSON (or any serde format); `context` and `writer`
/// are runtime-only and never read from configuration files.
///
/// # Example
///
/// ```
/// use rust_chain_logger::{LogLevel, LoggerConfig};
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{ "path": "/var/log/app", "level": "prod", "stdout": false }"#,
/// ).unwrap();
///
/// assert_eq!(config.level, LogLevel::Warn);
/// assert!(!config.stdout_print);
/// assert_eq!(config.file, "{Y-m-d}.log");
/// ```
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Context value attached by `ctx`
    #[serde(skip)]
    pub context: Option<LogContext>,

    /// Keys extracted from the context when rendering
    pub ctx_keys: Vec<String>,

    /// Sink replacing file and stdout output when set
    #[serde(skip)]
    pub writer: Option<SharedWriter>,

    /// Output directory; empty disables file output
    pub path: String,

    /// File-name pattern inside `path`
    pub file: String,

    /// Minimum emit level
    pub level: LogLevel,

    pub flags: LogFlags,

    #[serde(rename = "stdout")]
    pub stdout_print: bool,

    #[serde(rename = "header")]
    pub header_print: bool,

    /// Append a stack trace to error-and-above lines
    pub stack_status: bool,

    /// Frames skipped at the top of a captured stack
    pub stack_skip: usize,

    /// Frames containing this text are left out of a captured stack
    pub stack_filter: String,

    #[serde(rename = "async")]
    pub async_print: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            context: None,
            ctx_keys: Vec::new(),
            writer: None,
            path: String::new(),
            file: DEFAULT_FILE_PATTERN.to_string(),
            level: LogLevel::Debug,
            flags: LogFlags::default(),
            stdout_print: true,
            header_print: true,
            stack_status: true,
            stack_skip: 0,
            stack_filter: String::new(),
            async_print: false,
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("context", &self.context)
            .field("ctx_keys", &self.ctx_keys)
            .field("writer", &self.writer.as_ref().map(|_| "<writer>"))
            .field("path", &self.path)
            .field("file", &self.file)
            .field("level", &self.level)
            .field("flags", &self.flags)
            .field("stdout_print", &self.stdout_print)
            .field("header_print", &self.header_print)
            .field("stack_status", &self.stack_status)
            .field("stack_skip", &self.stack_skip)
            .field("stack_filter", &self.stack_filter)
            .field("async_print", &self.async_print)
            .finish()
    }
}
