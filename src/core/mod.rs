//! Core logger types and traits

pub mod appender;
pub mod chaining;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod flags;
pub mod format;
pub mod global;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod path;
pub mod stack;

pub use appender::Appender;
pub use config::{shared_writer, LoggerConfig, SharedWriter, DEFAULT_FILE_PATTERN};
pub use diagnostics::{DiagnosticCallback, Diagnostics};
pub use error::{ConfigError, LoggerError, Result};
pub use flags::LogFlags;
pub use global::root;
pub use log_context::{FieldValue, LogContext};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_FLUSH_TIMEOUT};
