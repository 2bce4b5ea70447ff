//! # Rust Chain Logger
//!
//! A leveled logger whose configuration is built by method chaining at the
//! call site, without ever touching the shared root logger.
//!
//! ## Features
//!
//! - **Clone on first configure**: chaining on a root derives a private
//!   copy once; the rest of the chain configures that copy in place
//! - **Multiple Outputs**: dated files below a directory, stdout, or any
//!   `std::io::Write` sink
//! - **Never Fails Mid-Chain**: bad paths or level names are reported
//!   through a diagnostic callback and the previous value is kept
//! - **Async Output**: optional background worker with bounded queue
//!
//! ## Example
//!
//! ```
//! use rust_chain_logger::prelude::*;
//!
//! let trace = LogContext::new().with_field("trace_id", "7f3a");
//!
//! root()
//!     .level(LogLevel::Info)
//!     .ctx(Some(trace), &["trace_id"])
//!     .line()
//!     .with_stdout(false)
//!     .info("request accepted");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, WriterAppender};
    pub use crate::core::{
        root, shared_writer, Appender, ConfigError, DiagnosticCallback, FieldValue, LogContext,
        LogEntry, LogFlags, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, Result,
        SharedWriter, DEFAULT_FLUSH_TIMEOUT,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, WriterAppender};
pub use core::{
    root, shared_writer, Appender, ConfigError, DiagnosticCallback, Diagnostics, FieldValue,
    LogContext, LogEntry, LogFlags, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    Result, SharedWriter, DEFAULT_FILE_PATTERN, DEFAULT_FLUSH_TIMEOUT,
};
