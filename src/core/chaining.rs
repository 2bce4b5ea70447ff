//! Chaining configuration methods
//!
//! Each method overrides one option and returns a logger ready for more
//! chaining or for emitting lines. Called on a root logger, a method first
//! derives a private copy and applies the change there, so the shared root
//! never changes. Called on a derived logger, it applies the change in place
//! and returns the same logger: a chain derives once, however long it is.
//!
//! ```
//! use rust_chain_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let root = Arc::new(Logger::new());
//!
//! let first = root.level(LogLevel::Warn);
//! let same = first.with_stdout(false);
//!
//! assert!(Arc::ptr_eq(&first, &same));
//! assert!(Arc::ptr_eq(same.parent().unwrap(), &root));
//! assert!(root.stdout_print());
//! ```
//!
//! Chaining never fails. A path that cannot be used or a level name that
//! does not resolve is reported through the logger's diagnostics and the
//! option keeps its previous value.

use super::{
    config::{shared_writer, SharedWriter},
    log_context::LogContext,
    log_level::LogLevel,
    logger::Logger,
    path,
};
use std::io::Write;
use std::sync::Arc;

impl Logger {
    /// Apply `change` to a derived copy of a root, or to this derived logger
    fn configure(self: &Arc<Self>, change: impl FnOnce(&Logger)) -> Arc<Logger> {
        let logger = if self.is_derived() {
            Arc::clone(self)
        } else {
            self.derive()
        };
        change(&logger);
        logger
    }

    /// Attach a context value for the following lines
    ///
    /// With `keys` non-empty, only the values of those keys are printed.
    /// A `None` context changes nothing and returns this very logger,
    /// without deriving.
    pub fn ctx(self: &Arc<Self>, context: Option<LogContext>, keys: &[&str]) -> Arc<Logger> {
        let Some(context) = context else {
            return Arc::clone(self);
        };
        self.configure(|logger| {
            logger.set_context(Some(context));
            if !keys.is_empty() {
                logger.set_ctx_keys(keys.iter().copied());
            }
        })
    }

    /// Redirect output to `writer`, replacing file and stdout output
    pub fn to<W: Write + Send + 'static>(self: &Arc<Self>, writer: W) -> Arc<Logger> {
        self.to_shared(shared_writer(writer))
    }

    /// Redirect output to a sink shared with other loggers
    pub fn to_shared(self: &Arc<Self>, writer: SharedWriter) -> Arc<Logger> {
        self.configure(|logger| logger.set_writer(Some(writer)))
    }

    /// Set the output directory
    ///
    /// Note that `dir` is a directory path, not a file path. An empty `dir`
    /// leaves the path unchanged (a root is still derived).
    pub fn path(self: &Arc<Self>, dir: &str) -> Arc<Logger> {
        self.configure(|logger| {
            if dir.is_empty() {
                return;
            }
            if let Err(e) = logger.set_path(dir) {
                logger.report(e);
            }
        })
    }

    /// Write into a category directory below the configured path
    ///
    /// `category` may be hierarchical, eg: "module/user". Without a
    /// configured path this is a no-op.
    pub fn cat(self: &Arc<Self>, category: &str) -> Arc<Logger> {
        self.configure(|logger| {
            let current = logger.output_path();
            if current.is_empty() {
                return;
            }
            if let Err(e) = logger.set_path(&path::join(&current, category)) {
                logger.report(e);
            }
        })
    }

    /// Set the file-name pattern, eg: "access-{Y-m-d}.log"
    pub fn file(self: &Arc<Self>, pattern: &str) -> Arc<Logger> {
        self.configure(|logger| logger.set_file(pattern))
    }

    /// Set the minimum emit level
    pub fn level(self: &Arc<Self>, level: LogLevel) -> Arc<Logger> {
        self.configure(|logger| logger.set_min_level(level))
    }

    /// Set the minimum emit level by name
    pub fn level_str(self: &Arc<Self>, name: &str) -> Arc<Logger> {
        self.configure(|logger| {
            if let Err(e) = logger.set_level_str(name) {
                logger.report(e);
            }
        })
    }

    /// Set how many stack frames to skip in stack traces
    pub fn skip(self: &Arc<Self>, skip: usize) -> Arc<Logger> {
        self.configure(|logger| logger.set_stack_skip(skip))
    }

    /// Enable or disable stack traces, optionally setting the skip count
    pub fn stack(self: &Arc<Self>, enabled: bool, skip: Option<usize>) -> Arc<Logger> {
        self.configure(|logger| {
            logger.set_stack(enabled);
            if let Some(skip) = skip {
                logger.set_stack_skip(skip);
            }
        })
    }

    /// Enable stack traces, leaving out frames that contain `filter`
    pub fn stack_with_filter(self: &Arc<Self>, filter: &str) -> Arc<Logger> {
        self.configure(|logger| {
            logger.set_stack(true);
            logger.set_stack_filter(filter);
        })
    }

    /// Enable stdout output
    pub fn stdout(self: &Arc<Self>) -> Arc<Logger> {
        self.with_stdout(true)
    }

    pub fn with_stdout(self: &Arc<Self>, enabled: bool) -> Arc<Logger> {
        self.configure(|logger| logger.set_stdout_print(enabled))
    }

    /// Enable the time and level header
    pub fn header(self: &Arc<Self>) -> Arc<Logger> {
        self.with_header(true)
    }

    pub fn with_header(self: &Arc<Self>, enabled: bool) -> Arc<Logger> {
        self.configure(|logger| logger.set_header_print(enabled))
    }

    /// Print the caller location in short form, eg: conn.rs:23
    pub fn line(self: &Arc<Self>) -> Arc<Logger> {
        self.with_line(false)
    }

    /// Print the caller location, in long form when `long` is true
    ///
    /// The long form is the file path as the compiler reports it, eg:
    /// src/net/conn.rs:23; the short form is the file name only.
    pub fn with_line(self: &Arc<Self>, long: bool) -> Arc<Logger> {
        self.configure(|logger| {
            logger.update(|config| config.flags = config.flags.with_line(long));
        })
    }

    /// Enable async output
    pub fn async_mode(self: &Arc<Self>) -> Arc<Logger> {
        self.with_async(true)
    }

    pub fn with_async(self: &Arc<Self>, enabled: bool) -> Arc<Logger> {
        self.configure(|logger| logger.set_async(enabled))
    }
}
