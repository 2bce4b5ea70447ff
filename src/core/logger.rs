//! Main logger implementation

use super::{
    config::{shared_writer, LoggerConfig, SharedWriter},
    diagnostics::{DiagnosticCallback, Diagnostics},
    dispatch::{self, Record},
    error::{ConfigError, Result},
    flags::LogFlags,
    format,
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    path, stack,
};
use parking_lot::RwLock;
use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

/// Default time `flush()` waits for the async worker (5 seconds)
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// A logger: a configuration record plus the emission API
///
/// Loggers are handled through `Arc<Logger>`. A logger without a parent is a
/// *root*: the chaining methods (`level`, `path`, `stdout`, ...) never
/// modify it and derive a configured copy instead. A *derived* logger has
/// its parent set and is modified in place by further chaining.
///
/// The `set_*` accessors always modify the logger they are called on, root
/// or not; they are meant for setting a root up before it is shared.
///
/// # Example
///
/// ```
/// use rust_chain_logger::prelude::*;
/// use std::sync::Arc;
///
/// let root = Arc::new(Logger::new());
/// let audit = root.level(LogLevel::Notice).header().with_stdout(false);
///
/// assert!(audit.is_derived());
/// assert_eq!(audit.min_level(), LogLevel::Notice);
/// assert_eq!(root.min_level(), LogLevel::Debug);
/// ```
pub struct Logger {
    parent: Option<Arc<Logger>>,
    config: RwLock<LoggerConfig>,
    diagnostics: Diagnostics,
}

impl Logger {
    /// Create a root logger with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(None, LoggerConfig::default(), Diagnostics::default())
    }

    /// Create a root logger from a configuration record
    ///
    /// A non-empty `path` must be usable as a directory.
    pub fn with_config(mut config: LoggerConfig) -> std::result::Result<Self, ConfigError> {
        if !config.path.is_empty() {
            path::validate_dir(&config.path)?;
            config.path = path::normalize(&config.path);
        }
        Ok(Self::from_parts(None, config, Diagnostics::default()))
    }

    fn from_parts(
        parent: Option<Arc<Logger>>,
        config: LoggerConfig,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            parent,
            config: RwLock::new(config),
            diagnostics,
        }
    }

    /// Create a builder for a root Logger
    ///
    /// # Example
    /// ```
    /// use rust_chain_logger::prelude::*;
    ///
    /// let root = Logger::builder()
    ///     .min_level(LogLevel::Info)
    ///     .stdout(false)
    ///     .build();
    /// assert!(!root.is_derived());
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive an independent copy whose parent is this logger
    ///
    /// The configuration record is copied by value; the output sink and the
    /// diagnostic callback are shared, the last configuration error is not.
    pub fn derive(self: &Arc<Self>) -> Arc<Logger> {
        let config = self.config.read().clone();
        Arc::new(Self::from_parts(
            Some(Arc::clone(self)),
            config,
            self.diagnostics.fork(),
        ))
    }

    pub fn parent(&self) -> Option<&Arc<Logger>> {
        self.parent.as_ref()
    }

    /// Whether this logger was produced by deriving from another one
    pub fn is_derived(&self) -> bool {
        self.parent.is_some()
    }

    /// Snapshot of the whole configuration record
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    /// Replace the configuration record
    pub fn set_config(&self, mut config: LoggerConfig) -> std::result::Result<(), ConfigError> {
        if !config.path.is_empty() {
            path::validate_dir(&config.path)?;
            config.path = path::normalize(&config.path);
        }
        *self.config.write() = config;
        Ok(())
    }

    /// Replace the configuration from a JSON document
    ///
    /// Runtime-only fields (context and writer) are kept.
    pub fn set_config_json(&self, json: &str) -> Result<()> {
        let mut config: LoggerConfig = serde_json::from_str(json)?;
        {
            let current = self.config.read();
            config.context = current.context.clone();
            config.writer = current.writer.clone();
        }
        self.set_config(config)?;
        Ok(())
    }

    pub fn context(&self) -> Option<LogContext> {
        self.config.read().context.clone()
    }

    pub fn set_context(&self, context: Option<LogContext>) {
        self.config.write().context = context;
    }

    pub fn ctx_keys(&self) -> Vec<String> {
        self.config.read().ctx_keys.clone()
    }

    pub fn set_ctx_keys<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.write().ctx_keys = keys.into_iter().map(Into::into).collect();
    }

    pub fn writer(&self) -> Option<SharedWriter> {
        self.config.read().writer.clone()
    }

    pub fn set_writer(&self, writer: Option<SharedWriter>) {
        self.config.write().writer = writer;
    }

    pub fn output_path(&self) -> String {
        self.config.read().path.clone()
    }

    /// Set the output directory
    ///
    /// The directory is created on first write; a path naming an existing
    /// non-directory is rejected and the previous path kept.
    pub fn set_path(&self, dir: &str) -> std::result::Result<(), ConfigError> {
        path::validate_dir(dir)?;
        self.config.write().path = path::normalize(dir);
        Ok(())
    }

    pub fn file_pattern(&self) -> String {
        self.config.read().file.clone()
    }

    pub fn set_file(&self, pattern: &str) {
        self.config.write().file = pattern.to_string();
    }

    pub fn min_level(&self) -> LogLevel {
        self.config.read().level
    }

    pub fn set_min_level(&self, level: LogLevel) {
        self.config.write().level = level;
    }

    /// Set the minimum level by name, eg: "info", "prod", "ERRO"
    pub fn set_level_str(&self, name: &str) -> std::result::Result<(), ConfigError> {
        let level = name.parse::<LogLevel>()?;
        self.set_min_level(level);
        Ok(())
    }

    pub fn flags(&self) -> LogFlags {
        self.config.read().flags
    }

    pub fn set_flags(&self, flags: LogFlags) {
        self.config.write().flags = flags;
    }

    pub fn stdout_print(&self) -> bool {
        self.config.read().stdout_print
    }

    pub fn set_stdout_print(&self, enabled: bool) {
        self.config.write().stdout_print = enabled;
    }

    pub fn header_print(&self) -> bool {
        self.config.read().header_print
    }

    pub fn set_header_print(&self, enabled: bool) {
        self.config.write().header_print = enabled;
    }

    pub fn stack_status(&self) -> bool {
        self.config.read().stack_status
    }

    pub fn set_stack(&self, enabled: bool) {
        self.config.write().stack_status = enabled;
    }

    pub fn stack_skip(&self) -> usize {
        self.config.read().stack_skip
    }

    pub fn set_stack_skip(&self, skip: usize) {
        self.config.write().stack_skip = skip;
    }

    pub fn stack_filter(&self) -> String {
        self.config.read().stack_filter.clone()
    }

    pub fn set_stack_filter(&self, filter: &str) {
        self.config.write().stack_filter = filter.to_string();
    }

    pub fn is_async(&self) -> bool {
        self.config.read().async_print
    }

    pub fn set_async(&self, enabled: bool) {
        self.config.write().async_print = enabled;
    }

    /// Last configuration error swallowed by a chaining call on this logger
    pub fn last_config_error(&self) -> Option<ConfigError> {
        self.diagnostics.last_error()
    }

    pub(crate) fn update(&self, apply: impl FnOnce(&mut LoggerConfig)) {
        apply(&mut *self.config.write());
    }

    /// Hand a recovered configuration error to the diagnostic channel
    pub(crate) fn report(&self, error: ConfigError) {
        self.diagnostics.report(error);
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit(Some(level), &message.into(), Location::caller());
    }

    /// Write a line without level tag, regardless of the minimum level
    #[track_caller]
    pub fn print(&self, message: impl Into<String>) {
        self.emit(None, &message.into(), Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn notice(&self, message: impl Into<String>) {
        self.log(LogLevel::Notice, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    fn emit(&self, level: Option<LogLevel>, message: &str, location: &'static Location<'static>) {
        let config = self.config.read();
        if let Some(level) = level {
            if level < config.level {
                return;
            }
        }

        let appenders = dispatch::appenders_for(&config);
        if appenders.is_empty() {
            return;
        }

        let context = config
            .context
            .as_ref()
            .and_then(|context| context.render(&config.ctx_keys));
        let stack = match level {
            Some(level) if config.stack_status && level.wants_stack() => {
                Some(stack::capture(config.stack_skip, &config.stack_filter))
            }
            _ => None,
        };

        let entry = LogEntry::new(level, message)
            .with_location(location)
            .with_context(context)
            .with_stack(stack);
        let line = format::render(&entry, config.flags, config.header_print);
        let async_mode = config.async_print;
        drop(config);

        dispatch::dispatch(Record::new(appenders, entry, line), async_mode);
    }

    /// Render the current call stack with this logger's skip and filter
    pub fn stack_trace(&self) -> String {
        let (skip, filter) = {
            let config = self.config.read();
            (config.stack_skip, config.stack_filter.clone())
        };
        stack::capture(skip, &filter)
    }

    /// Wait for queued async lines and flush the configured writer
    pub fn flush(&self) -> Result<()> {
        dispatch::flush_async(DEFAULT_FLUSH_TIMEOUT)?;
        if let Some(writer) = self.writer() {
            writer.lock().flush()?;
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("derived", &self.is_derived())
            .field("config", &*self.config.read())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

/// Builder for a root Logger with a fluent API
///
/// Building never fails: an unusable path is reported through the
/// diagnostic channel (the callback, if one was given) and left unset.
///
/// # Example
/// ```
/// use rust_chain_logger::prelude::*;
/// use std::sync::Arc;
///
/// let root = Logger::builder()
///     .min_level(LogLevel::Info)
///     .file("app-{Y-m-d}.log")
///     .ctx_keys(["trace_id"])
///     .on_diagnostic(Arc::new(|err: &ConfigError| {
///         eprintln!("logger configuration problem: {}", err);
///     }))
///     .build();
/// assert_eq!(root.file_pattern(), "app-{Y-m-d}.log");
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    on_diagnostic: Option<DiagnosticCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            on_diagnostic: None,
        }
    }

    /// Start from an existing configuration record
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Set the output directory
    #[must_use = "builder methods return a new value"]
    pub fn path(mut self, dir: impl Into<String>) -> Self {
        self.config.path = dir.into();
        self
    }

    /// Set the file-name pattern
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, pattern: impl Into<String>) -> Self {
        self.config.file = pattern.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: LogFlags) -> Self {
        self.config.flags = flags;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn ctx_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.ctx_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdout(mut self, enabled: bool) -> Self {
        self.config.stdout_print = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn header(mut self, enabled: bool) -> Self {
        self.config.header_print = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stack(mut self, enabled: bool) -> Self {
        self.config.stack_status = enabled;
        self
    }

    /// Enable or disable async output
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, enabled: bool) -> Self {
        self.config.async_print = enabled;
        self
    }

    /// Send output to `writer` instead of file and stdout
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.config.writer = Some(shared_writer(writer));
        self
    }

    /// Set a callback for swallowed configuration errors
    ///
    /// The callback is shared with every logger derived from the root.
    /// Without one, such errors are written to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn on_diagnostic(mut self, callback: DiagnosticCallback) -> Self {
        self.on_diagnostic = Some(callback);
        self
    }

    /// Build the root Logger
    pub fn build(self) -> Arc<Logger> {
        let mut config = self.config;
        let diagnostics = Diagnostics::new(self.on_diagnostic);

        if !config.path.is_empty() {
            match path::validate_dir(&config.path) {
                Ok(()) => config.path = path::normalize(&config.path),
                Err(e) => {
                    diagnostics.report(e);
                    config.path.clear();
                }
            }
        }

        Arc::new(Logger::from_parts(None, config, diagnostics))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

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

    fn buffered() -> (Arc<Logger>, Buffer) {
        let buffer = Buffer::default();
        let logger = Logger::builder().writer(buffer.clone()).build();
        (logger, buffer)
    }

    #[test]
    fn test_builder_basic() {
        let logger = Logger::builder().min_level(LogLevel::Warn).build();
        assert_eq!(logger.min_level(), LogLevel::Warn);
        assert!(!logger.is_derived());
        assert!(logger.parent().is_none());
    }

    #[test]
    fn test_builder_reports_invalid_path() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let reported = Arc::new(AtomicUsize::new(0));
        let reported_clone = Arc::clone(&reported);
        let logger = Logger::builder()
            .path("bad\0dir")
            .on_diagnostic(Arc::new(move |_: &ConfigError| {
                reported_clone.fetch_add(1, Ordering::Relaxed);
            }))
            .build();

        assert_eq!(logger.output_path(), "");
        assert_eq!(reported.load(Ordering::Relaxed), 1);
        assert!(matches!(
            logger.last_config_error(),
            Some(ConfigError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_with_config_validates_path() {
        let config = LoggerConfig {
            path: "bad\0dir".to_string(),
            ..LoggerConfig::default()
        };
        assert!(Logger::with_config(config).is_err());

        let config = LoggerConfig {
            path: "/var/log/app/".to_string(),
            ..LoggerConfig::default()
        };
        let logger = Logger::with_config(config).unwrap();
        assert_eq!(logger.output_path(), "/var/log/app");
    }

    #[test]
    fn test_set_level_str() {
        let logger = Logger::new();
        logger.set_level_str("warning").unwrap();
        assert_eq!(logger.min_level(), LogLevel::Warn);

        assert_eq!(
            logger.set_level_str("chatty"),
            Err(ConfigError::invalid_level("chatty"))
        );
        assert_eq!(logger.min_level(), LogLevel::Warn);
    }

    #[test]
    fn test_set_config_json_keeps_writer() {
        let (logger, buffer) = buffered();
        logger
            .set_config_json(r#"{ "level": "error", "header": false, "stack_status": false }"#)
            .unwrap();

        assert_eq!(logger.min_level(), LogLevel::Error);
        logger.warn("dropped");
        logger.error("kept");
        assert_eq!(buffer.contents(), "kept\n");

        assert!(logger.set_config_json("{ not json").is_err());
    }

    #[test]
    fn test_level_filtering() {
        let (logger, buffer) = buffered();
        logger.set_min_level(LogLevel::Notice);
        logger.set_header_print(false);

        logger.debug("debug line");
        logger.info("info line");
        logger.notice("notice line");
        logger.warn("warn line");
        logger.print("print line");

        assert_eq!(buffer.contents(), "notice line\nwarn line\nprint line\n");
    }

    #[test]
    fn test_caller_location_is_call_site() {
        let (logger, buffer) = buffered();
        logger.set_header_print(false);
        logger.set_flags(LogFlags::empty().with_line(false));

        let line = line!() + 1;
        logger.info("located");

        assert_eq!(buffer.contents(), format!("logger.rs:{}: located\n", line));
    }

    #[test]
    fn test_stack_only_for_error_levels() {
        let (logger, buffer) = buffered();
        logger.set_header_print(false);

        logger.warn("no stack");
        logger.set_stack(false);
        logger.error("stack disabled");

        let contents = buffer.contents();
        assert!(!contents.contains("Stack:"));
        assert_eq!(contents, "no stack\nstack disabled\n");
    }

    #[test]
    fn test_flush_without_async() {
        let (logger, buffer) = buffered();
        logger.set_header_print(false);
        logger.info("flushed");
        assert!(logger.flush().is_ok());
        assert_eq!(buffer.contents(), "flushed\n");
    }

    #[test]
    fn test_derive_copies_config() {
        let root = Arc::new(Logger::new());
        root.set_ctx_keys(["trace_id"]);

        let derived = root.derive();
        derived.set_ctx_keys(["user"]);
        derived.set_min_level(LogLevel::Error);

        assert_eq!(root.ctx_keys(), vec!["trace_id".to_string()]);
        assert_eq!(root.min_level(), LogLevel::Debug);
        assert!(Arc::ptr_eq(derived.parent().unwrap(), &root));
    }
}
