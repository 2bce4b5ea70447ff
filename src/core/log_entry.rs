//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::panic::Location;

/// One log line before rendering
///
/// `level` is `None` for lines written through `print`, which bypass level
/// filtering and carry no level tag.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Option<LogLevel>,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
    pub context: Option<String>,
    pub stack: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a message can never forge additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Option<LogLevel>, message: &str) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message),
            timestamp: Local::now(),
            file: None,
            line: None,
            context: None,
            stack: None,
        }
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.file = Some(location.file());
        self.line = Some(location.line());
        self
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }
}
