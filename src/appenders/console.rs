//! Console appender implementation

use crate::core::{Appender, LogEntry, Result};
use std::io::Write;

/// Echoes log lines to stdout
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Color the `[LEVEL]` tag of a rendered line
    #[cfg(feature = "console")]
    fn decorate(&self, entry: &LogEntry, line: &str) -> String {
        use colored::Colorize;

        let Some(level) = entry.level else {
            return line.to_string();
        };
        if !self.use_colors {
            return line.to_string();
        }
        let tag = format!("[{}]", level);
        let colored_tag = tag.color(level.color_code()).to_string();
        line.replacen(&tag, &colored_tag, 1)
    }

    #[cfg(not(feature = "console"))]
    fn decorate(&self, _entry: &LogEntry, line: &str) -> String {
        line.to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry, line: &str) -> Result<()> {
        let output = self.decorate(entry, line);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", output)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
