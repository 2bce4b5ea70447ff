//! Plain-text rendering of log entries

use super::{flags::LogFlags, log_entry::LogEntry};
use std::fmt::Write;
use std::path::Path;

/// Render `entry` as one line (plus stack lines, if any), without trailing newline
///
/// Layout: `[time] [LEVEL] [file:line: ] [{context} ]message`, where the
/// time and level tag only appear with `header` on, and the location only
/// when a file flag is set.
pub fn render(entry: &LogEntry, flags: LogFlags, header: bool) -> String {
    let mut line = String::with_capacity(entry.message.len() + 64);

    if header {
        if let Some(pattern) = flags.time_pattern() {
            let _ = write!(line, "{} ", entry.timestamp.format(&pattern));
        }
        if let Some(level) = entry.level {
            let _ = write!(line, "[{}] ", level);
        }
    }

    if flags.prints_location() {
        if let (Some(file), Some(number)) = (entry.file, entry.line) {
            let file = if flags.contains(LogFlags::FILE_LONG) {
                file
            } else {
                basename(file)
            };
            let _ = write!(line, "{}:{}: ", file, number);
        }
    }

    if let Some(ref context) = entry.context {
        let _ = write!(line, "{{{}}} ", context);
    }

    line.push_str(&entry.message);

    if let Some(ref stack) = entry.stack {
        if !stack.is_empty() {
            line.push_str("\nStack:\n");
            line.push_str(stack);
        }
    }

    line
}

fn basename(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}
