//! File appender implementation

use crate::core::path::render_file_name;
use crate::core::{Appender, LogEntry, LoggerError, Result};
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Appends lines to a file inside a directory
///
/// The file name comes from a pattern such as `{Y-m-d}.log`, expanded with
/// each entry's timestamp, so a long-lived appender moves to a new file when
/// the date changes. The directory is created on first write. With the
/// `file` feature, every write holds an exclusive lock on the file so
/// processes sharing a log directory never interleave partial lines.
pub struct FileAppender {
    directory: PathBuf,
    pattern: String,
}

impl FileAppender {
    pub fn new(directory: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            pattern: pattern.into(),
        }
    }

    /// Full path of the file an entry with `timestamp` is written to
    pub fn file_path(&self, timestamp: &DateTime<Local>) -> PathBuf {
        self.directory
            .join(render_file_name(&self.pattern, timestamp))
    }

    fn open(&self, path: &PathBuf) -> Result<File> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                self.directory.display().to_string(),
                e,
            )
        })?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })
    }
}

#[cfg(feature = "file")]
fn write_locked(file: &File, bytes: &[u8]) -> std::io::Result<()> {
    use fs2::FileExt;

    FileExt::lock_exclusive(file)?;
    let mut handle = file;
    let result = handle.write_all(bytes);
    FileExt::unlock(file)?;
    result
}

#[cfg(not(feature = "file"))]
fn write_locked(file: &File, bytes: &[u8]) -> std::io::Result<()> {
    let mut handle = file;
    handle.write_all(bytes)
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry, line: &str) -> Result<()> {
        let path = self.file_path(&entry.timestamp);
        let file = self.open(&path)?;

        let mut output = String::with_capacity(line.len() + 1);
        output.push_str(line);
        output.push('\n');

        write_locked(&file, output.as_bytes()).map_err(|e| {
            LoggerError::io_operation("writing log file", path.display().to_string(), e)
        })
    }

    fn flush(&mut self) -> Result<()> {
        // Every append writes through an unbuffered handle
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
