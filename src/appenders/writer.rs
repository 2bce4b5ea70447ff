//! Appender writing to a caller-supplied sink

use crate::core::{Appender, LogEntry, Result, SharedWriter};
use std::io::Write;

/// Writes lines to a [`SharedWriter`] set through `to` or `set_writer`
pub struct WriterAppender {
    writer: SharedWriter,
}

impl WriterAppender {
    pub fn new(writer: SharedWriter) -> Self {
        Self { writer }
    }
}

impl Appender for WriterAppender {
    fn append(&mut self, _entry: &LogEntry, line: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shared_writer;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_append() {
        let buffer = Buffer::default();
        let mut appender = WriterAppender::new(shared_writer(buffer.clone()));

        let entry = LogEntry::new(None, "line");
        appender.append(&entry, "line one").unwrap();
        appender.append(&entry, "line two").unwrap();
        appender.flush().unwrap();

        let written = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert_eq!(written, "line one\nline two\n");
    }
}
