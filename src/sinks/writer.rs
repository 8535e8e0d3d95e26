//! Sink over any `std::io::Write`

use crate::core::{Result, Sink};
use std::io::Write;

/// Adapts an arbitrary writer, such as a socket or an in-memory buffer.
pub struct WriterSink<W: Write + Send> {
    name: String,
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, chunk: &str) -> Result<()> {
        self.writer.write_all(chunk.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_through() {
        let mut sink = WriterSink::new("buffer", Vec::new());
        sink.write("abc\n").unwrap();
        assert_eq!(sink.name(), "buffer");
        assert_eq!(sink.into_inner(), b"abc\n".to_vec());
    }

    #[test]
    fn test_io_failure_propagates() {
        let mut sink = WriterSink::new("pipe", BrokenPipe);
        assert!(matches!(sink.write("x"), Err(LoggerError::IoError(_))));
    }
}
