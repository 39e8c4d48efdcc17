//! ConsoleSink - synchronous line writer (stderr by default)

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use contracts::{ContractError, LogSink};

use crate::metrics::SinkMetrics;

/// Default console sink name
pub const CONSOLE_SINK_NAME: &str = "console";

/// Sink that writes each record as one line
///
/// The whole line (including the newline) goes out in a single `write_all`
/// under the sink's lock, so concurrent lines never interleave.
pub struct ConsoleSink {
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
    metrics: Arc<SinkMetrics>,
}

impl ConsoleSink {
    /// Console sink writing to stderr
    pub fn stderr() -> Self {
        Self::with_writer(CONSOLE_SINK_NAME, io::stderr())
    }

    /// Console sink writing to an arbitrary writer
    pub fn with_writer(name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(Box::new(writer)),
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    fn write_line(&self, line: &str) -> Result<(), ContractError> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ContractError::sink_write(&self.name, "writer lock poisoned"))?;
        writer.write_all(buf.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl LogSink for ConsoleSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, line: &str) -> Result<(), ContractError> {
        match self.write_line(line) {
            Ok(()) => {
                self.metrics.inc_write_count();
                Ok(())
            }
            Err(e) => {
                self.metrics.inc_failure_count();
                Err(e)
            }
        }
    }
}

/// Shared in-memory writer, for capturing console output
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        match self.inner.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    /// Captured lines, without their newlines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("capture buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_sink_writes_one_line() {
        let capture = CaptureBuffer::new();
        let sink = ConsoleSink::with_writer("test_console", capture.clone());

        sink.write("[svc] hello").unwrap();
        sink.write("[svc] world").unwrap();

        assert_eq!(capture.contents(), "[svc] hello\n[svc] world\n");
        assert_eq!(sink.metrics().write_count(), 2);
    }

    #[test]
    fn test_console_sink_name() {
        let sink = ConsoleSink::stderr();
        assert_eq!(sink.name(), CONSOLE_SINK_NAME);
    }

    #[test]
    fn test_console_sink_failure_is_counted() {
        let sink = ConsoleSink::with_writer("broken", BrokenPipe);
        assert!(sink.write("lost").is_err());
        assert_eq!(sink.metrics().failure_count(), 1);
        assert_eq!(sink.metrics().write_count(), 0);
    }
}
