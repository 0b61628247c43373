//! # Output Sinks (`common::process::sink`)
//!
//! File: cli/src/common/process/sink.rs
//!
//! ## Overview
//!
//! A sink receives a copy of every chunk read from one of the child's pipes,
//! in order and unmodified, while the runner keeps capturing the same bytes.
//!
//! - `OutputSink::Stdout` / `OutputSink::Stderr` tee to this process's own
//!   standard handles. They are flushed when draining ends, never closed.
//! - `OutputSink::Writer` wraps any `Write + Send` value (a file, a buffer, a
//!   socket). It is flushed and dropped when draining ends, which closes it.
//!
//! A sink that errors or blocks is a caller defect. The drain path logs the
//! first write error, stops teeing to that sink, and keeps capturing.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shellout::OutputSink;
//! use std::fs::File;
//!
//! let log = File::create("build.log").unwrap();
//! let sink = OutputSink::writer(log);
//! ```
//!
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Destination that receives a copy of one captured stream.
pub enum OutputSink {
    /// This process's standard output.
    Stdout,
    /// This process's standard error.
    Stderr,
    /// A caller-owned writer, closed once draining completes.
    Writer(Box<dyn Write + Send>),
}

impl OutputSink {
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        OutputSink::Writer(Box::new(writer))
    }

    /// True for sinks that wrap this process's own standard handles.
    pub fn is_standard(&self) -> bool {
        matches!(self, OutputSink::Stdout | OutputSink::Stderr)
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        match self {
            OutputSink::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(chunk)?;
                out.flush()
            }
            OutputSink::Stderr => io::stderr().lock().write_all(chunk),
            OutputSink::Writer(writer) => writer.write_all(chunk),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout => io::stdout().flush(),
            OutputSink::Stderr => io::stderr().flush(),
            OutputSink::Writer(writer) => writer.flush(),
        }
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSink::Stdout => f.write_str("OutputSink::Stdout"),
            OutputSink::Stderr => f.write_str("OutputSink::Stderr"),
            OutputSink::Writer(_) => f.write_str("OutputSink::Writer(..)"),
        }
    }
}

/// Per-stream tee state owned by exactly one drain task.
#[derive(Debug)]
pub(crate) struct Tee {
    sink: Option<OutputSink>,
    stream: &'static str,
}

impl Tee {
    pub(crate) fn new(sink: Option<OutputSink>, stream: &'static str) -> Self {
        Self { sink, stream }
    }

    /// Forwards `chunk` to the sink. A failing sink is dropped after a warning.
    pub(crate) fn forward(&mut self, chunk: &[u8]) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.write_chunk(chunk) {
                warn!("Error writing {} to output sink, no longer teeing: {}", self.stream, e);
                self.sink = None;
            }
        }
    }

    /// Flushes the sink and, for non-standard sinks, closes it by dropping it.
    pub(crate) fn close(mut self) {
        if let Some(mut sink) = self.sink.take() {
            if let Err(e) = sink.flush() {
                warn!("Error flushing {} sink: {}", self.stream, e);
            }
            if !sink.is_standard() {
                debug!("Closing {} sink.", self.stream);
            }
            drop(sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Writer that records everything written and whether it was dropped.
    #[derive(Clone, Default)]
    struct Recorder {
        bytes: Arc<Mutex<Vec<u8>>>,
        dropped: Arc<Mutex<bool>>,
    }

    struct RecorderHandle(Recorder);

    impl Write for RecorderHandle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.bytes.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for RecorderHandle {
        fn drop(&mut self) {
            *self.0.dropped.lock() = true;
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tee_forwards_in_order_and_closes_writer() {
        let recorder = Recorder::default();
        let mut tee = Tee::new(
            Some(OutputSink::writer(RecorderHandle(recorder.clone()))),
            "stdout",
        );
        tee.forward(b"one ");
        tee.forward(b"two");
        assert!(!*recorder.dropped.lock());
        tee.close();
        assert_eq!(&*recorder.bytes.lock(), b"one two");
        assert!(*recorder.dropped.lock());
    }

    #[test]
    fn test_failing_sink_is_discarded() {
        let mut tee = Tee::new(Some(OutputSink::writer(Broken)), "stderr");
        tee.forward(b"x");
        assert!(tee.sink.is_none());
        tee.forward(b"y");
        tee.close();
    }

    #[test]
    fn test_is_standard() {
        assert!(OutputSink::Stdout.is_standard());
        assert!(OutputSink::Stderr.is_standard());
        assert!(!OutputSink::writer(Vec::new()).is_standard());
        assert_eq!(format!("{:?}", OutputSink::writer(Vec::new())), "OutputSink::Writer(..)");
    }
}
