//! # Output Capture (`common::process::capture`)
//!
//! File: cli/src/common/process/capture.rs
//!
//! The two accumulator buffers of one invocation live behind a single mutex.
//! Drain tasks append chunks as they arrive; the runner takes both buffers once,
//! after the child has exited and every drain task has been joined. Taking the
//! same lock the writers used is what makes their bytes visible to the
//! finalizing thread.
//!
use crate::core::error::StreamKind;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Buffers {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Shared handle to the stdout/stderr accumulators of one invocation.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    inner: Arc<Mutex<Buffers>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk read from `stream`.
    pub fn append(&self, stream: StreamKind, chunk: &[u8]) {
        let mut buffers = self.inner.lock();
        match stream {
            StreamKind::Stdout => buffers.stdout.extend_from_slice(chunk),
            StreamKind::Stderr => buffers.stderr.extend_from_slice(chunk),
        }
    }

    /// Takes both buffers, leaving them empty. Call only after draining has finished.
    pub fn take(&self) -> (Vec<u8>, Vec<u8>) {
        let mut buffers = self.inner.lock();
        (
            std::mem::take(&mut buffers.stdout),
            std::mem::take(&mut buffers.stderr),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_append_routes_by_stream() {
        let capture = Capture::new();
        capture.append(StreamKind::Stdout, b"out");
        capture.append(StreamKind::Stderr, b"err");
        capture.append(StreamKind::Stdout, b"put");
        assert_eq!(capture.take(), (b"output".to_vec(), b"err".to_vec()));
        assert_eq!(capture.take(), (Vec::new(), Vec::new()));
    }

    #[test]
    fn test_concurrent_writers_are_all_visible_after_join() {
        let capture = Capture::new();
        let writers: Vec<_> = [StreamKind::Stdout, StreamKind::Stderr]
            .into_iter()
            .map(|stream| {
                let capture = capture.clone();
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        capture.append(stream, b"ab");
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }
        let (stdout, stderr) = capture.take();
        assert_eq!(stdout.len(), 20_000);
        assert_eq!(stderr.len(), 20_000);
        assert!(stdout.chunks(2).all(|pair| pair == b"ab"));
    }
}
