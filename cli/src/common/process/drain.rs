//! # Pipe Draining (`common::process::drain`)
//!
//! File: cli/src/common/process/drain.rs
//!
//! ## Overview
//!
//! Spawns `<shell> -c <line>` with both output streams piped, reads each pipe
//! to end-of-stream while the child runs, and returns the exit status once the
//! child has terminated and both pipes are fully drained.
//!
//! ## Architecture
//!
//! One trait, two implementations:
//! - **`ReadinessDrain`**: `tokio::process` child; each pipe is read by its own
//!   tokio task as data becomes readable. Needs a running tokio reactor.
//! - **`BlockingDrain`**: `std::process` child; stderr is read on a dedicated
//!   thread and stdout on the calling thread, both to EOF, before `wait`.
//!   Works with or without a runtime.
//!
//! Both feed every chunk through the same `Capture` (one lock around both
//! buffers) and the same `Tee` (optional sink per stream, closed after EOF).
//! Neither returns until its drain tasks have been joined, so by the time the
//! runner takes the buffers every byte is in them.
//!
//! `DrainStrategy` picks an implementation: `Auto` uses readiness-driven I/O
//! when a tokio runtime is available and falls back to blocking reads otherwise.
//!
use super::capture::Capture;
use super::command::CommandLine;
use super::sink::{OutputSink, Tee};
use crate::core::error::{ShellOutError, StreamKind};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::thread;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

const CHUNK_SIZE: usize = 8 * 1024;

/// Everything needed to start the child process.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Shell executable, started as `<shell> -c <command_line>`.
    pub shell: String,
    pub command_line: CommandLine,
    /// Complete environment for the child. `None` inherits this process's environment.
    pub environment: Option<HashMap<String, String>>,
}

/// Optional tee destinations for the two streams.
#[derive(Debug, Default)]
pub struct Sinks {
    pub output: Option<OutputSink>,
    pub error: Option<OutputSink>,
}

/// Runs an invocation to completion, draining both pipes into `capture`.
#[async_trait]
pub trait PipeDrain: Send + Sync + fmt::Debug {
    /// Returns only after the child has exited and both pipes reached EOF.
    async fn run_to_exit(
        &self,
        invocation: &Invocation,
        sinks: Sinks,
        capture: &Capture,
    ) -> Result<ExitStatus, ShellOutError>;
}

/// How the runner drains the child's pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrainStrategy {
    /// Readiness-driven when a tokio runtime is available, blocking otherwise.
    #[default]
    Auto,
    /// Async tasks per pipe (`ReadinessDrain`).
    Readiness,
    /// Blocking reads on threads (`BlockingDrain`).
    Blocking,
}

impl DrainStrategy {
    /// Resolves `Auto` against the current thread's capabilities.
    pub fn resolve(self) -> DrainStrategy {
        match self {
            DrainStrategy::Auto => {
                if tokio::runtime::Handle::try_current().is_ok() {
                    DrainStrategy::Readiness
                } else {
                    DrainStrategy::Blocking
                }
            }
            other => other,
        }
    }

    /// Returns the implementation for this strategy.
    pub fn drain(self) -> Arc<dyn PipeDrain> {
        match self.resolve() {
            DrainStrategy::Blocking => Arc::new(BlockingDrain),
            _ => Arc::new(ReadinessDrain),
        }
    }
}

impl fmt::Display for DrainStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainStrategy::Auto => f.write_str("auto"),
            DrainStrategy::Readiness => f.write_str("readiness"),
            DrainStrategy::Blocking => f.write_str("blocking"),
        }
    }
}

fn spawn_error(invocation: &Invocation, source: io::Error) -> ShellOutError {
    ShellOutError::SpawnFailed {
        shell: invocation.shell.clone(),
        source,
    }
}

fn join_error(stream: StreamKind, message: String) -> ShellOutError {
    ShellOutError::Drain {
        stream,
        source: io::Error::other(format!("drain task failed: {}", message)),
    }
}

// ---------------------------------------------------------------------------
// Readiness-driven draining (tokio)
// ---------------------------------------------------------------------------

/// Drains each pipe on its own tokio task.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadinessDrain;

#[async_trait]
impl PipeDrain for ReadinessDrain {
    async fn run_to_exit(
        &self,
        invocation: &Invocation,
        sinks: Sinks,
        capture: &Capture,
    ) -> Result<ExitStatus, ShellOutError> {
        let mut command = tokio::process::Command::new(&invocation.shell);
        command.arg("-c").arg(invocation.command_line.as_str());
        if let Some(env) = &invocation.environment {
            command.env_clear().envs(env);
        }
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|source| spawn_error(invocation, source))?;
        debug!("Spawned child process {:?} (readiness drain).", child.id());

        let stdout_task = tokio::spawn(drain_async(
            child.stdout.take(),
            StreamKind::Stdout,
            capture.clone(),
            Tee::new(sinks.output, "stdout"),
        ));
        let stderr_task = tokio::spawn(drain_async(
            child.stderr.take(),
            StreamKind::Stderr,
            capture.clone(),
            Tee::new(sinks.error, "stderr"),
        ));

        let status = match child.wait().await {
            Ok(status) => status,
            Err(source) => {
                // Dropping the aborted tasks releases the pipes.
                stdout_task.abort();
                stderr_task.abort();
                return Err(ShellOutError::Wait { source });
            }
        };
        trace!("Child exited with {}, waiting for pipes to drain.", status);

        let stdout_result = stdout_task
            .await
            .map_err(|e| join_error(StreamKind::Stdout, e.to_string()))?;
        let stderr_result = stderr_task
            .await
            .map_err(|e| join_error(StreamKind::Stderr, e.to_string()))?;
        stdout_result?;
        stderr_result?;
        Ok(status)
    }
}

async fn drain_async<R>(
    pipe: Option<R>,
    stream: StreamKind,
    capture: Capture,
    mut tee: Tee,
) -> Result<(), ShellOutError>
where
    R: AsyncRead + Unpin,
{
    let result = match pipe {
        Some(mut pipe) => {
            let mut chunk = vec![0u8; CHUNK_SIZE];
            loop {
                match pipe.read(&mut chunk).await {
                    Ok(0) => break Ok(()),
                    Ok(n) => {
                        capture.append(stream, &chunk[..n]);
                        tee.forward(&chunk[..n]);
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(source) => break Err(ShellOutError::Drain { stream, source }),
                }
            }
        }
        None => Ok(()),
    };
    tee.close();
    result
}

// ---------------------------------------------------------------------------
// Blocking draining (std threads)
// ---------------------------------------------------------------------------

/// Drains stderr on a helper thread and stdout on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingDrain;

impl BlockingDrain {
    /// Synchronous form, usable without any async runtime.
    pub fn run_to_exit_blocking(
        &self,
        invocation: &Invocation,
        sinks: Sinks,
        capture: &Capture,
    ) -> Result<ExitStatus, ShellOutError> {
        let mut command = std::process::Command::new(&invocation.shell);
        command.arg("-c").arg(invocation.command_line.as_str());
        if let Some(env) = &invocation.environment {
            command.env_clear().envs(env);
        }
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|source| spawn_error(invocation, source))?;
        debug!("Spawned child process {} (blocking drain).", child.id());

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stderr_capture = capture.clone();
        let stderr_tee = Tee::new(sinks.error, "stderr");
        let stderr_thread = thread::Builder::new()
            .name("shellout-stderr".to_string())
            .spawn(move || drain_blocking(stderr, StreamKind::Stderr, &stderr_capture, stderr_tee));
        let stderr_thread = match stderr_thread {
            Ok(handle) => handle,
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ShellOutError::Drain {
                    stream: StreamKind::Stderr,
                    source,
                });
            }
        };

        let stdout_result = drain_blocking(
            stdout,
            StreamKind::Stdout,
            capture,
            Tee::new(sinks.output, "stdout"),
        );
        let stderr_result = stderr_thread
            .join()
            .map_err(|_| join_error(StreamKind::Stderr, "stderr thread panicked".to_string()))?;

        let status = child.wait().map_err(|source| ShellOutError::Wait { source })?;
        stdout_result?;
        stderr_result?;
        Ok(status)
    }
}

#[async_trait]
impl PipeDrain for BlockingDrain {
    async fn run_to_exit(
        &self,
        invocation: &Invocation,
        sinks: Sinks,
        capture: &Capture,
    ) -> Result<ExitStatus, ShellOutError> {
        // Without a tokio runtime there is no blocking pool; read on this thread.
        if tokio::runtime::Handle::try_current().is_err() {
            return self.run_to_exit_blocking(invocation, sinks, capture);
        }
        let drain = *self;
        let invocation = invocation.clone();
        let capture = capture.clone();
        tokio::task::spawn_blocking(move || drain.run_to_exit_blocking(&invocation, sinks, &capture))
            .await
            .map_err(|e| join_error(StreamKind::Stdout, e.to_string()))?
    }
}

fn drain_blocking<R: Read>(
    pipe: Option<R>,
    stream: StreamKind,
    capture: &Capture,
    mut tee: Tee,
) -> Result<(), ShellOutError> {
    let result = match pipe {
        Some(mut pipe) => {
            let mut chunk = vec![0u8; CHUNK_SIZE];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) => break Ok(()),
                    Ok(n) => {
                        capture.append(stream, &chunk[..n]);
                        tee.forward(&chunk[..n]);
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(source) => break Err(ShellOutError::Drain { stream, source }),
                }
            }
        }
        None => Ok(()),
    };
    tee.close();
    result
}
