//! Cancellable subprocess execution for toolchain queries.

use super::types::ToolchainError;
use std::io::{self, Read};
use std::process::{Command, Output, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Cancellation handle for a toolchain query.
///
/// Clones share the same flag, so another thread can call [`cancel`] while
/// the query runs. An optional deadline turns into a timeout.
///
/// [`cancel`]: CancelToken::cancel
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<(Instant, Duration)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Some((Instant::now() + timeout, timeout)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// The error to abort with, if the query should stop now.
    fn check(&self) -> Option<ToolchainError> {
        if self.is_cancelled() {
            return Some(ToolchainError::Cancelled);
        }
        match self.deadline {
            Some((at, timeout)) if Instant::now() >= at => Some(ToolchainError::TimedOut(timeout)),
            _ => None,
        }
    }
}

type Drain = mpsc::Receiver<io::Result<Vec<u8>>>;

// The reader thread is detached: a grandchild of the killed process may keep
// the pipe open long after we stop caring about its output.
fn drain<R: Read + Send + 'static>(reader: Option<R>) -> Drain {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = match reader {
            Some(mut r) => r.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        // The receiver is gone once the query was abandoned.
        let _ = tx.send(result);
    });
    rx
}

/// Wait for one drained pipe, giving up as soon as `cancel` fires.
fn collect(rx: &Drain, program: &str, cancel: &CancelToken) -> Result<Vec<u8>, ToolchainError> {
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(result) => {
                return result.map_err(|source| ToolchainError::Read {
                    program: program.to_string(),
                    source,
                });
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                return Err(ToolchainError::Read {
                    program: program.to_string(),
                    source: io::Error::other("output reader stopped unexpectedly"),
                });
            }
        }
        if let Some(reason) = cancel.check() {
            return Err(reason);
        }
    }
}

/// Run `cmd` to completion, killing it if `cancel` fires first.
///
/// stdout and stderr are drained on their own threads so a chatty child
/// never blocks on a full pipe while we poll it. Once `cancel` fires the
/// call returns without waiting for those threads.
pub fn run_cancellable(cmd: &mut Command, cancel: &CancelToken) -> Result<Output, ToolchainError> {
    let program = cmd.get_program().to_string_lossy().to_string();

    if let Some(err) = cancel.check() {
        return Err(err);
    }

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ToolchainError::Launch {
            program: program.clone(),
            source,
        })?;

    let out = drain(child.stdout.take());
    let err = drain(child.stderr.take());

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolchainError::Launch { program, source });
            }
        }
        if let Some(reason) = cancel.check() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(reason);
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = collect(&out, &program, cancel)?;
    let stderr = collect(&err, &program, cancel)?;

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}
