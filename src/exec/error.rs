//! Execution error types.

use std::process::ExitStatus;

/// Error type for process spawning operations.
#[derive(thiserror::Error, Debug)]
pub enum SpawnError {
    /// The binary was not found.
    #[error("{binary}: command not found")]
    NotFound { binary: String },
    /// Permission denied when spawning.
    #[error("{binary}: permission denied")]
    PermissionDenied { binary: String },
    /// Other I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpawnError {
    /// Create a `SpawnError` from an I/O error, classifying common cases.
    pub(crate) fn from_io(binary: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                binary: binary.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                binary: binary.to_string(),
            },
            _ => Self::Io(err),
        }
    }
}

/// Errors writing to an [`EventSink`](super::EventSink).
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    /// The receiving side has gone away.
    #[error("Sink closed")]
    Closed,
    /// Underlying writer failed.
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// An event could not be serialized.
    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from running a diagnostic command to completion.
#[derive(thiserror::Error, Debug)]
pub enum ExecError {
    /// The process could not be started.
    #[error(transparent)]
    Spawn(#[from] SpawnError),

    /// The process exited with a non-zero status.
    #[error("exit status {code}")]
    ProcessExit { code: i32 },

    /// The process was killed by a signal.
    #[error("terminated by signal")]
    Signaled,

    /// Reading a pipe or waiting on the child failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink cannot flush incrementally.
    #[error("Streaming unsupported")]
    StreamingUnsupported,

    /// A pipe was already taken from the handle.
    #[error("Process {0} not available")]
    PipeUnavailable(&'static str),

    /// The sink failed mid-stream.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl ExecError {
    /// Build an error from an unsuccessful exit status.
    #[must_use]
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self::ProcessExit { code },
            None => Self::Signaled,
        }
    }

    /// Returns true if the process ran but exited unsuccessfully.
    #[must_use]
    pub fn is_exit_failure(&self) -> bool {
        matches!(self, Self::ProcessExit { .. } | Self::Signaled)
    }
}
