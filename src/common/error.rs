//! Error types for the simulator driver.
//!
//! Every fallible path in the loader, writer, and CLI entry point returns
//! `Result<_, SimError>` instead of calling `.expect()` or `process::exit`
//! inline; `main` is the only place a `SimError` becomes an exit code.

use std::path::PathBuf;

/// Top-level error type for the simulator.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process was invoked with an unsupported number of arguments.
    #[error("usage error: {0}")]
    UsageError(String),

    /// Main memory could not be sized as requested.
    #[error("failed to allocate main memory")]
    AllocationFailed,
}

impl SimError {
    /// Wraps an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SimError::Io {
            path: path.into(),
            source,
        }
    }
}
