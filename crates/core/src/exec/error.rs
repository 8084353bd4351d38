//! Error types for the exec module.

use thiserror::Error;

/// Errors raised while running the wrapped executable.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The subprocess could not be started at all (missing binary, bad path,
    /// permission denied).
    #[error("failed to spawn {executable}: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// The subprocess exited with a non-zero code. The captured stderr text
    /// is the diagnostic payload.
    #[error("process exited with code {exit_code}")]
    Process { exit_code: i32, stderr: String },

    /// A stream-draining task was cancelled or panicked while the invocation
    /// was waiting on it. The subprocess is left to normal OS reaping; no
    /// orphan-killing guarantee is made.
    #[error("interrupted while awaiting process output: {0}")]
    Interrupted(#[from] tokio::task::JoinError),

    /// I/O error while waiting for the subprocess.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExecError {
    /// The captured stderr of a failed process, if this is a process failure.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Process { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
