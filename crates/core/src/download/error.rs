//! Error types for the download module.

use thiserror::Error;

use crate::batch::BatchError;
use crate::exec::ExecError;
use crate::metadata::MetadataError;

/// Errors raised by the high-level download client.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The underlying invocation failed (spawn, non-zero exit, interruption).
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// The tool's JSON output could not be decoded, or resolved to no data.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A playlist entry failed; the whole batch is failed with it.
    #[error("playlist entry {key} failed: {source}")]
    Entry {
        key: String,
        #[source]
        source: Box<DownloadError>,
    },

    /// A batch worker was cancelled or panicked before completing.
    #[error("playlist worker aborted: {reason}")]
    Aborted { reason: String },

    /// Filesystem error preparing the download directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BatchError<DownloadError>> for DownloadError {
    fn from(err: BatchError<DownloadError>) -> Self {
        match err {
            BatchError::Task { key, source } => Self::Entry {
                key,
                source: Box::new(source),
            },
            BatchError::Aborted { reason } => Self::Aborted { reason },
        }
    }
}
