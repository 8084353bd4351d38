//! Error types for the metadata module.

use thiserror::Error;

/// Errors decoding yt-dlp's JSON output.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The JSON could not be decoded (malformed or unexpected schema).
    #[error("unable to parse video information: {reason}")]
    Parse { reason: String },

    /// A metadata probe exited cleanly but reported no data. Distinct from a
    /// process failure: the subprocess can exit 0 and still resolve nothing.
    #[error("no video or playlist data found for {url}")]
    NotFound { url: String },
}

impl MetadataError {
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }
}
