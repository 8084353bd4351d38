//! Types for the progress module.

use serde::{Deserialize, Serialize};

/// A structured snapshot of download progress, parsed from one repainted
/// yt-dlp status line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Resolved source URL, if the header block has been seen.
    pub source_url: Option<String>,
    /// Provisional output file name, if the header block has been seen.
    pub file_name: Option<String>,
    /// Completion percentage, 0.0 to 100.0.
    pub percent: f32,
    /// Total size as formatted by the tool (e.g. "12.3MiB"), passed through verbatim.
    pub total_size: String,
    /// Download speed as formatted by the tool (e.g. "1.00MiB/s").
    pub speed: String,
    /// Estimated seconds remaining.
    pub eta_secs: u64,
    /// Current fragment for fragmented downloads, 0 otherwise.
    pub current_fragment: u32,
    /// Total fragments for fragmented downloads, 0 otherwise.
    pub total_fragments: u32,
}

impl ProgressEvent {
    /// Whether this event belongs to a fragmented (HLS/DASH) download.
    pub fn is_fragmented(&self) -> bool {
        self.total_fragments > 0
    }
}
