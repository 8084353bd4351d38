//! Progress parsing for yt-dlp's terminal output.
//!
//! yt-dlp repaints its progress line using carriage returns, so ordinary
//! line-buffered reading never observes an update. This module provides the
//! [`ProgressParser`] state machine fed by the stream drainer on `\r`
//! boundaries, the [`ProgressEvent`] it produces, and the [`DownloadHooks`]
//! value through which callers observe start/progress/end/raw-line events.

mod hooks;
mod parser;
mod types;

pub use hooks::DownloadHooks;
pub use parser::ProgressParser;
pub use types::ProgressEvent;
