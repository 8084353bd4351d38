//! High-level download client over the wrapped yt-dlp executable.
//!
//! This layer only assembles flag combinations and stitches together the
//! exec, metadata, batch and artifact modules; all process and parsing
//! mechanics live below it.
//!
//! # Example
//!
//! ```ignore
//! use tubeferry_core::download::{VideoFormat, YtDlp};
//! use tubeferry_core::progress::DownloadHooks;
//!
//! let client = YtDlp::with_defaults();
//! let artifact = client
//!     .download_video(
//!         "https://youtube.com/watch?v=abc",
//!         "/downloads".as_ref(),
//!         VideoFormat::Mp4,
//!         DownloadHooks::console(),
//!     )
//!     .await?;
//! println!("saved to {}", artifact.file_path.display());
//! ```

mod builder;
mod client;
mod config;
mod error;
mod types;

pub use builder::DownloadBuilder;
pub use client::YtDlp;
pub use config::DownloadConfig;
pub use error::DownloadError;
pub use types::{
    AudioFormat, DownloadOutcome, DownloadedArtifact, MediaFormat, PlaylistResult, VideoFormat,
};
