//! Types for the download module.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::metadata::{PlaylistCore, VideoMetadata};

/// Video container format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoFormat {
    Mp4,
    Webm,
}

impl VideoFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }
}

/// Audio format selection for extracted-audio downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    Mp3,
    Flac,
    Wav,
    Opus,
}

impl AudioFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Opus => "opus",
        }
    }

    /// Returns the value passed to yt-dlp's `--audio-format`.
    pub fn audio_format_arg(&self) -> &'static str {
        self.extension()
    }
}

/// A media format selection: keep the video container, or extract audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFormat {
    Video(VideoFormat),
    Audio(AudioFormat),
}

impl MediaFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Video(format) => format.extension(),
            Self::Audio(format) => format.extension(),
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio(_))
    }
}

impl Default for MediaFormat {
    fn default() -> Self {
        Self::Video(VideoFormat::Mp4)
    }
}

/// The downloaded file plus its associated metadata. Produced once per
/// successful invocation.
#[derive(Debug, Clone)]
pub struct DownloadedArtifact {
    pub file_path: PathBuf,
    pub metadata: VideoMetadata,
}

/// A completed playlist download. Entry order matches the source playlist
/// even when downloads executed out of order.
#[derive(Debug, Clone)]
pub struct PlaylistResult {
    pub playlist: PlaylistCore,
    pub entries: Vec<DownloadedArtifact>,
}

/// What a [`DownloadBuilder`](super::DownloadBuilder) run produced, depending
/// on whether the URL resolved to a single video or a playlist.
#[derive(Debug, Clone)]
pub enum DownloadOutcome {
    Single(Box<DownloadedArtifact>),
    Playlist(PlaylistResult),
}
