//! Video and playlist metadata model.
//!
//! yt-dlp reports metadata in two modes: a full `--dump-json` dump per video
//! and a shallow `--flat-playlist` preview. Both share a core field set; the
//! mode-specific payloads are modeled as two structs over a flattened
//! [`VideoCore`], tagged by [`VideoMetadata`].

use serde::{Deserialize, Serialize};

/// Fields common to full and preview video metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoCore {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub channel: Option<String>,
    pub channel_id: Option<String>,
    pub channel_url: Option<String>,
    /// Duration in seconds.
    pub duration: Option<f64>,
    pub view_count: Option<u64>,
    pub live_status: Option<String>,
    pub availability: Option<String>,
    pub uploader: Option<String>,
    pub uploader_id: Option<String>,
    pub uploader_url: Option<String>,
    #[serde(rename = "_type")]
    pub entry_type: Option<String>,
}

/// Full video metadata from a `--dump-json` probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(flatten)]
    pub core: VideoCore,
    pub thumbnail: Option<String>,
    pub webpage_url: Option<String>,
    pub original_url: Option<String>,
    pub upload_date: Option<String>,
    pub extractor: Option<String>,
    pub extractor_key: Option<String>,
    pub age_limit: Option<u32>,
    pub like_count: Option<u64>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub playlist: Option<String>,
    pub playlist_index: Option<u32>,
}

impl VideoInfo {
    /// Best-known source URL for re-requesting this video.
    pub fn source_url(&self) -> Option<&str> {
        self.original_url
            .as_deref()
            .or(self.webpage_url.as_deref())
    }
}

/// Shallow video metadata from a `--flat-playlist` probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoPreviewInfo {
    #[serde(flatten)]
    pub core: VideoCore,
    /// Direct entry URL as reported by the flat extractor.
    pub url: Option<String>,
    pub ie_key: Option<String>,
}

/// Video metadata tagged by the retrieval mode that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VideoMetadata {
    Full(VideoInfo),
    Preview(VideoPreviewInfo),
}

impl VideoMetadata {
    pub fn core(&self) -> &VideoCore {
        match self {
            Self::Full(info) => &info.core,
            Self::Preview(info) => &info.core,
        }
    }

    pub fn title(&self) -> &str {
        &self.core().title
    }

    /// Best-known source URL for re-requesting this video.
    pub fn source_url(&self) -> Option<&str> {
        match self {
            Self::Full(info) => info
                .original_url
                .as_deref()
                .or(info.webpage_url.as_deref()),
            Self::Preview(info) => info.url.as_deref(),
        }
    }
}

/// Fields common to full and preview playlist metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistCore {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel: Option<String>,
    pub uploader: Option<String>,
    pub webpage_url: Option<String>,
    pub playlist_count: Option<u32>,
    #[serde(rename = "_type")]
    pub entry_type: Option<String>,
}

/// Playlist metadata with fully probed entries, in source playlist order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistInfo {
    #[serde(flatten)]
    pub core: PlaylistCore,
    #[serde(default)]
    pub entries: Vec<VideoInfo>,
}

/// Playlist metadata with shallow entries, in source playlist order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistPreviewInfo {
    #[serde(flatten)]
    pub core: PlaylistCore,
    #[serde(default)]
    pub entries: Vec<VideoPreviewInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_video_info() {
        let json = r#"{
            "id": "abc123",
            "title": "A Video",
            "channel": "A Channel",
            "duration": 212.5,
            "view_count": 1000,
            "webpage_url": "https://youtube.com/watch?v=abc123",
            "original_url": "https://youtube.com/watch?v=abc123",
            "upload_date": "20240115",
            "categories": ["Music"],
            "tags": ["tag1", "tag2"],
            "_type": "video"
        }"#;
        let info: VideoInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.core.id, "abc123");
        assert_eq!(info.core.title, "A Video");
        assert_eq!(info.core.duration, Some(212.5));
        assert_eq!(info.core.entry_type.as_deref(), Some("video"));
        assert_eq!(info.tags.len(), 2);
        assert!(info.thumbnail.is_none());
    }

    #[test]
    fn test_deserialize_preview_entry() {
        let json = r#"{
            "id": "xyz",
            "title": "Entry",
            "url": "https://youtube.com/watch?v=xyz",
            "ie_key": "Youtube"
        }"#;
        let info: VideoPreviewInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.core.id, "xyz");
        assert_eq!(info.url.as_deref(), Some("https://youtube.com/watch?v=xyz"));
    }

    #[test]
    fn test_metadata_source_url_per_variant() {
        let full = VideoMetadata::Full(VideoInfo {
            core: VideoCore {
                id: "a".into(),
                title: "t".into(),
                ..Default::default()
            },
            webpage_url: Some("https://w".into()),
            original_url: Some("https://o".into()),
            ..Default::default()
        });
        assert_eq!(full.source_url(), Some("https://o"));

        let preview = VideoMetadata::Preview(VideoPreviewInfo {
            core: VideoCore {
                id: "b".into(),
                title: "p".into(),
                ..Default::default()
            },
            url: Some("https://p".into()),
            ie_key: None,
        });
        assert_eq!(preview.source_url(), Some("https://p"));
        assert_eq!(preview.title(), "p");
    }

    #[test]
    fn test_deserialize_playlist_preview() {
        let json = r#"{
            "id": "PL1",
            "title": "Mix",
            "_type": "playlist",
            "playlist_count": 2,
            "entries": [
                {"id": "a", "title": "one", "url": "https://u/a"},
                {"id": "b", "title": "two", "url": "https://u/b"}
            ]
        }"#;
        let playlist: PlaylistPreviewInfo = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.core.id, "PL1");
        assert_eq!(playlist.entries.len(), 2);
        assert_eq!(playlist.entries[0].core.id, "a");
        assert_eq!(playlist.entries[1].core.id, "b");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "id": "abc",
            "title": "t",
            "formats": [{"format_id": "616"}],
            "automatic_captions": {}
        }"#;
        let info: VideoInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.core.id, "abc");
    }
}
