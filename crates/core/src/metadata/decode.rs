//! Decoding of yt-dlp's JSON output.
//!
//! `--dump-json` over a playlist emits one JSON object per video,
//! concatenated back-to-back with no separator, which is not a valid
//! multi-document stream. [`split_json_documents`] re-establishes document
//! boundaries by splitting on the `}`-whitespace-`{` seam and re-wrapping
//! each fragment before handing it to the JSON decoder. The rule is part of
//! the wrapped tool's de-facto output format and must be preserved exactly.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::error::MetadataError;
use super::types::{PlaylistInfo, PlaylistPreviewInfo, VideoInfo};

static DOCUMENT_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\}\s*\{").unwrap());

/// Splits concatenated JSON objects into independently decodable documents.
pub fn split_json_documents(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let fragments: Vec<&str> = DOCUMENT_BOUNDARY_RE.split(raw).collect();
    if fragments.len() == 1 {
        return vec![raw.to_string()];
    }

    let last = fragments.len() - 1;
    fragments
        .into_iter()
        .enumerate()
        .map(|(i, fragment)| {
            let mut doc = String::with_capacity(fragment.len() + 2);
            if i > 0 {
                doc.push('{');
            }
            doc.push_str(fragment);
            if i < last {
                doc.push('}');
            }
            doc
        })
        .collect()
}

/// Decodes a single-video `--dump-json` probe.
pub fn parse_video_info(url: &str, stdout: &str) -> Result<VideoInfo, MetadataError> {
    let stdout = stdout.trim();
    if stdout.is_empty() {
        return Err(MetadataError::not_found(url));
    }
    serde_json::from_str(stdout).map_err(|e| MetadataError::parse(e.to_string()))
}

/// Decodes every video document in a multi-video `--dump-json` dump, in
/// output order.
pub fn parse_video_documents(url: &str, stdout: &str) -> Result<Vec<VideoInfo>, MetadataError> {
    let documents = split_json_documents(stdout);
    if documents.is_empty() {
        return Err(MetadataError::not_found(url));
    }
    documents
        .iter()
        .map(|doc| serde_json::from_str(doc).map_err(|e| MetadataError::parse(e.to_string())))
        .collect()
}

/// Decodes a `--dump-single-json --flat-playlist` probe into the playlist
/// shell (entries are shallow; full entries come from a separate dump).
pub fn parse_playlist_shell(url: &str, stdout: &str) -> Result<PlaylistInfo, MetadataError> {
    let stdout = stdout.trim();
    if stdout.is_empty() {
        return Err(MetadataError::not_found(url));
    }
    serde_json::from_str(stdout).map_err(|e| MetadataError::parse(e.to_string()))
}

/// Decodes a `--dump-single-json --flat-playlist` probe with preview entries.
pub fn parse_playlist_preview(
    url: &str,
    stdout: &str,
) -> Result<PlaylistPreviewInfo, MetadataError> {
    let stdout = stdout.trim();
    if stdout.is_empty() {
        return Err(MetadataError::not_found(url));
    }
    serde_json::from_str(stdout).map_err(|e| MetadataError::parse(e.to_string()))
}

/// Whether a `--dump-single-json` probe output describes a playlist.
pub fn output_is_playlist(stdout: &str) -> Result<bool, MetadataError> {
    let value: serde_json::Value =
        serde_json::from_str(stdout.trim()).map_err(|e| MetadataError::parse(e.to_string()))?;
    Ok(value.get("entries").is_some())
}
