//! Post-processing of captured output into the on-disk artifact path.
//!
//! yt-dlp reports where the finished file landed in different ways depending
//! on how the download ended (skipped, merged, audio-extracted). The
//! resolver scans the captured stdout with full-line patterns so similarly
//! worded log lines cannot false-positive, applying a fixed precedence.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::{info, warn};

static ALREADY_DOWNLOADED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[download\] (?P<filename>.+) has already been downloaded$").unwrap()
});

static MERGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\[Merger\] Merging formats into "(?P<filename>.+)"$"#).unwrap());

static EXTRACT_AUDIO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[ExtractAudio\] Destination: (?P<filename>.+)$").unwrap());

/// Which rule produced the resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    /// The tool skipped the download because the file already existed.
    AlreadyDownloaded,
    /// The tool merged separate video/audio formats into the file.
    Merged,
    /// The tool extracted an audio track into the file.
    ExtractedAudio,
    /// No filename line matched; the path is a best guess from the title.
    TitleFallback,
}

/// A resolved artifact location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub path: PathBuf,
    pub via: ResolvedVia,
}

/// Determines the final artifact path from an invocation's captured stdout.
///
/// Precedence, first match wins, each rule scanning every line:
/// already-downloaded, merger output, extracted audio, then a
/// `<file_stem>.<extension>` fallback under the working directory. The
/// fallback may disagree with the tool's own title sanitization; it is
/// surfaced as a warning, not a failure.
pub fn resolve_artifact_path(
    stdout: &str,
    working_dir: &Path,
    file_stem: &str,
    extension: &str,
) -> ResolvedArtifact {
    if let Some(name) = match_any_line(stdout, &ALREADY_DOWNLOADED_RE) {
        info!(file = %name, "file has already been downloaded");
        return ResolvedArtifact {
            path: PathBuf::from(name),
            via: ResolvedVia::AlreadyDownloaded,
        };
    }

    if let Some(name) = match_any_line(stdout, &MERGER_RE) {
        return ResolvedArtifact {
            path: PathBuf::from(name),
            via: ResolvedVia::Merged,
        };
    }

    if let Some(name) = match_any_line(stdout, &EXTRACT_AUDIO_RE) {
        return ResolvedArtifact {
            path: PathBuf::from(name),
            via: ResolvedVia::ExtractedAudio,
        };
    }

    warn!(
        file_stem,
        extension, "could not extract filename from output, falling back to title"
    );
    ResolvedArtifact {
        path: working_dir.join(format!("{file_stem}.{extension}")),
        via: ResolvedVia::TitleFallback,
    }
}

fn match_any_line(stdout: &str, pattern: &Regex) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| pattern.captures(line).map(|caps| caps["filename"].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_downloaded_line() {
        let stdout = "[youtube] abc: Downloading webpage\n\
                      [download] My Clip.mp4 has already been downloaded\n";
        let resolved = resolve_artifact_path(stdout, Path::new("/dl"), "My Clip", "mp4");
        assert_eq!(resolved.via, ResolvedVia::AlreadyDownloaded);
        assert_eq!(resolved.path, PathBuf::from("My Clip.mp4"));
    }

    #[test]
    fn test_merger_line() {
        let stdout = "[download] Destination: My Clip.f616.mp4\n\
                      [Merger] Merging formats into \"My Clip.mp4\"\n";
        let resolved = resolve_artifact_path(stdout, Path::new("/dl"), "My Clip", "mp4");
        assert_eq!(resolved.via, ResolvedVia::Merged);
        assert_eq!(resolved.path, PathBuf::from("My Clip.mp4"));
    }

    #[test]
    fn test_extract_audio_line() {
        let stdout = "[ExtractAudio] Destination: Song.mp3\n";
        let resolved = resolve_artifact_path(stdout, Path::new("/dl"), "Song", "mp3");
        assert_eq!(resolved.via, ResolvedVia::ExtractedAudio);
        assert_eq!(resolved.path, PathBuf::from("Song.mp3"));
    }

    #[test]
    fn test_already_downloaded_takes_precedence_over_merger() {
        let stdout = "[download] Old Clip.mp4 has already been downloaded\n\
                      [Merger] Merging formats into \"New Clip.mp4\"\n";
        let resolved = resolve_artifact_path(stdout, Path::new("/dl"), "x", "mp4");
        assert_eq!(resolved.via, ResolvedVia::AlreadyDownloaded);
        assert_eq!(resolved.path, PathBuf::from("Old Clip.mp4"));
    }

    #[test]
    fn test_fallback_resolves_against_working_dir() {
        let stdout = "[download] 100% of 10.00MiB\n";
        let resolved = resolve_artifact_path(stdout, Path::new("/dl"), "My Title", "webm");
        assert_eq!(resolved.via, ResolvedVia::TitleFallback);
        assert_eq!(resolved.path, PathBuf::from("/dl/My Title.webm"));
    }

    #[test]
    fn test_patterns_require_full_line_match() {
        // A line merely containing the phrase must not match.
        let stdout = "NOTE: [download] x has already been downloaded (seen earlier)\n";
        let resolved = resolve_artifact_path(stdout, Path::new("/dl"), "x", "mp4");
        assert_eq!(resolved.via, ResolvedVia::TitleFallback);
    }
}
