//! Incremental parser for yt-dlp's human-readable output.
//!
//! The tool repaints its progress line in place, terminating each repaint
//! with a carriage return instead of a line feed, so the stream drainer
//! flushes line units on `\r` and feeds them here. The grammar below is
//! versioned against yt-dlp's current output format and intentionally kept
//! in this one file; it is best-effort and lines that match nothing are
//! passed to the raw-line hook only.

use std::time::Instant;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::hooks::DownloadHooks;
use super::types::ProgressEvent;

static PROGRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[download\]\s+(?P<percent>\d+\.\d+)%\s+of\s+~?\s+(?P<size>\d+\.\d+\w+)\s+at\s+(?P<speed>\d+\.\d+\w+/s)\s+ETA\s+(?P<minutes>\d+):(?P<seconds>\d+)(?:\s+\(frag\s+(?P<frag_current>\d+)/(?P<frag_max>\d+)\))?$",
    )
    .unwrap()
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[youtube\] Extracting URL: (?P<url>https?://\S+)$").unwrap());

static DESTINATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[download\] Destination: (?P<filename>.+)$").unwrap());

/// State machine turning flushed output line units into download events.
///
/// Lifecycle per invocation: the start event fires exactly once, after the
/// first non-progress line unit has been scanned for header data; progress
/// events fire for every matching repaint; the end event fires exactly once,
/// from [`ProgressParser::finish`] when the stream has closed.
pub struct ProgressParser {
    hooks: DownloadHooks,
    source_url: Option<String>,
    file_name: Option<String>,
    header_seen: bool,
    progress_seen: bool,
    started: Instant,
}

impl ProgressParser {
    pub fn new(hooks: DownloadHooks) -> Self {
        Self {
            hooks,
            source_url: None,
            file_name: None,
            header_seen: false,
            progress_seen: false,
            started: Instant::now(),
        }
    }

    /// Feeds one flushed line unit to the parser.
    ///
    /// A unit is everything accumulated up to a `\r` boundary (or whatever
    /// remains when the stream closes); header units can contain several
    /// `\n`-separated sub-lines, which are handled internally.
    pub fn observe_line(&mut self, line: &str) {
        self.hooks.emit_line(line);

        if let Some(caps) = PROGRESS_RE.captures(line) {
            self.progress_seen = true;
            let event = self.build_event(&caps);
            self.hooks.emit_progress(&event);
            return;
        }

        // Header data arrives as one OS-level write holding several
        // newline-separated lines; it is only meaningful before the first
        // progress repaint.
        if !self.header_seen && !self.progress_seen {
            self.extract_header(line);
            self.hooks
                .emit_start(self.file_name.as_deref(), self.source_url.as_deref());
            self.header_seen = true;
        }
    }

    /// Signals end-of-stream, firing the end event with the elapsed
    /// wall-clock time of the whole read loop.
    pub fn finish(self) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.hooks
            .emit_end(self.file_name.as_deref(), self.source_url.as_deref(), elapsed_ms);
    }

    fn extract_header(&mut self, unit: &str) {
        for line in unit.split('\n') {
            if let Some(caps) = URL_RE.captures(line) {
                self.source_url = Some(caps["url"].to_string());
                continue;
            }
            if let Some(caps) = DESTINATION_RE.captures(line) {
                let cleaned = self.clean_destination(&caps["filename"]);
                self.file_name = Some(cleaned);
            }
        }
    }

    /// The tool sometimes embeds the bracketed format-code id from the URL's
    /// query string in the destination name, and can emit a stray internal
    /// artifact code; both are stripped for a clean display name. Tool-version
    /// specific, best-effort.
    fn clean_destination(&self, raw: &str) -> String {
        let mut name = raw.to_string();
        if let Some(url) = &self.source_url {
            let mut segments = url.split('=');
            if let (Some(_), Some(id)) = (segments.next(), segments.next()) {
                name = name.replace(&format!("[{id}]"), "");
            }
        }
        name.replace(" .f616", "")
    }

    fn build_event(&self, caps: &regex_lite::Captures<'_>) -> ProgressEvent {
        let minutes: u64 = caps["minutes"].parse().unwrap_or(0);
        let seconds: u64 = caps["seconds"].parse().unwrap_or(0);
        let current_fragment = caps
            .name("frag_current")
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let total_fragments = caps
            .name("frag_max")
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);

        ProgressEvent {
            source_url: self.source_url.clone(),
            file_name: self.file_name.clone(),
            percent: caps["percent"].parse().unwrap_or(0.0),
            total_size: caps["size"].to_string(),
            speed: caps["speed"].to_string(),
            eta_secs: minutes * 60 + seconds,
            current_fragment,
            total_fragments,
        }
    }
}
