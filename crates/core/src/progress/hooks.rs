//! Per-invocation download event hooks.
//!
//! Hooks are plain values attached to a request; the invocation captures its
//! own clone at start time, so replacing hooks between invocations never
//! affects one already in flight.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use super::types::ProgressEvent;

type StartFn = dyn Fn(Option<&str>, Option<&str>) + Send + Sync;
type ProgressFn = dyn Fn(&ProgressEvent) + Send + Sync;
type EndFn = dyn Fn(Option<&str>, Option<&str>, u64) + Send + Sync;
type LineFn = dyn Fn(&str) + Send + Sync;

/// Optional callbacks observing one invocation's output stream.
///
/// All callbacks are invoked synchronously from the stream-draining task;
/// they must not block for long or they stall draining.
#[derive(Clone, Default)]
pub struct DownloadHooks {
    on_start: Option<Arc<StartFn>>,
    on_progress: Option<Arc<ProgressFn>>,
    on_end: Option<Arc<EndFn>>,
    on_line: Option<Arc<LineFn>>,
}

impl DownloadHooks {
    /// Creates an empty hook set (all events ignored).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback fired once when the download header has been parsed.
    ///
    /// Arguments are the provisional file name and resolved source URL, when known.
    pub fn on_start(mut self, f: impl Fn(Option<&str>, Option<&str>) + Send + Sync + 'static) -> Self {
        self.on_start = Some(Arc::new(f));
        self
    }

    /// Sets the callback fired for every parsed progress repaint.
    pub fn on_progress(mut self, f: impl Fn(&ProgressEvent) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(f));
        self
    }

    /// Sets the callback fired once when the output stream closes.
    ///
    /// Arguments are file name, source URL and elapsed wall-clock milliseconds.
    pub fn on_end(
        mut self,
        f: impl Fn(Option<&str>, Option<&str>, u64) + Send + Sync + 'static,
    ) -> Self {
        self.on_end = Some(Arc::new(f));
        self
    }

    /// Sets the callback receiving every flushed output line verbatim,
    /// before any structured parsing.
    pub fn on_line(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_line = Some(Arc::new(f));
        self
    }

    /// A hook set that repaints a single progress line on stdout, matching
    /// the tool's own terminal rendering.
    pub fn console() -> Self {
        Self::new().on_progress(|event| {
            let name = event.file_name.as_deref().unwrap_or("?");
            let stem = name.split('.').next().unwrap_or(name);
            print!(
                "\r[download] {} | {:.1}% of ~ {} at {} ETA {}s (frag {}/{})",
                stem,
                event.percent,
                event.total_size,
                event.speed,
                event.eta_secs,
                event.current_fragment,
                event.total_fragments
            );
            let _ = std::io::stdout().flush();
        })
    }

    pub(crate) fn emit_start(&self, file_name: Option<&str>, url: Option<&str>) {
        if let Some(f) = &self.on_start {
            f(file_name, url);
        }
    }

    pub(crate) fn emit_progress(&self, event: &ProgressEvent) {
        if let Some(f) = &self.on_progress {
            f(event);
        }
    }

    pub(crate) fn emit_end(&self, file_name: Option<&str>, url: Option<&str>, elapsed_ms: u64) {
        if let Some(f) = &self.on_end {
            f(file_name, url, elapsed_ms);
        }
    }

    pub(crate) fn emit_line(&self, line: &str) {
        if let Some(f) = &self.on_line {
            f(line);
        }
    }
}

impl fmt::Debug for DownloadHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadHooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_line", &self.on_line.is_some())
            .finish()
    }
}
