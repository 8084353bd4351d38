//! Fluent builder for one-shot downloads.

use std::path::PathBuf;

use crate::progress::DownloadHooks;

use super::client::YtDlp;
use super::error::DownloadError;
use super::types::{DownloadOutcome, MediaFormat};

/// Builder that downloads a URL without the caller deciding up front whether
/// it is a single video or a playlist; the probe decides at run time.
///
/// # Example
///
/// ```ignore
/// use tubeferry_core::download::{DownloadBuilder, MediaFormat, AudioFormat};
///
/// let outcome = DownloadBuilder::new("https://youtube.com/watch?v=abc", "/downloads")
///     .format(MediaFormat::Audio(AudioFormat::Mp3))
///     .run()
///     .await?;
/// ```
#[derive(Debug)]
pub struct DownloadBuilder {
    url: String,
    output_dir: PathBuf,
    output_name: Option<String>,
    format: MediaFormat,
    hooks: DownloadHooks,
    playlist_subdirectory: Option<bool>,
    client: Option<YtDlp>,
}

impl DownloadBuilder {
    pub fn new(url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output_dir: output_dir.into(),
            output_name: None,
            format: MediaFormat::default(),
            hooks: DownloadHooks::new(),
            playlist_subdirectory: None,
            client: None,
        }
    }

    /// Overrides the output name template (default `%(title)s`).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Selects the media format (default mp4 video).
    pub fn format(mut self, format: MediaFormat) -> Self {
        self.format = format;
        self
    }

    /// Attaches event hooks for the download.
    pub fn hooks(mut self, hooks: DownloadHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Puts playlist downloads in a subdirectory named after the playlist.
    pub fn playlist_subdirectory(mut self, enabled: bool) -> Self {
        self.playlist_subdirectory = Some(enabled);
        self
    }

    /// Uses a preconfigured client instead of the defaults.
    pub fn client(mut self, client: YtDlp) -> Self {
        self.client = Some(client);
        self
    }

    /// Probes the URL and downloads it as a single video or a whole
    /// playlist, whichever it turns out to be.
    pub async fn run(self) -> Result<DownloadOutcome, DownloadError> {
        let mut client = self.client.unwrap_or_else(YtDlp::with_defaults);
        if let Some(enabled) = self.playlist_subdirectory {
            client = client.with_playlist_subdirectory(enabled);
        }

        if client.is_playlist(&self.url).await? {
            let result = client
                .download_playlist(&self.url, &self.output_dir, self.format, self.hooks)
                .await?;
            return Ok(DownloadOutcome::Playlist(result));
        }

        let artifact = client
            .download_media(
                &self.url,
                &self.output_dir,
                self.output_name.as_deref(),
                self.format,
                self.hooks,
            )
            .await?;
        Ok(DownloadOutcome::Single(Box::new(artifact)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::exec::{ExecError, Invoker, Request, Response};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Arc;

    /// Answers every probe as a plain single video.
    struct SingleVideoInvoker;

    #[async_trait]
    impl Invoker for SingleVideoInvoker {
        fn name(&self) -> &str {
            "single-video"
        }

        async fn execute(&self, request: &Request) -> Result<Response, ExecError> {
            let args = request.args();
            let has = |flag: &str| args.iter().any(|a| a == flag);
            let stdout = if has("--dump-single-json") || has("--dump-json") {
                r#"{"id":"solo","title":"Solo","original_url":"https://tube/watch?v=solo"}"#
                    .to_string()
            } else {
                "[ExtractAudio] Destination: Solo.mp3\n".to_string()
            };
            Ok(Response {
                command_line: format!("yt-dlp {}", args.join(" ")),
                options: request.options().to_vec(),
                working_dir: request.working_dir().map(|d| d.to_path_buf()),
                exit_code: 0,
                elapsed_ms: 1,
                stdout,
                stderr: String::new(),
            })
        }

        async fn validate(&self) -> Result<(), ExecError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_builder_downloads_single_video_as_audio() {
        let client = YtDlp::with_invoker(Config::default(), Arc::new(SingleVideoInvoker));
        let outcome = DownloadBuilder::new("https://tube/watch?v=solo", "/dl")
            .format(MediaFormat::Audio(crate::download::AudioFormat::Mp3))
            .output_name("Solo")
            .client(client)
            .run()
            .await
            .unwrap();

        match outcome {
            DownloadOutcome::Single(artifact) => {
                assert_eq!(artifact.file_path, Path::new("Solo.mp3"));
                assert_eq!(artifact.metadata.title(), "Solo");
            }
            DownloadOutcome::Playlist(_) => panic!("expected a single video outcome"),
        }
    }

    #[test]
    fn test_builder_defaults() {
        let builder = DownloadBuilder::new("https://tube/watch?v=x", "/dl");
        assert_eq!(builder.format, MediaFormat::default());
        assert!(builder.output_name.is_none());
        assert!(builder.playlist_subdirectory.is_none());
    }
}
