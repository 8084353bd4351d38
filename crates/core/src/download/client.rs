//! High-level yt-dlp client.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::artifact::resolve_artifact_path;
use crate::batch::BatchRunner;
use crate::config::Config;
use crate::exec::{Invoker, Request, YtDlpInvoker};
use crate::metadata::{
    self, MetadataError, PlaylistInfo, PlaylistPreviewInfo, VideoInfo, VideoMetadata,
};
use crate::progress::DownloadHooks;

use super::error::DownloadError;
use super::types::{
    AudioFormat, DownloadedArtifact, MediaFormat, PlaylistResult, VideoFormat,
};

/// Client assembling yt-dlp flag combinations on top of the exec, metadata,
/// batch and artifact layers.
#[derive(Clone)]
pub struct YtDlp {
    config: Config,
    invoker: Arc<dyn Invoker>,
    runner: BatchRunner,
}

impl std::fmt::Debug for YtDlp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YtDlp")
            .field("invoker", &self.invoker.name())
            .field("config", &self.config)
            .finish()
    }
}

impl YtDlp {
    /// Creates a client running the real yt-dlp executable.
    pub fn new(config: Config) -> Self {
        let invoker = Arc::new(YtDlpInvoker::new(config.exec.clone()));
        let runner = BatchRunner::new(config.batch.clone());
        Self {
            config,
            invoker,
            runner,
        }
    }

    /// Creates a client with default configuration (`yt-dlp` on PATH).
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    /// Creates a client over a custom invoker implementation.
    pub fn with_invoker(config: Config, invoker: Arc<dyn Invoker>) -> Self {
        let runner = BatchRunner::new(config.batch.clone());
        Self {
            config,
            invoker,
            runner,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Overrides whether playlist downloads get their own subdirectory.
    pub fn with_playlist_subdirectory(mut self, enabled: bool) -> Self {
        self.config.download.playlist_subdirectory = enabled;
        self
    }

    /// Returns the wrapped executable's version string.
    pub async fn version(&self) -> Result<String, DownloadError> {
        let request = Request::builder().flag("--version").build();
        let response = self.invoker.execute(&request).await?;
        Ok(response.stdout.trim().to_string())
    }

    /// Retrieves full metadata for a single video. A playlist URL resolves
    /// to its first entry.
    pub async fn video_info(&self, url: &str) -> Result<VideoInfo, DownloadError> {
        let request = Request::builder()
            .url(url)
            .flag("--dump-json")
            .flag("--no-playlist")
            .build();
        let response = self.invoker.execute(&request).await?;
        Ok(metadata::parse_video_info(url, &response.stdout)?)
    }

    /// Retrieves shallow playlist metadata; cheaper than [`Self::playlist_info`].
    pub async fn playlist_preview(&self, url: &str) -> Result<PlaylistPreviewInfo, DownloadError> {
        let response = self.invoker.execute(&flat_probe(url)).await?;
        Ok(metadata::parse_playlist_preview(url, &response.stdout)?)
    }

    /// Retrieves playlist metadata with fully probed entries.
    ///
    /// A non-playlist URL yields a playlist with a single entry.
    pub async fn playlist_info(&self, url: &str) -> Result<PlaylistInfo, DownloadError> {
        let shell_response = self.invoker.execute(&flat_probe(url)).await?;
        let mut playlist = metadata::parse_playlist_shell(url, &shell_response.stdout)?;

        let dump_request = Request::builder().url(url).flag("--dump-json").build();
        let dump_response = self.invoker.execute(&dump_request).await?;
        playlist.entries = metadata::parse_video_documents(url, &dump_response.stdout)?;
        Ok(playlist)
    }

    /// Whether the URL resolves to a playlist. Costs a metadata probe.
    pub async fn is_playlist(&self, url: &str) -> Result<bool, DownloadError> {
        let response = self.invoker.execute(&flat_probe(url)).await?;
        Ok(metadata::output_is_playlist(&response.stdout)?)
    }

    /// Downloads a single video in the given container format.
    pub async fn download_video(
        &self,
        url: &str,
        dir: &Path,
        format: VideoFormat,
        hooks: DownloadHooks,
    ) -> Result<DownloadedArtifact, DownloadError> {
        self.download_media(url, dir, None, MediaFormat::Video(format), hooks)
            .await
    }

    /// Downloads a single video's audio track in the given format.
    pub async fn download_audio(
        &self,
        url: &str,
        dir: &Path,
        format: AudioFormat,
        hooks: DownloadHooks,
    ) -> Result<DownloadedArtifact, DownloadError> {
        self.download_media(url, dir, None, MediaFormat::Audio(format), hooks)
            .await
    }

    /// Downloads every entry of a playlist as video, preserving playlist order.
    pub async fn download_playlist_video(
        &self,
        url: &str,
        dir: &Path,
        format: VideoFormat,
        hooks: DownloadHooks,
    ) -> Result<PlaylistResult, DownloadError> {
        self.download_playlist(url, dir, MediaFormat::Video(format), hooks)
            .await
    }

    /// Downloads every entry of a playlist as extracted audio, preserving
    /// playlist order.
    pub async fn download_playlist_audio(
        &self,
        url: &str,
        dir: &Path,
        format: AudioFormat,
        hooks: DownloadHooks,
    ) -> Result<PlaylistResult, DownloadError> {
        self.download_playlist(url, dir, MediaFormat::Audio(format), hooks)
            .await
    }

    /// Downloads a playlist into a URL-keyed map, for callers that only need
    /// lookup and no ordering.
    pub async fn download_playlist_keyed(
        &self,
        url: &str,
        dir: &Path,
        format: MediaFormat,
        hooks: DownloadHooks,
    ) -> Result<std::collections::HashMap<String, DownloadedArtifact>, DownloadError> {
        let (_, entries) = self.resolve_playlist(url, dir).await?;
        let tasks = self.entry_tasks(&entries, format, hooks);
        Ok(self.runner.run_keyed(tasks).await?)
    }

    /// Writes the video's thumbnail into the directory without downloading
    /// the media itself.
    pub async fn download_thumbnail(&self, url: &str, dir: &Path) -> Result<(), DownloadError> {
        let request = Request::builder()
            .url(url)
            .working_dir(dir)
            .flag("--skip-download")
            .flag("--write-thumbnail")
            .option("--output", "%(title)s.%(ext)s")
            .build();
        self.invoker.execute(&request).await?;
        Ok(())
    }

    pub(crate) async fn download_playlist(
        &self,
        url: &str,
        dir: &Path,
        format: MediaFormat,
        hooks: DownloadHooks,
    ) -> Result<PlaylistResult, DownloadError> {
        let (playlist, entries) = self.resolve_playlist(url, dir).await?;
        let tasks = self.entry_tasks(&entries, format, hooks);
        let downloaded = self.runner.run_ordered(tasks).await?;
        Ok(PlaylistResult {
            playlist: playlist.core,
            entries: downloaded,
        })
    }

    pub(crate) async fn download_media(
        &self,
        url: &str,
        dir: &Path,
        file_stem: Option<&str>,
        format: MediaFormat,
        hooks: DownloadHooks,
    ) -> Result<DownloadedArtifact, DownloadError> {
        let info = self.video_info(url).await?;

        let template = file_stem.unwrap_or(self.config.download.output_template.as_str());
        let mut builder = Request::builder()
            .url(url)
            .working_dir(dir)
            .option("--output", format!("{template}.{}", format.extension()))
            .hooks(hooks);
        if let MediaFormat::Audio(audio) = format {
            builder = builder
                .flag("--extract-audio")
                .option("--audio-format", audio.audio_format_arg());
        }

        let response = self.invoker.execute(&builder.build()).await?;
        let resolved =
            resolve_artifact_path(&response.stdout, dir, &info.core.title, format.extension());
        Ok(DownloadedArtifact {
            file_path: resolved.path,
            metadata: VideoMetadata::Full(info),
        })
    }

    async fn resolve_playlist(
        &self,
        url: &str,
        dir: &Path,
    ) -> Result<(PlaylistInfo, Vec<(String, PathBuf)>), DownloadError> {
        let playlist = self.playlist_info(url).await?;

        let mut dir = dir.to_path_buf();
        if self.config.download.playlist_subdirectory {
            if let Some(title) = &playlist.core.title {
                dir = dir.join(title);
            }
        }
        tokio::fs::create_dir_all(&dir).await?;
        info!(count = playlist.entries.len(), "downloading playlist entries");

        let mut entries = Vec::with_capacity(playlist.entries.len());
        for entry in &playlist.entries {
            let entry_url = entry
                .source_url()
                .ok_or_else(|| MetadataError::not_found(&entry.core.id))?
                .to_string();
            entries.push((entry_url, dir.clone()));
        }
        Ok((playlist, entries))
    }

    fn entry_tasks(
        &self,
        entries: &[(String, PathBuf)],
        format: MediaFormat,
        hooks: DownloadHooks,
    ) -> Vec<(
        String,
        impl std::future::Future<Output = Result<DownloadedArtifact, DownloadError>> + Send + 'static,
    )> {
        entries
            .iter()
            .map(|(entry_url, entry_dir)| {
                let client = self.clone();
                let entry_url = entry_url.clone();
                let entry_dir = entry_dir.clone();
                let hooks = hooks.clone();
                let task_url = entry_url.clone();
                (task_url, async move {
                    client
                        .download_media(&entry_url, &entry_dir, None, format, hooks)
                        .await
                })
            })
            .collect()
    }
}

fn flat_probe(url: &str) -> Request {
    Request::builder()
        .url(url)
        .flag("--dump-single-json")
        .flag("--flat-playlist")
        .flag("--skip-download")
        .build()
}
