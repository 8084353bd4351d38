pub mod artifact;
pub mod batch;
pub mod config;
pub mod download;
pub mod exec;
pub mod metadata;
pub mod progress;

pub use artifact::{resolve_artifact_path, ResolvedArtifact, ResolvedVia};
pub use batch::{BatchConfig, BatchError, BatchRunner};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError,
};
pub use download::{
    AudioFormat, DownloadBuilder, DownloadConfig, DownloadError, DownloadOutcome,
    DownloadedArtifact, MediaFormat, PlaylistResult, VideoFormat, YtDlp,
};
pub use exec::{ExecConfig, ExecError, Invoker, Request, RequestBuilder, Response, YtDlpInvoker};
pub use metadata::{
    MetadataError, PlaylistInfo, PlaylistPreviewInfo, VideoInfo, VideoMetadata, VideoPreviewInfo,
};
pub use progress::{DownloadHooks, ProgressEvent, ProgressParser};
