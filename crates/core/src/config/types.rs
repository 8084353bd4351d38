use serde::{Deserialize, Serialize};

use crate::batch::BatchConfig;
use crate::download::DownloadConfig;
use crate::exec::ExecConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub exec: ExecConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.exec.executable, PathBuf::from("yt-dlp"));
        assert!(config.batch.max_parallel >= 1);
        assert_eq!(config.download.output_template, "%(title)s");
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let toml = r#"
[exec]
executable = "/opt/yt-dlp/yt-dlp"

[batch]
max_parallel = 3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.exec.executable, PathBuf::from("/opt/yt-dlp/yt-dlp"));
        assert_eq!(config.batch.max_parallel, 3);
        // Untouched sections keep their defaults.
        assert_eq!(config.batch.shutdown_grace_secs, 60);
        assert!(!config.download.playlist_subdirectory);
    }

    #[test]
    fn test_deserialize_download_section() {
        let toml = r#"
[download]
output_template = "%(uploader)s - %(title)s"
playlist_subdirectory = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.download.output_template, "%(uploader)s - %(title)s");
        assert!(config.download.playlist_subdirectory);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let rendered = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.exec.executable, config.exec.executable);
        assert_eq!(parsed.batch.max_parallel, config.batch.max_parallel);
    }
}
