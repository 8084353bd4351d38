//! Configuration for the download module.

use serde::{Deserialize, Serialize};

/// Configuration for the high-level download client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Output name template handed to yt-dlp when the caller does not name
    /// the file explicitly.
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Whether playlist downloads go into a subdirectory named after the
    /// playlist.
    #[serde(default)]
    pub playlist_subdirectory: bool,
}

fn default_output_template() -> String {
    "%(title)s".to_string()
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_template: default_output_template(),
            playlist_subdirectory: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DownloadConfig::default();
        assert_eq!(config.output_template, "%(title)s");
        assert!(!config.playlist_subdirectory);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: DownloadConfig = toml::from_str("").unwrap();
        assert_eq!(config.output_template, "%(title)s");
    }
}
