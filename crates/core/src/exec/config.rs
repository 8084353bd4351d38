//! Configuration for the exec module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the yt-dlp invoker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Name or path of the yt-dlp executable, resolved via PATH when bare.
    #[serde(default = "default_executable")]
    pub executable: PathBuf,

    /// Default working directory for invocations that do not set their own.
    /// `None` inherits the calling process's working directory.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

fn default_executable() -> PathBuf {
    PathBuf::from("yt-dlp")
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            working_dir: None,
        }
    }
}

impl ExecConfig {
    /// Creates a config with a custom executable path.
    pub fn with_executable(executable: PathBuf) -> Self {
        Self {
            executable,
            ..Default::default()
        }
    }

    /// Sets the default working directory.
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }
}
