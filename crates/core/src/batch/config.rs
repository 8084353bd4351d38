//! Configuration for the batch module.

use serde::{Deserialize, Serialize};

/// Configuration for the concurrent batch runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of invocations running at once. Defaults to the
    /// host's available parallelism.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,

    /// Grace period granted to in-flight workers once the batch outcome is
    /// decided; workers still running at the deadline are aborted with a
    /// warning.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,
}

fn default_max_parallel() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_shutdown_grace() -> u64 {
    60
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_parallel: default_max_parallel(),
            shutdown_grace_secs: default_shutdown_grace(),
        }
    }
}

impl BatchConfig {
    /// Sets the maximum number of concurrent workers.
    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.max_parallel = max;
        self
    }

    /// Sets the shutdown grace period in seconds.
    pub fn with_shutdown_grace(mut self, secs: u64) -> Self {
        self.shutdown_grace_secs = secs;
        self
    }
}
