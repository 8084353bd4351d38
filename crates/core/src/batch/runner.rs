//! Concurrent batch runner.
//!
//! Executes a set of independent invocation tasks with bounded worker
//! parallelism. All tasks are submitted eagerly; the first task failure
//! fails the whole batch with no partial result. Siblings still in flight
//! when the outcome is decided get a bounded grace period, then are aborted
//! with a warning. Their subprocesses are not guaranteed to be terminated.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::warn;

use super::config::BatchConfig;

/// Error type for batch operations, wrapping the first task failure.
#[derive(Debug, Error)]
pub enum BatchError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// A task failed; the batch is failed with it.
    #[error("batch task {key} failed: {source}")]
    Task {
        key: String,
        #[source]
        source: E,
    },

    /// A worker was cancelled or panicked before producing a result.
    #[error("batch worker aborted: {reason}")]
    Aborted { reason: String },
}

/// Runs batches of independent async tasks with a bounded worker pool.
///
/// Clones share the same semaphore, so the parallelism bound holds across
/// every batch started from the same runner.
#[derive(Clone)]
pub struct BatchRunner {
    config: BatchConfig,
    semaphore: Arc<Semaphore>,
}

impl BatchRunner {
    /// Creates a runner with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_parallel.max(1)));
        Self { config, semaphore }
    }

    /// Creates a runner sized to the host's available parallelism.
    pub fn with_defaults() -> Self {
        Self::new(BatchConfig::default())
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Runs all tasks and returns their results in submission order.
    ///
    /// Each task is a `(key, future)` pair; the key identifies the task in
    /// failure reports. Completion order is arbitrary, the original index is
    /// carried with each task to reconstruct submission order.
    pub async fn run_ordered<T, E, Fut>(
        &self,
        tasks: Vec<(String, Fut)>,
    ) -> Result<Vec<T>, BatchError<E>>
    where
        T: Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let mut results = self.run_inner(tasks).await?;
        results.sort_by_key(|(index, _, _)| *index);
        Ok(results.into_iter().map(|(_, _, value)| value).collect())
    }

    /// Runs all tasks and returns a key-to-result map, for consumers that
    /// only need lookup-by-key and no ordering.
    pub async fn run_keyed<T, E, Fut>(
        &self,
        tasks: Vec<(String, Fut)>,
    ) -> Result<HashMap<String, T>, BatchError<E>>
    where
        T: Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let results = self.run_inner(tasks).await?;
        Ok(results
            .into_iter()
            .map(|(_, key, value)| (key, value))
            .collect())
    }

    async fn run_inner<T, E, Fut>(
        &self,
        tasks: Vec<(String, Fut)>,
    ) -> Result<Vec<(usize, String, T)>, BatchError<E>>
    where
        T: Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let mut workers: JoinSet<(usize, String, Result<T, E>)> = JoinSet::new();

        for (index, (key, task)) in tasks.into_iter().enumerate() {
            let semaphore = Arc::clone(&self.semaphore);
            workers.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("batch semaphore closed");
                (index, key, task.await)
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((index, key, Ok(value))) => results.push((index, key, value)),
                Ok((_, key, Err(source))) => {
                    self.drain_with_grace(&mut workers).await;
                    return Err(BatchError::Task { key, source });
                }
                Err(join_error) => {
                    self.drain_with_grace(&mut workers).await;
                    return Err(BatchError::Aborted {
                        reason: join_error.to_string(),
                    });
                }
            }
        }

        Ok(results)
    }

    /// Lets in-flight siblings run out the grace period, then aborts the
    /// stragglers. A missed deadline is surfaced as a warning, never as a
    /// batch failure.
    async fn drain_with_grace<T: 'static>(&self, workers: &mut JoinSet<T>) {
        if workers.is_empty() {
            return;
        }
        let grace = Duration::from_secs(self.config.shutdown_grace_secs);
        let drained = timeout(grace, async {
            while workers.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            warn!(
                remaining = workers.len(),
                grace_secs = self.config.shutdown_grace_secs,
                "batch workers still running at grace deadline, aborting"
            );
            workers.abort_all();
        }
    }
}
