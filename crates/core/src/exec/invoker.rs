//! yt-dlp process invoker.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::progress::ProgressParser;

use super::config::ExecConfig;
use super::drain::{spawn_stderr_drainer, spawn_stdout_drainer};
use super::error::ExecError;
use super::traits::Invoker;
use super::types::{Request, Response};

/// Invoker running the real yt-dlp executable.
pub struct YtDlpInvoker {
    config: ExecConfig,
}

impl YtDlpInvoker {
    /// Creates a new invoker with the given configuration.
    pub fn new(config: ExecConfig) -> Self {
        Self { config }
    }

    /// Creates an invoker with default configuration (`yt-dlp` on PATH).
    pub fn with_defaults() -> Self {
        Self::new(ExecConfig::default())
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }
}

#[async_trait]
impl Invoker for YtDlpInvoker {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn execute(&self, request: &Request) -> Result<Response, ExecError> {
        let args = request.args();
        let executable = self.config.executable.display().to_string();
        let command_line = if args.is_empty() {
            executable.clone()
        } else {
            format!("{} {}", executable, args.join(" "))
        };
        debug!(command = %command_line, "spawning yt-dlp");

        // The argument vector goes to the OS exec call as-is; nothing is ever
        // routed through a shell.
        let mut command = Command::new(&self.config.executable);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let working_dir = request
            .working_dir()
            .map(|d| d.to_path_buf())
            .or_else(|| self.config.working_dir.clone());
        if let Some(dir) = &working_dir {
            command.current_dir(dir);
        }

        let start = Instant::now();
        let mut child = command.spawn().map_err(|source| ExecError::Spawn {
            executable: executable.clone(),
            source,
        })?;

        let stdout = child.stdout.take().expect("stdout should be captured");
        let stderr = child.stderr.take().expect("stderr should be captured");

        // Both readers start immediately; the hooks snapshot taken here is
        // the one this invocation keeps for its whole lifetime.
        let parser = ProgressParser::new(request.hooks().clone());
        let stdout_task = spawn_stdout_drainer(stdout, parser);
        let stderr_task = spawn_stderr_drainer(stderr);

        // Drain both streams to end-of-file before reading the exit status;
        // the reverse order can lose trailing buffered output.
        let stdout_text = stdout_task.await?;
        let stderr_text = stderr_task.await?;
        let status = child.wait().await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let exit_code = status.code().unwrap_or(-1);
        if !status.success() {
            return Err(ExecError::Process {
                exit_code,
                stderr: stderr_text,
            });
        }

        Ok(Response {
            command_line,
            options: request.options().to_vec(),
            working_dir,
            exit_code,
            elapsed_ms,
            stdout: stdout_text,
            stderr: stderr_text,
        })
    }

    async fn validate(&self) -> Result<(), ExecError> {
        let request = Request::builder().flag("--version").build();
        self.execute(&request).await.map(|_| ())
    }
}
