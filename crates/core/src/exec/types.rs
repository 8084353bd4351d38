//! Request and response types for the exec module.

use std::path::{Path, PathBuf};

use crate::progress::DownloadHooks;

/// One invocation request: URL, working directory, command-line options and
/// event hooks.
///
/// Built once via [`Request::builder`] and frozen; serializing the argument
/// vector never mutates the request, so a request can be cloned and reused
/// across invocations.
#[derive(Debug, Clone, Default)]
pub struct Request {
    url: Option<String>,
    working_dir: Option<PathBuf>,
    options: Vec<(String, Option<String>)>,
    hooks: DownloadHooks,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// The option set in insertion order. A `None` value is a boolean flag.
    pub fn options(&self) -> &[(String, Option<String>)] {
        &self.options
    }

    pub fn hooks(&self) -> &DownloadHooks {
        &self.hooks
    }

    /// Renders the argument vector: the URL (if set) as a single token,
    /// then each option as one token (flag) or two tokens (flag + value).
    ///
    /// Keys and values are whitespace-tokenized with empty tokens collapsed,
    /// so irregular whitespace in inputs never produces empty arguments in
    /// the OS exec call.
    pub fn args(&self) -> Vec<String> {
        let mut tokens = Vec::new();

        if let Some(url) = &self.url {
            let url = url.trim();
            if !url.is_empty() {
                tokens.push(url.to_string());
            }
        }

        for (key, value) in &self.options {
            tokens.extend(key.split_whitespace().map(String::from));
            if let Some(value) = value {
                tokens.extend(value.split_whitespace().map(String::from));
            }
        }

        tokens
    }
}

/// Builder producing a frozen [`Request`].
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    url: Option<String>,
    working_dir: Option<PathBuf>,
    options: Vec<(String, Option<String>)>,
    hooks: DownloadHooks,
}

impl RequestBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Adds a boolean flag with no argument.
    pub fn flag(self, key: impl Into<String>) -> Self {
        self.insert(key.into(), None)
    }

    /// Adds a valued option.
    pub fn option(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        self.insert(key.into(), Some(value))
    }

    pub fn hooks(mut self, hooks: DownloadHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> Request {
        Request {
            url: self.url,
            working_dir: self.working_dir,
            options: self.options,
            hooks: self.hooks,
        }
    }

    // Option keys are unique; re-adding a key overwrites the value in place,
    // preserving the original insertion position.
    fn insert(mut self, key: String, value: Option<String>) -> Self {
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.options.push((key, value)),
        }
        self
    }
}

/// The outcome of one successful invocation. Constructed exactly once, after
/// process exit, and immutable from then on.
#[derive(Debug, Clone)]
pub struct Response {
    /// The full command line that was run, space-joined for display.
    pub command_line: String,
    /// Snapshot of the options the invocation used.
    pub options: Vec<(String, Option<String>)>,
    /// The working directory the subprocess ran in, if overridden.
    pub working_dir: Option<PathBuf>,
    /// The process exit code; always 0 here, non-zero exits raise instead.
    pub exit_code: i32,
    /// Wall-clock duration of the invocation in milliseconds.
    pub elapsed_ms: u64,
    /// Full captured standard output.
    pub stdout: String,
    /// Full captured standard error.
    pub stderr: String,
}
