//! Trait definitions for the exec module.

use async_trait::async_trait;

use super::error::ExecError;
use super::types::{Request, Response};

/// An invoker that can run the wrapped executable for one request.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Returns the name of this invoker implementation.
    fn name(&self) -> &str;

    /// Runs one invocation to completion.
    ///
    /// The request is read-only input; a [`Response`] is returned only for
    /// exit code 0, every other outcome raises an [`ExecError`].
    async fn execute(&self, request: &Request) -> Result<Response, ExecError>;

    /// Validates that the wrapped executable is available.
    async fn validate(&self) -> Result<(), ExecError>;
}
