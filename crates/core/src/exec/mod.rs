//! Process execution for the wrapped yt-dlp executable.
//!
//! This module owns the subprocess protocol: building the argument vector
//! from a frozen [`Request`], spawning the child, draining both of its
//! output streams concurrently (stdout additionally feeds the progress
//! parser), and turning the exit status into a [`Response`] or a typed
//! [`ExecError`].
//!
//! # Example
//!
//! ```ignore
//! use tubeferry_core::exec::{ExecConfig, Invoker, Request, YtDlpInvoker};
//!
//! let invoker = YtDlpInvoker::with_defaults();
//! let request = Request::builder()
//!     .url("https://youtube.com/watch?v=abc")
//!     .flag("--no-playlist")
//!     .option("--output", "%(title)s.mp4")
//!     .build();
//!
//! let response = invoker.execute(&request).await?;
//! println!("done in {} ms", response.elapsed_ms);
//! ```

mod config;
mod drain;
mod error;
mod invoker;
mod traits;
mod types;

pub use config::ExecConfig;
pub use error::ExecError;
pub use invoker::YtDlpInvoker;
pub use traits::Invoker;
pub use types::{Request, RequestBuilder, Response};
