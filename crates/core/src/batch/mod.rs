//! Concurrent execution of independent invocations with bounded parallelism.

mod config;
mod runner;

pub use config::BatchConfig;
pub use runner::{BatchError, BatchRunner};
