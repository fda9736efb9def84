#![forbid(unsafe_code)]

//! Runtime engine for HTTP request sequences.
//!
//! Loading and validating the config lives in `apiseq-core`; this crate resolves
//! placeholders, gates nodes on conditions, sends requests and validates responses.

pub mod executor;

pub use crate::executor::{Executor, ExecutorConfig, RunOptions, SequenceResult};
