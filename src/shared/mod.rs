/// Shared kernel: error types, result aliases and file helpers used across layers
pub mod error;
pub mod file_guard;
pub mod result;

pub use result::{PipelineResult, Result};
