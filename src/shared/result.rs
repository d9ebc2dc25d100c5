use super::error::PipelineError;

/// Type alias for Result with anyhow::Error as the error type.
/// Used by startup code (configuration, CLI, server binding).
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Result of a single pipeline step. The error is always a typed [`PipelineError`]
/// so the coordinator can record which stage failed and why.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
