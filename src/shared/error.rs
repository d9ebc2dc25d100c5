use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Server shut down cleanly
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config error, bind failure, client construction, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the event-to-publication pipeline.
///
/// Every pipeline step returns one of these to the coordinator, which records
/// the stage it failed at and discards the event. None of them reach the
/// webhook sender.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Webhook event not recognized: {event}")]
    EventNotRecognized { event: String },

    #[error("Malformed webhook payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Lookup failed for {url}\nDetails: {reason}")]
    LookupFailed { url: String, reason: String },

    #[error("Failed to decode response from {url}\nDetails: {reason}")]
    DecodeFailed { url: String, reason: String },

    #[error("No application record returned for owner id '{owner_id}'")]
    EmptyResponse { owner_id: String },

    #[error("Stage '{stage}' not found in reports for owner id '{owner_id}'")]
    StageNotFound { owner_id: String, stage: String },

    #[error("Failed to render report\nDetails: {reason}")]
    RenderFailed { reason: String },

    #[error("Failed to publish page '{title}'\nDetails: {reason}")]
    PublishFailed { title: String, reason: String },
}

impl PipelineError {
    /// Short, stable name of the error variant, used in log lines and outcomes
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::EventNotRecognized { .. } => "EventNotRecognized",
            PipelineError::MalformedPayload { .. } => "MalformedPayload",
            PipelineError::LookupFailed { .. } => "LookupFailed",
            PipelineError::DecodeFailed { .. } => "DecodeFailed",
            PipelineError::EmptyResponse { .. } => "EmptyResponse",
            PipelineError::StageNotFound { .. } => "StageNotFound",
            PipelineError::RenderFailed { .. } => "RenderFailed",
            PipelineError::PublishFailed { .. } => "PublishFailed",
        }
    }

    pub(crate) fn lookup(url: &str, reason: impl fmt::Display) -> Self {
        PipelineError::LookupFailed {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decode(url: &str, reason: impl fmt::Display) -> Self {
        PipelineError::DecodeFailed {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
