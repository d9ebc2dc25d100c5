use super::rendered_document::PublishedPage;
use super::webhook_event::EventKind;
use crate::shared::error::PipelineError;
use std::fmt;

/// Steps of the event-to-publication pipeline, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStage {
    Received,
    Decoded,
    IdentityResolved,
    Located,
    Fetched,
    Rendered,
    Published,
}

impl PipelineStage {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::Received => "Received",
            PipelineStage::Decoded => "Decoded",
            PipelineStage::IdentityResolved => "IdentityResolved",
            PipelineStage::Located => "Located",
            PipelineStage::Fetched => "Fetched",
            PipelineStage::Rendered => "Rendered",
            PipelineStage::Published => "Published",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal state of one pipeline run.
///
/// `Failed::stage` is the stage the pipeline was trying to reach when the
/// error happened.
#[derive(Debug)]
pub enum PipelineOutcome {
    Published(PublishedPage),
    Skipped(EventKind),
    Failed {
        stage: PipelineStage,
        error: PipelineError,
    },
}

impl PipelineOutcome {
    pub fn failed(stage: PipelineStage, error: PipelineError) -> Self {
        PipelineOutcome::Failed { stage, error }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PipelineOutcome::Published(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, PipelineOutcome::Skipped(_))
    }

    /// Stage and error of a failed run
    pub fn failure(&self) -> Option<(PipelineStage, &PipelineError)> {
        match self {
            PipelineOutcome::Failed { stage, error } => Some((*stage, error)),
            _ => None,
        }
    }
}
