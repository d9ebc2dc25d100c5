use crate::report_publishing::domain::{AugmentedReport, RenderedDocument};
use crate::shared::PipelineResult;

/// ReportRenderer port for turning a report into wiki markup
///
/// Rendering is a pure transformation: the same report and template always
/// produce the same document.
pub trait ReportRenderer: Send + Sync {
    /// # Errors
    /// Returns `RenderFailed` if the template cannot be loaded or merged.
    /// No partial output is returned.
    fn render(&self, report: &AugmentedReport) -> PipelineResult<RenderedDocument>;
}
