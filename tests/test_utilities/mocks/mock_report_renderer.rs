use iq_confluence_bridge::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ReportRenderer for testing
///
/// Produces a small storage-format document listing the context values and
/// the component count.
#[derive(Clone)]
pub struct MockReportRenderer {
    pub should_fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockReportRenderer {
    pub fn new() -> Self {
        Self {
            should_fail: false,
            calls: Arc::default(),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for MockReportRenderer {
    fn render(&self, report: &AugmentedReport) -> PipelineResult<RenderedDocument> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(PipelineError::RenderFailed {
                reason: "Mock renderer failure".to_string(),
            });
        }

        Ok(RenderedDocument::new(format!(
            "<h1>{}</h1><p>Stage: {}</p><p><a href=\"{}\">report</a></p><p>{} components</p>",
            report.app_name(),
            report.stage(),
            report.report_link(),
            report.content().component_count()
        )))
    }
}
