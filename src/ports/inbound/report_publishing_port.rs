use crate::report_publishing::domain::{PipelineOutcome, WebhookEvent};
use crate::shared::PipelineResult;
use async_trait::async_trait;

/// ReportPublishingPort - Inbound port for the event-to-publication pipeline
///
/// The webhook server hands every delivery to this port, decoded or not.
/// Implementations never fail: every problem ends up in the returned outcome.
#[async_trait]
pub trait ReportPublishingPort: Send + Sync {
    /// Handles the result of decoding one delivery
    async fn handle_delivery(&self, decoded: PipelineResult<WebhookEvent>) -> PipelineOutcome;

    /// Runs the pipeline for an already decoded event
    async fn handle_event(&self, event: WebhookEvent) -> PipelineOutcome;
}
