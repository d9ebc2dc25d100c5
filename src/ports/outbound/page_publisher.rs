use crate::report_publishing::domain::{PageDraft, PublishedPage};
use crate::shared::PipelineResult;
use async_trait::async_trait;

/// PagePublisher port for creating pages on the wiki
#[async_trait]
pub trait PagePublisher: Send + Sync {
    /// Creates a new page from the draft
    ///
    /// # Errors
    /// Returns `PublishFailed` on any transport or API error. Page creation is
    /// atomic from the caller's point of view; nothing is rolled back.
    async fn publish(&self, draft: &PageDraft) -> PipelineResult<PublishedPage>;
}
