use async_trait::async_trait;
use iq_confluence_bridge::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock PagePublisher for testing
///
/// Records every draft it receives; clones share the record.
#[derive(Clone)]
pub struct MockPagePublisher {
    pub drafts: Arc<Mutex<Vec<PageDraft>>>,
    pub should_fail: bool,
}

impl MockPagePublisher {
    pub fn new() -> Self {
        Self {
            drafts: Arc::default(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn published(&self) -> Vec<PageDraft> {
        self.drafts.lock().unwrap().clone()
    }
}

impl Default for MockPagePublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PagePublisher for MockPagePublisher {
    async fn publish(&self, draft: &PageDraft) -> PipelineResult<PublishedPage> {
        if self.should_fail {
            return Err(PipelineError::PublishFailed {
                title: draft.title.clone(),
                reason: "Confluence returned status 403 Forbidden".to_string(),
            });
        }

        let mut drafts = self.drafts.lock().unwrap();
        drafts.push(draft.clone());
        Ok(PublishedPage {
            id: format!("{}", 1000 + drafts.len()),
            title: draft.title.clone(),
        })
    }
}
