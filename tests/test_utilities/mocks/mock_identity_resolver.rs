use async_trait::async_trait;
use iq_confluence_bridge::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock IdentityResolver for testing
///
/// Owner ids without a registered identity resolve to `EmptyResponse`.
#[derive(Clone)]
pub struct MockIdentityResolver {
    pub identities: HashMap<String, ApplicationIdentity>,
    pub should_fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockIdentityResolver {
    pub fn new() -> Self {
        Self {
            identities: HashMap::new(),
            should_fail: false,
            calls: Arc::default(),
        }
    }

    pub fn with_identity(mut self, owner_id: &str, public_id: &str, name: &str) -> Self {
        let identity = ApplicationIdentity::new(public_id, name).expect("non-blank public id");
        self.identities.insert(owner_id.to_string(), identity);
        self
    }

    /// Every lookup fails as if IQ Server answered 404
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

impl Default for MockIdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityResolver for MockIdentityResolver {
    async fn resolve(&self, owner_id: &str) -> PipelineResult<ApplicationIdentity> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(PipelineError::LookupFailed {
                url: format!("http://iq/api/v2/applications/{}", owner_id),
                reason: "server returned status 404 Not Found".to_string(),
            });
        }

        self.identities
            .get(owner_id)
            .cloned()
            .ok_or_else(|| PipelineError::EmptyResponse {
                owner_id: owner_id.to_string(),
            })
    }
}
