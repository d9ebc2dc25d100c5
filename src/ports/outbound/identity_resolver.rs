use crate::report_publishing::domain::ApplicationIdentity;
use crate::shared::PipelineResult;
use async_trait::async_trait;

/// IdentityResolver port for mapping an internal owner id to a public application
///
/// Implementations must be `Send + Sync`; one instance serves every concurrent
/// webhook delivery.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves the application behind an evaluation's owner id
    ///
    /// # Errors
    /// - `LookupFailed` if the call errors or returns a non-success status
    /// - `EmptyResponse` if the call succeeds without a usable application record
    async fn resolve(&self, owner_id: &str) -> PipelineResult<ApplicationIdentity>;
}
