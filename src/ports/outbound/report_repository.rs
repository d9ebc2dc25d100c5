use crate::report_publishing::domain::{ReportContent, ReportLocation};
use crate::shared::PipelineResult;
use async_trait::async_trait;

/// ReportLocator port for finding a stage's report links
#[async_trait]
pub trait ReportLocator: Send + Sync {
    /// Finds the report for `stage` among the application's reports
    ///
    /// # Errors
    /// - `LookupFailed` on transport or status errors
    /// - `DecodeFailed` if the report list cannot be decoded
    /// - `StageNotFound` if no report exists for the stage
    async fn locate(&self, owner_id: &str, stage: &str) -> PipelineResult<ReportLocation>;
}

/// ReportFetcher port for downloading the structured report payload
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    /// Fetches the report behind a server-relative data URL
    ///
    /// # Errors
    /// - `LookupFailed` on transport or status errors
    /// - `DecodeFailed` if the body is not a report
    async fn fetch(&self, data_url: &str) -> PipelineResult<ReportContent>;
}
