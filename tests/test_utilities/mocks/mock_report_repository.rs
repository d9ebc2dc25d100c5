use async_trait::async_trait;
use iq_confluence_bridge::prelude::*;
use iq_confluence_bridge::report_publishing::domain::{select_stage, ReportLocationCandidate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ReportLocator and ReportFetcher for testing
///
/// Locating scans the registered candidates the same way the IQ adapter
/// does; fetching returns the content registered for a data URL.
#[derive(Clone)]
pub struct MockReportRepository {
    pub candidates: HashMap<String, Vec<ReportLocationCandidate>>,
    pub reports: HashMap<String, ReportContent>,
    locate_calls: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockReportRepository {
    pub fn new() -> Self {
        Self {
            candidates: HashMap::new(),
            reports: HashMap::new(),
            locate_calls: Arc::default(),
            fetch_calls: Arc::default(),
        }
    }

    pub fn with_stage(mut self, owner_id: &str, stage: &str, data_url: &str, html_url: &str) -> Self {
        self.candidates
            .entry(owner_id.to_string())
            .or_default()
            .push(ReportLocationCandidate {
                stage: stage.to_string(),
                report_data_url: data_url.to_string(),
                report_html_url: html_url.to_string(),
            });
        self
    }

    pub fn with_report(mut self, data_url: &str, report_json: &str) -> Self {
        let content: ReportContent =
            serde_json::from_str(report_json).expect("valid report fixture");
        self.reports.insert(data_url.to_string(), content);
        self
    }

    pub fn locate_calls(&self) -> usize {
        self.locate_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockReportRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportLocator for MockReportRepository {
    async fn locate(&self, owner_id: &str, stage: &str) -> PipelineResult<ReportLocation> {
        self.locate_calls.fetch_add(1, Ordering::SeqCst);

        let candidates = self.candidates.get(owner_id).map(Vec::as_slice).unwrap_or(&[]);
        select_stage(candidates, stage).ok_or_else(|| PipelineError::StageNotFound {
            owner_id: owner_id.to_string(),
            stage: stage.to_string(),
        })
    }
}

#[async_trait]
impl ReportFetcher for MockReportRepository {
    async fn fetch(&self, data_url: &str) -> PipelineResult<ReportContent> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        self.reports.get(data_url).cloned().ok_or_else(|| PipelineError::LookupFailed {
            url: data_url.to_string(),
            reason: "server returned status 404 Not Found".to_string(),
        })
    }
}
