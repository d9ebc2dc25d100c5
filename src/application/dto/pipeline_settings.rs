/// PipelineSettings - Static settings the publish-report use case runs with
///
/// Built once from configuration; every pipeline run reads it, none mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// IQ Server base URL used to build absolute report links
    pub report_base_url: String,
    /// Key of the wiki space pages are created in
    pub space_key: String,
    /// Page new reports are nested under; `None` creates them at the space root
    pub parent_page_id: Option<String>,
    /// Log full context (owner ids, payloads) for each run
    pub verbose: bool,
}

impl PipelineSettings {
    pub fn new(report_base_url: impl Into<String>, space_key: impl Into<String>) -> Self {
        Self {
            report_base_url: report_base_url.into(),
            space_key: space_key.into(),
            parent_page_id: None,
            verbose: false,
        }
    }

    pub fn with_parent_page_id(mut self, parent_page_id: Option<String>) -> Self {
        self.parent_page_id = parent_page_id.filter(|id| !id.trim().is_empty());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Absolute link to a report's HTML view
    pub fn report_link(&self, html_url: &str) -> String {
        if html_url.starts_with("http://") || html_url.starts_with("https://") {
            return html_url.to_string();
        }
        format!(
            "{}/{}",
            self.report_base_url.trim_end_matches('/'),
            html_url.trim_start_matches('/')
        )
    }
}
