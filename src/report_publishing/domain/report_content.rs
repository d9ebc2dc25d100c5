use super::lenient::null_as_default;
use serde::{Deserialize, Serialize};

/// Policy violation report as returned by a stage's `reportDataUrl`.
///
/// Every field defaults when absent or `null`, and unknown fields are
/// ignored, since IQ Server adds fields between releases. Field names
/// serialize in the same camelCase form they arrive in, which is also what
/// templates see.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportContent {
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<Component>,
    #[serde(deserialize_with = "null_as_default")]
    pub match_summary: MatchSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Component {
    pub hash: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub component_identifier: ComponentIdentifier,
    #[serde(deserialize_with = "null_as_default")]
    pub proprietary: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub match_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pathnames: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub license_data: LicenseData,
    #[serde(deserialize_with = "null_as_default")]
    pub security_data: SecurityData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentIdentifier {
    #[serde(deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(deserialize_with = "null_as_default")]
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Coordinates {
    #[serde(deserialize_with = "null_as_default")]
    pub group_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub artifact_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub classifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub extension: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseData {
    #[serde(deserialize_with = "null_as_default")]
    pub declared_licenses: Vec<License>,
    #[serde(deserialize_with = "null_as_default")]
    pub observed_licenses: Vec<License>,
    #[serde(deserialize_with = "null_as_default")]
    pub overridden_licenses: Vec<License>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub effective_license_threats: Vec<LicenseThreat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct License {
    #[serde(deserialize_with = "null_as_default")]
    pub license_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub license_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseThreat {
    #[serde(deserialize_with = "null_as_default")]
    pub license_threat_group_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub license_threat_group_level: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub license_threat_group_category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityData {
    #[serde(deserialize_with = "null_as_default")]
    pub security_issues: Vec<SecurityIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityIssue {
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub threat_category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub total_component_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub known_component_count: u64,
}

impl ReportContent {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn security_issue_count(&self) -> usize {
        self.components
            .iter()
            .map(|c| c.security_data.security_issues.len())
            .sum()
    }
}

impl Component {
    /// Aggregate license threat level: the highest effective threat group level,
    /// or 0 when no threat applies.
    pub fn license_threat_level(&self) -> i32 {
        self.license_data
            .effective_license_threats
            .iter()
            .map(|t| t.license_threat_group_level)
            .max()
            .unwrap_or(0)
    }
}

/// Context stitched onto a fetched report before rendering.
/// None of these fields come from the report payload itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub report_link: String,
    pub stage: String,
    pub app_name: String,
}

/// A fetched report together with its [`ReportContext`].
///
/// Only [`augment`] builds one, and renderers only accept this type, so every
/// rendered report has been augmented exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AugmentedReport {
    #[serde(flatten)]
    content: ReportContent,
    report_link: String,
    stage: String,
    app_name: String,
}

impl AugmentedReport {
    pub fn content(&self) -> &ReportContent {
        &self.content
    }

    pub fn report_link(&self) -> &str {
        &self.report_link
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

/// Combines a fetched report with its context, consuming both.
pub fn augment(content: ReportContent, context: ReportContext) -> AugmentedReport {
    AugmentedReport {
        content,
        report_link: context.report_link,
        stage: context.stage,
        app_name: context.app_name,
    }
}
