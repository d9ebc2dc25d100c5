use super::lenient::null_as_default;
use serde::Deserialize;

/// One entry of `GET /api/v2/reports/applications/{ownerId}`
///
/// Missing or `null` fields decode as empty strings so one incomplete entry
/// does not hide the others.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportLocationCandidate {
    #[serde(deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub report_data_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub report_html_url: String,
}

/// Links to the data and HTML views of a single stage report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLocation {
    pub data_url: String,
    pub html_url: String,
}

/// Picks the first candidate whose stage matches exactly and that has a
/// data URL.
///
/// Matching is case sensitive and does not trim; `"Build"` does not match `"build"`.
pub fn select_stage(candidates: &[ReportLocationCandidate], stage: &str) -> Option<ReportLocation> {
    candidates
        .iter()
        .filter(|candidate| candidate.stage == stage)
        .find(|candidate| !candidate.report_data_url.trim().is_empty())
        .map(|candidate| ReportLocation {
            data_url: candidate.report_data_url.clone(),
            html_url: candidate.report_html_url.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(stage: &str, id: &str) -> ReportLocationCandidate {
        ReportLocationCandidate {
            stage: stage.to_string(),
            report_data_url: format!("api/v2/applications/app/reports/{}", id),
            report_html_url: format!("ui/links/application/app/report/{}", id),
        }
    }

    #[test]
    fn test_selects_matching_stage() {
        let candidates = vec![candidate("build", "b1"), candidate("release", "r1")];
        let location = select_stage(&candidates, "release").unwrap();
        assert_eq!(location.data_url, "api/v2/applications/app/reports/r1");
        assert_eq!(location.html_url, "ui/links/application/app/report/r1");
    }

    #[test]
    fn test_missing_stage() {
        let candidates = vec![candidate("build", "b1"), candidate("release", "r1")];
        assert!(select_stage(&candidates, "stage").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let candidates = vec![candidate("build", "first"), candidate("build", "second")];
        let location = select_stage(&candidates, "build").unwrap();
        assert!(location.data_url.ends_with("first"));
    }

    #[test]
    fn test_match_is_exact() {
        let candidates = vec![candidate("Build", "b1"), candidate("build ", "b2")];
        assert!(select_stage(&candidates, "build").is_none());
    }

    #[test]
    fn test_empty_candidates() {
        assert!(select_stage(&[], "build").is_none());
    }

    #[test]
    fn test_incomplete_entry_before_requested_stage() {
        let candidates: Vec<ReportLocationCandidate> = serde_json::from_str(
            r#"[
                {"stage": "source", "reportHtmlUrl": "ui/s", "reportDataUrl": null},
                {"stage": "develop"},
                {"stage": "build", "reportHtmlUrl": "ui/b", "reportDataUrl": "api/b"}
            ]"#,
        )
        .unwrap();

        let location = select_stage(&candidates, "build").unwrap();
        assert_eq!(location.data_url, "api/b");
        assert_eq!(location.html_url, "ui/b");
    }

    #[test]
    fn test_matching_entry_without_data_url_is_not_selected() {
        let mut incomplete = candidate("build", "b1");
        incomplete.report_data_url = String::new();
        assert!(select_stage(&[incomplete.clone()], "build").is_none());

        let location = select_stage(&[incomplete, candidate("build", "b2")], "build").unwrap();
        assert!(location.data_url.ends_with("b2"));
    }

    #[test]
    fn test_candidate_decodes_with_extra_fields() {
        let candidates: Vec<ReportLocationCandidate> = serde_json::from_str(
            r#"[{
                "stage": "build",
                "applicationId": "abc123",
                "evaluationDate": "2024-05-01T10:00:00.000+0000",
                "latestReportHtmlUrl": "ui/links/application/app/latestReport/build",
                "reportHtmlUrl": "ui/links/application/app/report/xyz",
                "embeddableReportHtmlUrl": "ui/links/application/app/report/xyz/embeddable",
                "reportPdfUrl": "ui/links/application/app/report/xyz/pdf",
                "reportDataUrl": "api/v2/applications/app/reports/xyz"
            }]"#,
        )
        .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].report_html_url, "ui/links/application/app/report/xyz");
    }
}
