use crate::ports::outbound::{IdentityResolver, ReportFetcher, ReportLocator};
use crate::report_publishing::domain::{
    select_stage, ApplicationIdentity, ReportContent, ReportLocation, ReportLocationCandidate,
    ServerConnection,
};
use crate::shared::error::PipelineError;
use crate::shared::{PipelineResult, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use serde::Deserialize;
use std::sync::Arc;

/// Application record from `GET /api/v2/applications/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationRecord {
    #[serde(default, alias = "publicid")]
    public_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// IqServerClient adapter for the IQ Server REST API
///
/// Implements the IdentityResolver, ReportLocator and ReportFetcher ports.
/// Every call is a single authenticated GET with no retry. When the server
/// requires CSRF protection, each call is preceded by a session handshake
/// and carries the resulting token as both a cookie and a header.
///
/// Cloning is cheap: the HTTP connection pool and the connection settings
/// are shared.
#[derive(Clone)]
pub struct IqServerClient {
    client: reqwest::Client,
    connection: Arc<ServerConnection>,
    verbose: bool,
}

impl IqServerClient {
    const SESSION_PATH: &'static str = "rest/user/session";
    const APPLICATIONS_PATH: &'static str = "api/v2/applications";
    const APPLICATION_REPORTS_PATH: &'static str = "api/v2/reports/applications";
    pub const CSRF_COOKIE: &'static str = "CLM-CSRF-TOKEN";
    pub const CSRF_HEADER: &'static str = "X-CSRF-TOKEN";

    /// Creates a client bound to one IQ Server
    pub fn new(connection: Arc<ServerConnection>, verbose: bool) -> Result<Self> {
        let user_agent = format!("iq-confluence-bridge/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(connection.request_timeout())
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            connection,
            verbose,
        })
    }

    pub fn connection(&self) -> &ServerConnection {
        &self.connection
    }

    fn authenticated(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let credentials = self.connection.credentials();
        request.basic_auth(credentials.username(), Some(credentials.password()))
    }

    /// Performs the session handshake and returns the CSRF token value.
    ///
    /// A successful handshake without the token cookie is an error: the
    /// dependent call must not go out unauthenticated.
    async fn session_token(&self) -> PipelineResult<String> {
        let url = self.connection.url_for(Self::SESSION_PATH);
        let response = self
            .authenticated(self.client.get(&url))
            .send()
            .await
            .map_err(|e| PipelineError::lookup(&url, e))?;

        if !response.status().is_success() {
            return Err(PipelineError::lookup(
                &url,
                format!("session handshake returned status {}", response.status()),
            ));
        }

        find_cookie(response.headers(), Self::CSRF_COOKIE).ok_or_else(|| {
            PipelineError::lookup(
                &url,
                format!(
                    "session handshake succeeded but returned no {} cookie",
                    Self::CSRF_COOKIE
                ),
            )
        })
    }

    /// Authenticated GET returning the raw body of a successful response
    async fn api_get(&self, url: &str) -> PipelineResult<Vec<u8>> {
        let mut request = self.authenticated(self.client.get(url));

        if self.connection.csrf_required() {
            let token = self.session_token().await?;
            request = request
                .header(COOKIE, format!("{}={}", Self::CSRF_COOKIE, token))
                .header(Self::CSRF_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PipelineError::lookup(url, e))?;

        if !response.status().is_success() {
            return Err(PipelineError::lookup(
                url,
                format!("server returned status {}", response.status()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PipelineError::lookup(url, e))?;
        Ok(body.to_vec())
    }

    fn log_payload(&self, what: &str, body: &[u8]) {
        if self.verbose {
            log::info!(
                "[iq] {} response payload: {}",
                what,
                String::from_utf8_lossy(body)
            );
        }
    }
}

#[async_trait]
impl IdentityResolver for IqServerClient {
    async fn resolve(&self, owner_id: &str) -> PipelineResult<ApplicationIdentity> {
        let url = self.connection.url_for(&format!(
            "{}/{}",
            Self::APPLICATIONS_PATH,
            urlencoding::encode(owner_id)
        ));
        if self.verbose {
            log::info!("[iq] Applications URL: {}", url);
        }

        let body = self.api_get(&url).await?;
        self.log_payload("Applications", &body);

        let empty = || PipelineError::EmptyResponse {
            owner_id: owner_id.to_string(),
        };

        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(empty());
        }

        let record: Option<ApplicationRecord> = match serde_json::from_slice(&body) {
            Ok(record) => record,
            Err(e) => {
                log::debug!("[iq] Undecodable application record from {}: {}", url, e);
                return Err(empty());
            }
        };

        record
            .and_then(|r| ApplicationIdentity::new(r.public_id?, r.name.unwrap_or_default()))
            .ok_or_else(empty)
    }
}

#[async_trait]
impl ReportLocator for IqServerClient {
    async fn locate(&self, owner_id: &str, stage: &str) -> PipelineResult<ReportLocation> {
        let url = self.connection.url_for(&format!(
            "{}/{}",
            Self::APPLICATION_REPORTS_PATH,
            urlencoding::encode(owner_id)
        ));
        if self.verbose {
            log::info!("[iq] Application report URL: {}", url);
        }

        let body = self.api_get(&url).await?;
        self.log_payload("Application report", &body);

        let candidates: Vec<ReportLocationCandidate> =
            serde_json::from_slice::<Option<Vec<ReportLocationCandidate>>>(&body)
                .map_err(|e| PipelineError::decode(&url, e))?
                .unwrap_or_default();

        select_stage(&candidates, stage).ok_or_else(|| PipelineError::StageNotFound {
            owner_id: owner_id.to_string(),
            stage: stage.to_string(),
        })
    }
}

#[async_trait]
impl ReportFetcher for IqServerClient {
    async fn fetch(&self, data_url: &str) -> PipelineResult<ReportContent> {
        let url = self.connection.url_for(data_url);
        if self.verbose {
            log::info!("[iq] Report URL: {}", url);
        }

        let body = self.api_get(&url).await?;
        let report: ReportContent = serde_json::from_slice::<Option<ReportContent>>(&body)
            .map_err(|e| PipelineError::decode(&url, e))?
            .unwrap_or_default();

        if self.verbose {
            log::info!(
                "[iq] Report response: {} component(s), {} security issue(s)",
                report.component_count(),
                report.security_issue_count()
            );
        }
        Ok(report)
    }
}

/// Finds a cookie by name among the `Set-Cookie` headers of a response
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (cookie_name, cookie_value) = pair.split_once('=')?;
            (cookie_name.trim() == name).then(|| cookie_value.trim().trim_matches('"').to_string())
        })
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_publishing::domain::Credentials;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_client_creation() {
        let connection = Arc::new(ServerConnection::new(
            "http://localhost:8070",
            Credentials::new("admin", "admin123"),
        ));
        let client = IqServerClient::new(connection, false);
        assert!(client.is_ok());
        assert_eq!(
            client.unwrap().connection().base_url(),
            "http://localhost:8070"
        );
    }

    #[test]
    fn test_find_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("CLMSESSIONID=abc; Path=/; HttpOnly"),
        );
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("CLM-CSRF-TOKEN=token-123; Path=/"),
        );
        assert_eq!(
            find_cookie(&headers, "CLM-CSRF-TOKEN"),
            Some("token-123".to_string())
        );
    }

    #[test]
    fn test_find_cookie_missing() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("CLMSESSIONID=abc; Path=/"));
        assert_eq!(find_cookie(&headers, "CLM-CSRF-TOKEN"), None);
        assert_eq!(find_cookie(&HeaderMap::new(), "CLM-CSRF-TOKEN"), None);
    }

    #[test]
    fn test_find_cookie_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("CLM-CSRF-TOKEN=; Path=/"));
        assert_eq!(find_cookie(&headers, "CLM-CSRF-TOKEN"), None);
    }

    #[test]
    fn test_find_cookie_name_must_match_exactly() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("X-CLM-CSRF-TOKEN=nope; Path=/"),
        );
        assert_eq!(find_cookie(&headers, "CLM-CSRF-TOKEN"), None);
    }

    #[test]
    fn test_application_record_accepts_lowercase_public_id() {
        let record: ApplicationRecord =
            serde_json::from_str(r#"{"publicid": "pub-1", "name": "MyApp"}"#).unwrap();
        assert_eq!(record.public_id.as_deref(), Some("pub-1"));

        let record: ApplicationRecord =
            serde_json::from_str(r#"{"publicId": "pub-2", "name": "Other"}"#).unwrap();
        assert_eq!(record.public_id.as_deref(), Some("pub-2"));
    }
}
