use std::fmt;
use std::time::Duration;

/// Basic-auth credentials for an upstream service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Connection settings for the IQ Server.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct ServerConnection {
    base_url: String,
    credentials: Credentials,
    csrf_required: bool,
    request_timeout: Duration,
}

impl ServerConnection {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            csrf_required: false,
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_csrf_required(mut self, csrf_required: bool) -> Self {
        self.csrf_required = csrf_required;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn csrf_required(&self) -> bool {
        self.csrf_required
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Joins a server-relative path onto the base URL without doubling slashes
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
