//! Configuration file support for iq-confluence-bridge.
//!
//! Provides YAML-based configuration (`config.yml` by default), including
//! data structures, file loading, validation and a redacted dump for
//! verbose startup logs.

use anyhow::{bail, Context};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::report_publishing::domain::EventKind;
use crate::shared::file_guard::{read_bounded_text, MAX_TEXT_FILE_SIZE};
use crate::shared::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
pub const DEFAULT_TEMPLATE: &str = "policy-violations.html";
pub const DEFAULT_WEBHOOK_PORT: u16 = 3001;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const REDACTED: &str = "********";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default)]
    pub verbose: bool,
    pub iq: IqSection,
    #[serde(default)]
    pub webhook: WebhookSection,
    pub confluence: ConfluenceSection,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// IQ Server connection settings.
#[derive(Debug, Deserialize)]
pub struct IqSection {
    pub url: String,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub csrf_required: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Inbound webhook listener settings.
#[derive(Debug, Deserialize)]
pub struct WebhookSection {
    /// Shared secret for `X-Nexus-Webhook-Signature`; empty disables the check
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_webhook_port")]
    pub port: u16,
    #[serde(default = "default_events")]
    pub events: Vec<EventKind>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl Default for WebhookSection {
    fn default() -> Self {
        Self {
            secret: String::new(),
            port: DEFAULT_WEBHOOK_PORT,
            events: default_events(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// Confluence publishing settings.
#[derive(Debug, Deserialize)]
pub struct ConfluenceSection {
    pub url: String,
    pub user: String,
    pub password: String,
    pub space_key: String,
    /// Accepts both `"12345"` and `12345`
    #[serde(default, deserialize_with = "optional_page_id")]
    pub parent_page_id: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_webhook_port() -> u16 {
    DEFAULT_WEBHOOK_PORT
}

fn default_events() -> Vec<EventKind> {
    EventKind::ALL.to_vec()
}

fn optional_page_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PageId {
        Text(String),
        Number(u64),
    }

    Ok(match Option::<PageId>::deserialize(deserializer)? {
        Some(PageId::Text(id)) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Some(PageId::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

impl ConfigFile {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.iq.request_timeout_secs)
    }

    /// Webhook secret, `None` when signature checks are disabled
    pub fn webhook_secret(&self) -> Option<String> {
        Some(self.webhook.secret.clone()).filter(|s| !s.is_empty())
    }

    /// The configuration as JSON with every credential masked
    pub fn redacted(&self) -> serde_json::Value {
        json!({
            "template": self.template,
            "verbose": self.verbose,
            "iq": {
                "url": self.iq.url,
                "user": self.iq.user,
                "password": redact(&self.iq.password),
                "csrf_required": self.iq.csrf_required,
                "request_timeout_secs": self.iq.request_timeout_secs,
            },
            "webhook": {
                "secret": redact(&self.webhook.secret),
                "port": self.webhook.port,
                "events": self.webhook.events,
            },
            "confluence": {
                "url": self.confluence.url,
                "user": self.confluence.user,
                "password": redact(&self.confluence.password),
                "space_key": self.confluence.space_key,
                "parent_page_id": self.confluence.parent_page_id,
            },
        })
    }
}

fn redact(value: &str) -> &str {
    if value.is_empty() {
        ""
    } else {
        REDACTED
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_bounded_text(path, "config file", MAX_TEXT_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable, \
             or pass another path with --configfile.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML with \
             `iq` and `confluence` sections (see config.example.yml).",
            path.display()
        )
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let required = [
        ("template", &config.template),
        ("iq.url", &config.iq.url),
        ("iq.user", &config.iq.user),
        ("iq.password", &config.iq.password),
        ("confluence.url", &config.confluence.url),
        ("confluence.user", &config.confluence.user),
        ("confluence.password", &config.confluence.password),
        ("confluence.space_key", &config.confluence.space_key),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            bail!(
                "Invalid config: {} must not be empty.\n\n\
                 💡 Hint: Set '{}' in the config file.",
                field,
                field
            );
        }
    }

    for (field, url) in [("iq.url", &config.iq.url), ("confluence.url", &config.confluence.url)] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!(
                "Invalid config: {} must be an http(s) URL, got '{}'.\n\n\
                 💡 Hint: Use a full base URL such as \"http://localhost:8070\".",
                field,
                url
            );
        }
    }

    if config.iq.request_timeout_secs == 0 {
        bail!(
            "Invalid config: iq.request_timeout_secs must be greater than 0.\n\n\
             💡 Hint: Omit the field to use the default of {} seconds.",
            DEFAULT_REQUEST_TIMEOUT_SECS
        );
    }

    if config.webhook.port == 0 {
        bail!(
            "Invalid config: webhook.port must be greater than 0.\n\n\
             💡 Hint: Omit the field to listen on the default port {}.",
            DEFAULT_WEBHOOK_PORT
        );
    }

    if config.webhook.events.is_empty() {
        bail!(
            "Invalid config: webhook.events must list at least one event.\n\n\
             💡 Hint: Omit the field to accept all of applicationEvaluation, policyManagement, \
             licenseOverride and securityOverride."
        );
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
///
/// Called once logging is up, since the log level depends on the loaded config.
pub fn warn_unknown_fields(config: &ConfigFile) {
    let sections = [
        ("", &config.unknown_fields),
        ("iq.", &config.iq.unknown_fields),
        ("webhook.", &config.webhook.unknown_fields),
        ("confluence.", &config.confluence.unknown_fields),
    ];
    for (prefix, fields) in sections {
        for key in fields.keys() {
            log::warn!("Unknown config field '{}{}' will be ignored.", prefix, key);
        }
    }
}
