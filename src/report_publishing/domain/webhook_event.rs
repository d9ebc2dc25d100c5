use serde::{Deserialize, Serialize};
use std::fmt;

/// The webhook event kinds IQ Server can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    ApplicationEvaluation,
    PolicyManagement,
    LicenseOverride,
    SecurityOverride,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::ApplicationEvaluation,
        EventKind::PolicyManagement,
        EventKind::LicenseOverride,
        EventKind::SecurityOverride,
    ];

    /// Value IQ Server sends in the `X-Nexus-Webhook-Id` header for this kind
    pub fn header_value(&self) -> &'static str {
        match self {
            EventKind::ApplicationEvaluation => "iq:applicationEvaluation",
            EventKind::PolicyManagement => "iq:policyManagement",
            EventKind::LicenseOverride => "iq:licenseOverrideManagement",
            EventKind::SecurityOverride => "iq:securityVulnerabilityOverrideManagement",
        }
    }

    pub fn from_header_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.header_value() == value.trim())
    }

    /// Human readable label used in notices
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::ApplicationEvaluation => "Application Evaluation",
            EventKind::PolicyManagement => "Policy Management",
            EventKind::LicenseOverride => "License Override Management",
            EventKind::SecurityOverride => "Security Vulnerability Override",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Payload of an `iq:applicationEvaluation` delivery.
///
/// Only `owner_id` and `stage` drive the pipeline; the remaining fields are
/// informational and show up in verbose logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEvaluation {
    pub owner_id: String,
    pub stage: String,
    #[serde(default)]
    pub policy_evaluation_id: Option<String>,
    #[serde(default)]
    pub evaluation_date: Option<String>,
    #[serde(default)]
    pub affected_component_count: Option<u64>,
    #[serde(default)]
    pub critical_component_count: Option<u64>,
    #[serde(default)]
    pub severe_component_count: Option<u64>,
    #[serde(default)]
    pub moderate_component_count: Option<u64>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub report_id: Option<String>,
}

impl ApplicationEvaluation {
    pub fn new(owner_id: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            stage: stage.into(),
            policy_evaluation_id: None,
            evaluation_date: None,
            affected_component_count: None,
            critical_component_count: None,
            severe_component_count: None,
            moderate_component_count: None,
            outcome: None,
            report_id: None,
        }
    }
}

/// A classified webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    ApplicationEvaluation(ApplicationEvaluation),
    PolicyManagement,
    LicenseOverride,
    SecurityOverride,
}

impl WebhookEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WebhookEvent::ApplicationEvaluation(_) => EventKind::ApplicationEvaluation,
            WebhookEvent::PolicyManagement => EventKind::PolicyManagement,
            WebhookEvent::LicenseOverride => EventKind::LicenseOverride,
            WebhookEvent::SecurityOverride => EventKind::SecurityOverride,
        }
    }
}
