use crate::report_publishing::domain::{ApplicationEvaluation, EventKind, WebhookEvent};
use crate::shared::error::PipelineError;
use crate::shared::PipelineResult;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Header naming the event kind of a delivery
pub const EVENT_HEADER: &str = "x-nexus-webhook-id";
/// Header carrying the hex HMAC-SHA1 of the body, present when a secret is set
pub const SIGNATURE_HEADER: &str = "x-nexus-webhook-signature";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationEvaluationEnvelope {
    application_evaluation: ApplicationEvaluation,
}

/// Classifies raw webhook deliveries into [`WebhookEvent`]s
///
/// Checks run in order: event header against the allow-list, then the
/// signature (only when a secret is configured), then the body.
#[derive(Debug, Clone)]
pub struct EventDecoder {
    secret: Option<Vec<u8>>,
    accepted: Vec<EventKind>,
}

impl EventDecoder {
    /// A blank secret disables signature verification
    pub fn new(secret: Option<String>, accepted: Vec<EventKind>) -> Self {
        Self {
            secret: secret
                .filter(|s| !s.is_empty())
                .map(String::into_bytes),
            accepted,
        }
    }

    pub fn verifies_signatures(&self) -> bool {
        self.secret.is_some()
    }

    pub fn decode(&self, headers: &HeaderMap, body: &[u8]) -> PipelineResult<WebhookEvent> {
        let kind = self.classify(headers)?;

        if let Some(secret) = &self.secret {
            verify_signature(secret, headers, body)?;
        }

        match kind {
            EventKind::ApplicationEvaluation => {
                decode_evaluation(body).map(WebhookEvent::ApplicationEvaluation)
            }
            EventKind::PolicyManagement => {
                require_object(kind, body).map(|_| WebhookEvent::PolicyManagement)
            }
            EventKind::LicenseOverride => {
                require_object(kind, body).map(|_| WebhookEvent::LicenseOverride)
            }
            EventKind::SecurityOverride => {
                require_object(kind, body).map(|_| WebhookEvent::SecurityOverride)
            }
        }
    }

    fn classify(&self, headers: &HeaderMap) -> PipelineResult<EventKind> {
        let value = headers
            .get(EVENT_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| PipelineError::EventNotRecognized {
                event: format!("missing {} header", EVENT_HEADER),
            })?;

        EventKind::from_header_value(value)
            .filter(|kind| self.accepted.contains(kind))
            .ok_or_else(|| PipelineError::EventNotRecognized {
                event: value.to_string(),
            })
    }
}

fn decode_evaluation(body: &[u8]) -> PipelineResult<ApplicationEvaluation> {
    let envelope: ApplicationEvaluationEnvelope = serde_json::from_slice(body)
        .map_err(|e| malformed(format!("invalid application evaluation body: {}", e)))?;
    let evaluation = envelope.application_evaluation;
    if evaluation.owner_id.trim().is_empty() || evaluation.stage.trim().is_empty() {
        return Err(malformed(
            "application evaluation is missing ownerId or stage".to_string(),
        ));
    }
    Ok(evaluation)
}

/// Events the pipeline skips are only checked for a JSON object body
fn require_object(kind: EventKind, body: &[u8]) -> PipelineResult<()> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| malformed(format!("invalid {} body: {}", kind, e)))?;
    if !value.is_object() {
        return Err(malformed(format!("{} body is not a JSON object", kind)));
    }
    Ok(())
}

fn malformed(reason: String) -> PipelineError {
    PipelineError::MalformedPayload { reason }
}

fn verify_signature(secret: &[u8], headers: &HeaderMap, body: &[u8]) -> PipelineResult<()> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| malformed(format!("missing {} header", SIGNATURE_HEADER)))?;

    let signature = signature.trim();
    let signature = signature.strip_prefix("sha1=").unwrap_or(signature);
    let expected =
        hex::decode(signature).map_err(|_| malformed("signature is not valid hex".to_string()))?;

    keyed_mac(secret, body)?
        .verify_slice(&expected)
        .map_err(|_| malformed("HMAC verification failed".to_string()))
}

fn keyed_mac(secret: &[u8], body: &[u8]) -> PipelineResult<HmacSha1> {
    let mut mac = HmacSha1::new_from_slice(secret)
        .map_err(|e| malformed(format!("unusable webhook secret: {}", e)))?;
    mac.update(body);
    Ok(mac)
}

/// Hex HMAC-SHA1 of `body`, as IQ Server computes it for the signature header
pub fn sign(secret: &str, body: &[u8]) -> PipelineResult<String> {
    let mac = keyed_mac(secret.as_bytes(), body)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}
