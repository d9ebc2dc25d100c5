use super::event_decoder::EventDecoder;
use crate::ports::inbound::ReportPublishingPort;
use crate::report_publishing::domain::PipelineOutcome;
use crate::shared::Result;
use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

/// Server shared state
pub struct WebhookState {
    decoder: EventDecoder,
    publishing: Arc<dyn ReportPublishingPort>,
}

impl WebhookState {
    pub fn new(decoder: EventDecoder, publishing: Arc<dyn ReportPublishingPort>) -> Self {
        Self {
            decoder,
            publishing,
        }
    }
}

/// Builds the webhook router: `POST /` receives IQ Server deliveries
pub fn router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/", post(handle_delivery))
        .with_state(state)
}

/// Binds `0.0.0.0:{port}` and serves until Ctrl-C
pub async fn serve(router: Router, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| {
            format!(
                "Failed to bind webhook listener to {}\n\n\
                 💡 Hint: Another process may already use port {}. \
                 Change `webhook.port` in the config file.",
                addr, port
            )
        })?;

    log::info!("[webhook] Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook server terminated unexpectedly")?;

    log::info!("[webhook] Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("[webhook] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("[webhook] Shutdown requested");
}

/// Handle one delivery
/// POST /
///
/// The sender always gets `200 OK` with an empty body; pipeline problems
/// only show up in the log.
async fn handle_delivery(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let delivery_id = Uuid::new_v4();
    log::info!(
        "[webhook] Delivery {} received ({} bytes)",
        delivery_id,
        body.len()
    );

    let decoded = state.decoder.decode(&headers, &body);
    let outcome = state.publishing.handle_delivery(decoded).await;

    match &outcome {
        PipelineOutcome::Published(page) => {
            log::info!("[webhook] Delivery {} published '{}'", delivery_id, page.title)
        }
        PipelineOutcome::Skipped(kind) => {
            log::info!("[webhook] Delivery {} skipped ({})", delivery_id, kind)
        }
        PipelineOutcome::Failed { stage, error } => log::warn!(
            "[webhook] Delivery {} failed at {}: {}",
            delivery_id,
            stage,
            error.kind()
        ),
    }

    StatusCode::OK
}
