//! iq-confluence-bridge - Publish Sonatype IQ policy reports to Confluence
//!
//! This library receives IQ Server webhook deliveries, resolves the evaluated
//! application, fetches the policy report for the evaluated stage, renders it
//! with a Tera template and publishes the result as a new Confluence page.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`report_publishing`): Events, report data and pipeline states
//! - **Application Layer** (`application`): The publish-report use case and its settings
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Webhook server, IQ/Confluence clients, Tera renderer
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use iq_confluence_bridge::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let connection = Arc::new(ServerConnection::new(
//!     "http://localhost:8070",
//!     Credentials::new("admin", "admin123"),
//! ));
//! let iq = IqServerClient::new(connection.clone(), false)?;
//! let renderer = TeraReportRenderer::from_file("policy-violations.html", false);
//! let publisher = ConfluenceClient::new(
//!     "https://wiki.example.com",
//!     Credentials::new("bot", "secret"),
//!     Duration::from_secs(30),
//!     false,
//! )?;
//!
//! // Create use case
//! let settings = PipelineSettings::new(connection.base_url(), "DEV");
//! let use_case =
//!     PublishReportUseCase::new(iq.clone(), iq.clone(), iq, renderer, publisher, settings);
//!
//! // Serve webhooks
//! let decoder = EventDecoder::new(None, EventKind::ALL.to_vec());
//! let state = Arc::new(WebhookState::new(decoder, Arc::new(use_case)));
//! serve(router(state), 3001).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod report_publishing;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::webhook::{router, serve, EventDecoder, WebhookState};
    pub use crate::adapters::outbound::network::{ConfluenceClient, IqServerClient};
    pub use crate::adapters::outbound::templating::TeraReportRenderer;
    pub use crate::application::dto::PipelineSettings;
    pub use crate::application::use_cases::PublishReportUseCase;
    pub use crate::ports::inbound::ReportPublishingPort;
    pub use crate::ports::outbound::{
        IdentityResolver, PagePublisher, ReportFetcher, ReportLocator, ReportRenderer,
    };
    pub use crate::report_publishing::domain::{
        augment, page_title, ApplicationEvaluation, ApplicationIdentity, AugmentedReport,
        Credentials, EventKind, PageDraft, PipelineOutcome, PipelineStage, PublishedPage,
        RenderedDocument, ReportContent, ReportContext, ReportLocation, ServerConnection,
        WebhookEvent,
    };
    pub use crate::shared::error::PipelineError;
    pub use crate::shared::{PipelineResult, Result};
}
