pub mod application_identity;
mod lenient;
pub mod pipeline_state;
pub mod rendered_document;
pub mod report_content;
pub mod report_location;
pub mod server_connection;
pub mod webhook_event;

pub use application_identity::ApplicationIdentity;
pub use pipeline_state::{PipelineOutcome, PipelineStage};
pub use rendered_document::{
    page_title, page_title_prefix, PageDraft, PublishedPage, RenderedDocument,
};
pub use report_content::{augment, AugmentedReport, ReportContent, ReportContext};
pub use report_location::{select_stage, ReportLocation, ReportLocationCandidate};
pub use server_connection::{Credentials, ServerConnection};
pub use webhook_event::{ApplicationEvaluation, EventKind, WebhookEvent};
