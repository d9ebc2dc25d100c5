/// Webhook adapter - Receives Sonatype IQ Server deliveries over HTTP
mod event_decoder;
mod server;

pub use event_decoder::{sign, EventDecoder, EVENT_HEADER, SIGNATURE_HEADER};
pub use server::{router, serve, WebhookState};
