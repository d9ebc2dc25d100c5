/// Ports module defining interfaces for hexagonal architecture
///
/// The inbound port is what the webhook server drives; the outbound ports are
/// the IQ lookups, rendering and page publishing the pipeline depends on.
pub mod inbound;
pub mod outbound;
