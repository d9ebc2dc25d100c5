/// Adapters layer - Infrastructure implementations
///
/// Inbound adapters accept IQ Server webhook deliveries; outbound adapters
/// talk to IQ Server, Confluence and the template engine on behalf of the
/// ports.
pub mod inbound;
pub mod outbound;
