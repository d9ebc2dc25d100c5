/// Inbound adapters (Driving adapters)
///
/// These adapters receive traffic from the outside world and drive the
/// application through its inbound ports.
pub mod webhook;
