/// Application layer - the report publishing pipeline
///
/// Turns a decoded webhook event into a published page by driving the
/// outbound ports in order, using settings carried in from configuration.
pub mod dto;
pub mod use_cases;
