/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., the
/// webhook server) use to interact with the application core.
pub mod report_publishing_port;

pub use report_publishing_port::ReportPublishingPort;
