/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach IQ Server, the template engine and the wiki.
pub mod identity_resolver;
pub mod page_publisher;
pub mod report_renderer;
pub mod report_repository;

pub use identity_resolver::IdentityResolver;
pub use page_publisher::PagePublisher;
pub use report_renderer::ReportRenderer;
pub use report_repository::{ReportFetcher, ReportLocator};
