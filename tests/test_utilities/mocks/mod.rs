/// Mock implementations for testing
mod mock_identity_resolver;
mod mock_page_publisher;
mod mock_report_renderer;
mod mock_report_repository;

pub use mock_identity_resolver::MockIdentityResolver;
pub use mock_page_publisher::MockPagePublisher;
pub use mock_report_renderer::MockReportRenderer;
pub use mock_report_repository::MockReportRepository;
