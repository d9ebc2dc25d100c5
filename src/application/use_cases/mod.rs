/// Use cases module containing application business logic orchestration
mod publish_report;

pub use publish_report::PublishReportUseCase;
