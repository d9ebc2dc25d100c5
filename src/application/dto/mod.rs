/// Data Transfer Objects for application layer
///
/// DTOs carry configuration-derived settings into use cases, keeping the
/// domain layer free of configuration concerns.
mod pipeline_settings;

pub use pipeline_settings::PipelineSettings;
