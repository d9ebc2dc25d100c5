/// Template adapters rendering reports into wiki storage markup
mod tera_renderer;

pub use tera_renderer::TeraReportRenderer;
