use crate::ports::outbound::ReportRenderer;
use crate::report_publishing::domain::{AugmentedReport, RenderedDocument};
use crate::shared::error::PipelineError;
use crate::shared::file_guard::{read_bounded_text, MAX_TEXT_FILE_SIZE};
use crate::shared::PipelineResult;
use std::path::PathBuf;
use tera::{Context, Tera};

/// Where the report template comes from
#[derive(Debug, Clone)]
enum TemplateSource {
    File(PathBuf),
    Inline { name: String, source: String },
}

/// TeraReportRenderer adapter implementing the ReportRenderer port
///
/// The template is loaded and parsed on every render, so edits to the
/// template file take effect without a restart. The read is a blocking
/// `std::fs` call on the calling task, bounded by the 1 MB text file limit.
/// Templates whose name ends in `.html` are auto-escaped by Tera.
pub struct TeraReportRenderer {
    source: TemplateSource,
    verbose: bool,
}

impl TeraReportRenderer {
    /// Renderer reading its template from a file on each render
    pub fn from_file(path: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            source: TemplateSource::File(path.into()),
            verbose,
        }
    }

    /// Renderer with an in-memory template
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            source: TemplateSource::Inline {
                name: name.into(),
                source: source.into(),
            },
            verbose: false,
        }
    }

    /// Loads the template, returning its name and source
    fn load(&self) -> PipelineResult<(String, String)> {
        match &self.source {
            TemplateSource::File(path) => {
                let source = read_bounded_text(path, "template", MAX_TEXT_FILE_SIZE).map_err(
                    |e| PipelineError::RenderFailed {
                        reason: e.to_string(),
                    },
                )?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "report.html".to_string());
                Ok((name, source))
            }
            TemplateSource::Inline { name, source } => Ok((name.clone(), source.clone())),
        }
    }
}

impl ReportRenderer for TeraReportRenderer {
    fn render(&self, report: &AugmentedReport) -> PipelineResult<RenderedDocument> {
        let (name, source) = self.load()?;

        let mut tera = Tera::default();
        tera.add_raw_template(&name, &source)
            .map_err(|e| render_failed(&format!("cannot parse template '{}'", name), &e))?;

        let context = Context::from_serialize(report)
            .map_err(|e| render_failed("cannot build template context", &e))?;

        let content = tera
            .render(&name, &context)
            .map_err(|e| render_failed(&format!("cannot render template '{}'", name), &e))?;

        if self.verbose {
            log::info!(
                "[render] Rendered '{}' for {} ({} bytes)",
                name,
                report.app_name(),
                content.len()
            );
        }

        Ok(RenderedDocument::new(content))
    }
}

/// Tera reports the useful detail in the error's source chain
fn render_failed(context: &str, error: &tera::Error) -> PipelineError {
    let mut reason = format!("{}: {}", context, error);
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        reason.push_str(&format!("\nCaused by: {}", cause));
        source = cause.source();
    }
    PipelineError::RenderFailed { reason }
}
