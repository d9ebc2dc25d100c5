use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Timestamp format appended to page titles
pub const TITLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rendered report markup in the wiki's storage representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    content: String,
}

impl RenderedDocument {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// Title prefix shared by every page for an application and stage
pub fn page_title_prefix(app_name: &str, stage: &str) -> String {
    format!("Application: {} - Stage: {}", app_name, stage)
}

/// Full page title: the prefix followed by the generation timestamp.
/// Confluence titles are unique per space, so the timestamp keeps repeated
/// evaluations from colliding.
pub fn page_title<Tz>(app_name: &str, stage: &str, generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} {}",
        page_title_prefix(app_name, stage),
        generated_at.format(TITLE_TIMESTAMP_FORMAT)
    )
}

/// Everything the publisher needs to create one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDraft {
    pub title: String,
    pub content: String,
    pub space_key: String,
    pub parent_page_id: Option<String>,
}

/// A page that now exists on the wiki
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPage {
    pub id: String,
    pub title: String,
}
