use crate::ports::outbound::PagePublisher;
use crate::report_publishing::domain::{Credentials, PageDraft, PublishedPage};
use crate::shared::error::PipelineError;
use crate::shared::{PipelineResult, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum number of response characters quoted in a publish error
const ERROR_BODY_LIMIT: usize = 500;

// Confluence REST API request/response structures

#[derive(Debug, Serialize)]
struct ContentRequest<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    title: &'a str,
    space: SpaceRef<'a>,
    version: VersionRef,
    body: ContentBody<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ancestors: Vec<AncestorRef<'a>>,
}

#[derive(Debug, Serialize)]
struct SpaceRef<'a> {
    key: &'a str,
}

#[derive(Debug, Serialize)]
struct VersionRef {
    number: u32,
}

#[derive(Debug, Serialize)]
struct ContentBody<'a> {
    storage: StorageValue<'a>,
}

#[derive(Debug, Serialize)]
struct StorageValue<'a> {
    value: &'a str,
    representation: &'static str,
}

#[derive(Debug, Serialize)]
struct AncestorRef<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: Option<String>,
}

impl<'a> ContentRequest<'a> {
    fn page(draft: &'a PageDraft) -> Self {
        Self {
            content_type: "page",
            title: &draft.title,
            space: SpaceRef {
                key: &draft.space_key,
            },
            version: VersionRef { number: 1 },
            body: ContentBody {
                storage: StorageValue {
                    value: &draft.content,
                    representation: "storage",
                },
            },
            ancestors: draft
                .parent_page_id
                .as_deref()
                .map(|id| vec![AncestorRef { id }])
                .unwrap_or_default(),
        }
    }
}

/// ConfluenceClient adapter implementing the PagePublisher port
///
/// Creates pages through `POST /rest/api/content` with basic credentials.
/// Publishing is never retried: a retry after an ambiguous failure could
/// create a duplicate page.
pub struct ConfluenceClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    verbose: bool,
}

impl ConfluenceClient {
    const CONTENT_PATH: &'static str = "rest/api/content";

    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
        verbose: bool,
    ) -> Result<Self> {
        let user_agent = format!("iq-confluence-bridge/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            verbose,
        })
    }

    fn content_url(&self) -> String {
        format!("{}/{}", self.base_url, Self::CONTENT_PATH)
    }
}

#[async_trait]
impl PagePublisher for ConfluenceClient {
    async fn publish(&self, draft: &PageDraft) -> PipelineResult<PublishedPage> {
        let url = self.content_url();
        let failed = |reason: String| PipelineError::PublishFailed {
            title: draft.title.clone(),
            reason,
        };

        if self.verbose {
            log::info!(
                "[confluence] Creating page '{}' in space {} at {}",
                draft.title,
                draft.space_key,
                url
            );
        }

        let response = self
            .client
            .post(&url)
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .json(&ContentRequest::page(draft))
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(failed(format!(
                "Confluence returned status {}: {}",
                status, snippet
            )));
        }

        // The page exists once Confluence answers with success
        let page = match response.json::<ContentResponse>().await {
            Ok(content) => PublishedPage {
                id: content.id,
                title: content.title.unwrap_or_else(|| draft.title.clone()),
            },
            Err(e) => {
                log::warn!(
                    "[confluence] Page '{}' created but response was unreadable: {}",
                    draft.title,
                    e
                );
                PublishedPage {
                    id: String::new(),
                    title: draft.title.clone(),
                }
            }
        };

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(parent: Option<&str>) -> PageDraft {
        PageDraft {
            title: "Application: MyApp - Stage: build 2024-05-01 10:00:00".to_string(),
            content: "<p>report</p>".to_string(),
            space_key: "DEV".to_string(),
            parent_page_id: parent.map(str::to_string),
        }
    }

    #[test]
    fn test_content_request_shape() {
        let draft = draft(Some("12345"));
        let value = serde_json::to_value(ContentRequest::page(&draft)).unwrap();
        assert_eq!(value["type"], "page");
        assert_eq!(value["title"], draft.title.as_str());
        assert_eq!(value["space"]["key"], "DEV");
        assert_eq!(value["version"]["number"], 1);
        assert_eq!(value["body"]["storage"]["value"], "<p>report</p>");
        assert_eq!(value["body"]["storage"]["representation"], "storage");
        assert_eq!(value["ancestors"][0]["id"], "12345");
        assert_eq!(value["ancestors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_content_request_without_parent_omits_ancestors() {
        let draft = draft(None);
        let value = serde_json::to_value(ContentRequest::page(&draft)).unwrap();
        assert!(value.get("ancestors").is_none());
    }

    #[test]
    fn test_content_url_trims_trailing_slash() {
        let client = ConfluenceClient::new(
            "https://wiki.example.com/",
            Credentials::new("bot", "secret"),
            Duration::from_secs(5),
            false,
        )
        .unwrap();
        assert_eq!(
            client.content_url(),
            "https://wiki.example.com/rest/api/content"
        );
    }
}
