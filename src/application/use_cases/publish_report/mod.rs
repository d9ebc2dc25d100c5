use crate::application::dto::PipelineSettings;
use crate::ports::inbound::ReportPublishingPort;
use crate::ports::outbound::{
    IdentityResolver, PagePublisher, ReportFetcher, ReportLocator, ReportRenderer,
};
use crate::report_publishing::domain::{
    augment, page_title, ApplicationEvaluation, PageDraft, PipelineOutcome, PipelineStage,
    PublishedPage, ReportContext, WebhookEvent,
};
use crate::shared::error::PipelineError;
use crate::shared::PipelineResult;
use async_trait::async_trait;
use chrono::Local;


/// A step failure tagged with the stage it was trying to reach
struct StageFailure {
    stage: PipelineStage,
    error: PipelineError,
}

fn at(stage: PipelineStage) -> impl FnOnce(PipelineError) -> StageFailure {
    move |error| StageFailure { stage, error }
}

/// PublishReportUseCase - Coordinates the event-to-publication pipeline
///
/// Runs `Decoded → IdentityResolved → Located → Fetched → Rendered →
/// Published` for application evaluation events. The first failing step ends
/// the run; nothing is retried or compensated. Other event kinds are
/// acknowledged and skipped without any outbound call.
///
/// # Type Parameters
/// * `IR` - IdentityResolver implementation
/// * `RL` - ReportLocator implementation
/// * `RF` - ReportFetcher implementation
/// * `RR` - ReportRenderer implementation
/// * `PP` - PagePublisher implementation
pub struct PublishReportUseCase<IR, RL, RF, RR, PP> {
    identity_resolver: IR,
    report_locator: RL,
    report_fetcher: RF,
    report_renderer: RR,
    page_publisher: PP,
    settings: PipelineSettings,
}

impl<IR, RL, RF, RR, PP> PublishReportUseCase<IR, RL, RF, RR, PP>
where
    IR: IdentityResolver,
    RL: ReportLocator,
    RF: ReportFetcher,
    RR: ReportRenderer,
    PP: PagePublisher,
{
    /// Creates a new PublishReportUseCase with injected dependencies
    pub fn new(
        identity_resolver: IR,
        report_locator: RL,
        report_fetcher: RF,
        report_renderer: RR,
        page_publisher: PP,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            identity_resolver,
            report_locator,
            report_fetcher,
            report_renderer,
            page_publisher,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs every stage for one application evaluation
    async fn run_stages(
        &self,
        evaluation: &ApplicationEvaluation,
    ) -> Result<PublishedPage, StageFailure> {
        let owner_id = evaluation.owner_id.as_str();
        let stage = evaluation.stage.as_str();

        // Step 1: Resolve the owner id to a public application
        let identity = self
            .identity_resolver
            .resolve(owner_id)
            .await
            .map_err(at(PipelineStage::IdentityResolved))?;
        self.transition(
            PipelineStage::IdentityResolved,
            &format!("public id {}", identity.public_id()),
        );

        // Step 2: Find the report for the evaluated stage
        let location = self
            .report_locator
            .locate(owner_id, stage)
            .await
            .map_err(at(PipelineStage::Located))?;
        self.transition(PipelineStage::Located, &location.data_url);

        // Step 3: Fetch the report data
        let content = self
            .report_fetcher
            .fetch(&location.data_url)
            .await
            .map_err(at(PipelineStage::Fetched))?;
        self.transition(
            PipelineStage::Fetched,
            &format!("{} component(s)", content.component_count()),
        );

        // Step 4: Stitch in the context and render
        let report = augment(
            content,
            ReportContext {
                report_link: self.settings.report_link(&location.html_url),
                stage: stage.to_string(),
                app_name: identity.display_name().to_string(),
            },
        );
        let document = self
            .report_renderer
            .render(&report)
            .map_err(at(PipelineStage::Rendered))?;
        self.transition(
            PipelineStage::Rendered,
            &format!("{} bytes", document.content().len()),
        );

        // Step 5: Publish as a new page
        let draft = PageDraft {
            title: page_title(report.app_name(), report.stage(), &Local::now()),
            content: document.into_content(),
            space_key: self.settings.space_key.clone(),
            parent_page_id: self.settings.parent_page_id.clone(),
        };
        let page = self
            .page_publisher
            .publish(&draft)
            .await
            .map_err(at(PipelineStage::Published))?;
        self.transition(PipelineStage::Published, &page.title);

        Ok(page)
    }

    fn transition(&self, stage: PipelineStage, detail: &str) {
        log::debug!("[pipeline] -> {} ({})", stage, detail);
    }

    fn skip(&self, event: &WebhookEvent) -> PipelineOutcome {
        log::warn!("[pipeline] {} webhook not supported", event.kind());
        PipelineOutcome::Skipped(event.kind())
    }
}

#[async_trait]
impl<IR, RL, RF, RR, PP> ReportPublishingPort for PublishReportUseCase<IR, RL, RF, RR, PP>
where
    IR: IdentityResolver,
    RL: ReportLocator,
    RF: ReportFetcher,
    RR: ReportRenderer,
    PP: PagePublisher,
{
    async fn handle_delivery(&self, decoded: PipelineResult<WebhookEvent>) -> PipelineOutcome {
        match decoded {
            Ok(event) => self.handle_event(event).await,
            Err(error) => {
                match &error {
                    PipelineError::EventNotRecognized { .. } => {
                        log::warn!("[pipeline] Requested event not recognised: {}", error)
                    }
                    _ => log::error!("[pipeline] Webhook error: {}", error),
                }
                PipelineOutcome::failed(PipelineStage::Decoded, error)
            }
        }
    }

    async fn handle_event(&self, event: WebhookEvent) -> PipelineOutcome {
        let evaluation = match &event {
            WebhookEvent::ApplicationEvaluation(evaluation) => evaluation,
            WebhookEvent::PolicyManagement
            | WebhookEvent::LicenseOverride
            | WebhookEvent::SecurityOverride => return self.skip(&event),
        };

        if self.settings.verbose {
            log::info!("[pipeline] Webhook payload: {:?}", evaluation);
        }

        match self.run_stages(evaluation).await {
            Ok(page) => {
                log::info!(
                    "[pipeline] Published '{}' (page id {})",
                    page.title,
                    if page.id.is_empty() { "unknown" } else { page.id.as_str() }
                );
                PipelineOutcome::Published(page)
            }
            Err(StageFailure { stage, error }) => {
                log::error!("[pipeline] Failed at {} ({}): {}", stage, error.kind(), error);
                if self.settings.verbose {
                    log::error!(
                        "[pipeline] Failed run context: owner id {}, stage {}",
                        evaluation.owner_id,
                        evaluation.stage
                    );
                }
                PipelineOutcome::failed(stage, error)
            }
        }
    }
}
