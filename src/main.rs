mod cli;

use anyhow::Context;
use cli::Args;
use iq_confluence_bridge::adapters::inbound::webhook::{router, serve, EventDecoder, WebhookState};
use iq_confluence_bridge::adapters::outbound::network::{ConfluenceClient, IqServerClient};
use iq_confluence_bridge::adapters::outbound::templating::TeraReportRenderer;
use iq_confluence_bridge::application::dto::PipelineSettings;
use iq_confluence_bridge::application::use_cases::PublishReportUseCase;
use iq_confluence_bridge::config::{load_config_from_path, warn_unknown_fields, ConfigFile};
use iq_confluence_bridge::report_publishing::domain::{Credentials, ServerConnection};
use iq_confluence_bridge::shared::error::ExitCode;
use iq_confluence_bridge::shared::Result;
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config_from_path(&args.config_file)?;
    let verbose = args.verbose || config.verbose;

    init_logging(verbose);
    warn_unknown_fields(&config);

    if verbose {
        log::info!(
            "Loaded configuration from {}:\n{}",
            args.config_file.display(),
            serde_json::to_string_pretty(&config.redacted())?
        );
    }

    if !Path::new(&config.template).is_file() {
        log::warn!(
            "[render] Template '{}' not found; every report will fail to render until it exists",
            config.template
        );
    }

    // Create adapters (Dependency Injection)
    let connection = Arc::new(
        ServerConnection::new(
            config.iq.url.as_str(),
            Credentials::new(config.iq.user.as_str(), config.iq.password.as_str()),
        )
        .with_csrf_required(config.iq.csrf_required)
        .with_request_timeout(config.request_timeout()),
    );
    let iq_client = IqServerClient::new(connection.clone(), verbose)
        .context("Failed to create the IQ Server client")?;
    let renderer = TeraReportRenderer::from_file(&config.template, verbose);
    let publisher = ConfluenceClient::new(
        config.confluence.url.as_str(),
        Credentials::new(
            config.confluence.user.as_str(),
            config.confluence.password.as_str(),
        ),
        config.request_timeout(),
        verbose,
    )
    .context("Failed to create the Confluence client")?;

    // Create use case with injected dependencies
    let use_case = PublishReportUseCase::new(
        iq_client.clone(),
        iq_client.clone(),
        iq_client,
        renderer,
        publisher,
        pipeline_settings(&config, connection.base_url(), verbose),
    );

    let decoder = EventDecoder::new(config.webhook_secret(), config.webhook.events.clone());
    if !decoder.verifies_signatures() {
        log::warn!("[webhook] No webhook secret configured; delivery signatures are not verified");
    }

    let state = Arc::new(WebhookState::new(decoder, Arc::new(use_case)));
    serve(router(state), config.webhook.port).await
}

fn pipeline_settings(config: &ConfigFile, report_base_url: &str, verbose: bool) -> PipelineSettings {
    PipelineSettings::new(report_base_url, config.confluence.space_key.as_str())
        .with_parent_page_id(config.confluence.parent_page_id.clone())
        .with_verbose(verbose)
}

/// `RUST_LOG` overrides the default filter
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,iq_confluence_bridge=debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
