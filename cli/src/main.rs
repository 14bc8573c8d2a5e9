use anyhow::Context;
use clap::Parser;
use output::console::ConsoleNotifier;
use service::HttpInferenceService;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use visionbox_core::processing::BatchRun;
use visionbox_core::SystemClock;
use workflow::config::ClientConfig;
use workflow::runner::{Session, SessionRequest};

mod output;
mod service;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Upload image batches to a VisionBox inference service")]
struct Args {
    /// Images to submit, processed in the given order
    images: Vec<PathBuf>,
    /// Load client settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base URL of the inference service
    #[arg(long)]
    service_url: Option<String>,
    /// Directory the report is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Switch the service to this model before uploading
    #[arg(long)]
    model: Option<String>,
    /// Print the models offered by the service
    #[arg(long, default_value_t = false)]
    list_models: bool,
    /// Write the detection report
    #[arg(long, default_value_t = false)]
    report: bool,
    /// Print the detection summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = &args.config {
        ClientConfig::load(path)?.with_overrides(args.service_url, args.output_dir)
    } else {
        ClientConfig::from_args(args.service_url, args.output_dir)
    };

    let request = SessionRequest {
        images: args.images,
        model: args.model,
        list_models: args.list_models,
        report: args.report,
        json: args.json,
    };

    let service = HttpInferenceService::new(config.service_url.clone());
    log::info!("using inference service at {}", service.base_url());
    let mut session = Session::new(config, service, SystemClock, Box::new(ConsoleNotifier));

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the upload session")?;
    let outcome = runtime.block_on(session.execute(&request))?;

    if let Some(BatchRun::Completed(batch)) = &outcome.batch {
        log::info!(
            "batch processed: {} succeeded, {} failed",
            batch.successes.len(),
            batch.failure_count
        );
    }
    if let Some(path) = &outcome.report_path {
        log::debug!("report available at {}", path.display());
    }
    log::info!(
        "session totals: {} submitted, {} failed",
        outcome.metrics.submitted,
        outcome.metrics.failed
    );

    Ok(())
}
