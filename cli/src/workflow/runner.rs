use crate::output::console::{format_models, publish_selection, publish_status};
use crate::output::files::{load_images, write_report};
use crate::workflow::config::ClientConfig;
use anyhow::Context;
use log::warn;
use std::path::PathBuf;
use visionbox_core::processing::BatchRun;
use visionbox_core::report::render::JSON_TITLE;
use visionbox_core::report::render_structured;
use visionbox_core::telemetry::{MetricsSnapshot, Notifier};
use visionbox_core::{AppState, Clock, InferenceService, VisionError};

/// What the user asked for on this invocation.
#[derive(Debug, Clone, Default)]
pub struct SessionRequest {
    pub images: Vec<PathBuf>,
    pub model: Option<String>,
    pub list_models: bool,
    pub report: bool,
    pub json: bool,
}

impl SessionRequest {
    /// A pure model query or switch does not need a batch.
    fn wants_batch(&self) -> bool {
        !self.images.is_empty() || (!self.list_models && self.model.is_none())
    }
}

pub struct SessionOutcome {
    pub batch: Option<BatchRun>,
    pub report_path: Option<PathBuf>,
    pub metrics: MetricsSnapshot,
}

/// One run of the client against a service.
pub struct Session<S, C: Clock> {
    config: ClientConfig,
    service: S,
    notifier: Box<dyn Notifier>,
    state: AppState<C>,
}

impl<S: InferenceService, C: Clock> Session<S, C> {
    pub fn new(config: ClientConfig, service: S, clock: C, notifier: Box<dyn Notifier>) -> Self {
        let state = AppState::new(clock, config.model_labels.clone());
        Self {
            config,
            service,
            notifier,
            state,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState<C> {
        &self.state
    }

    pub async fn execute(&mut self, request: &SessionRequest) -> anyhow::Result<SessionOutcome> {
        self.state.load_models(&self.service).await;

        if request.list_models {
            println!("{}", format_models(self.state.models()));
        }

        if let Some(model) = &request.model {
            if let Err(err) = self
                .state
                .set_model(model.clone(), &self.service, self.notifier.as_ref())
                .await
            {
                warn!("continuing with service-side model unchanged: {}", err);
            }
        }

        let mut outcome = SessionOutcome {
            batch: None,
            report_path: None,
            metrics: MetricsSnapshot::default(),
        };

        if request.wants_batch() {
            let images = load_images(&request.images).context("loading selected images")?;
            self.state.select_images(images);
            publish_selection(self.state.selection());

            match self
                .state
                .run_batch(&self.service, self.notifier.as_ref())
                .await
            {
                Ok(run) => outcome.batch = Some(run),
                Err(VisionError::NothingSelected(_)) => {}
                Err(err) => return Err(err).context("running upload batch"),
            }
        }

        if let Some(table) = self.state.summary_table() {
            println!("{}", table);
        }

        if request.json {
            let json = render_structured(&self.state.structured_view())
                .context("rendering structured view")?;
            println!("{}\n{}", JSON_TITLE, json);
        }

        if request.report {
            if let Ok(document) = self.state.report(self.notifier.as_ref()) {
                let path = write_report(&document, &self.config.output_dir)?;
                publish_status(&format!("Report written to {}", path.display()));
                outcome.report_path = Some(path);
            }
        }

        outcome.metrics = self.state.metrics();
        Ok(outcome)
    }
}
