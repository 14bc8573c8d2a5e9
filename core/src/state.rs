use crate::clock::Clock;
use crate::inference::{ModelSelectionState, RawImage, UploadResult};
use crate::prelude::{InferenceService, VisionResult};
use crate::processing::{
    aggregate, AggregatedRow, BatchRun, ImageSelection, ModelRegistry, PreviewPool,
    UploadOrchestrator,
};
use crate::report::{
    render_summary, to_document, to_structured_view, ReportDocument, StructuredRow,
};
use crate::telemetry::notice::MSG_NO_REPORT_DATA;
use crate::telemetry::{MetricsSnapshot, Notice, Notifier};
use std::collections::HashMap;

/// Everything the client knows during one session.
///
/// Selection and result set are only ever replaced wholesale, through the
/// transition methods below.
pub struct AppState<C: Clock> {
    selection: ImageSelection,
    previews: PreviewPool,
    results: Vec<UploadResult>,
    registry: ModelRegistry,
    orchestrator: UploadOrchestrator<C>,
}

impl<C: Clock> AppState<C> {
    pub fn new(clock: C, model_labels: HashMap<String, String>) -> Self {
        Self {
            selection: ImageSelection::default(),
            previews: PreviewPool::new(),
            results: Vec::new(),
            registry: ModelRegistry::new(model_labels),
            orchestrator: UploadOrchestrator::new(clock),
        }
    }

    pub fn selection(&self) -> &ImageSelection {
        &self.selection
    }

    pub fn outstanding_previews(&self) -> usize {
        self.previews.outstanding()
    }

    pub fn results(&self) -> &[UploadResult] {
        &self.results
    }

    pub fn models(&self) -> &ModelSelectionState {
        self.registry.state()
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.orchestrator.metrics().snapshot()
    }

    pub fn select_images(&mut self, images: Vec<RawImage>) {
        self.selection.replace(images, &mut self.previews);
    }

    /// Runs the current selection as one batch. The result set is replaced
    /// only once the batch has finished.
    pub async fn run_batch<S>(
        &mut self,
        service: &S,
        notifier: &dyn Notifier,
    ) -> VisionResult<BatchRun>
    where
        S: InferenceService + ?Sized,
    {
        let run = self
            .orchestrator
            .run(self.selection.images(), service, notifier)
            .await?;
        if let BatchRun::Completed(outcome) = &run {
            self.results = outcome.successes.clone();
        }
        Ok(run)
    }

    pub async fn load_models<S>(&mut self, service: &S) -> &ModelSelectionState
    where
        S: InferenceService + ?Sized,
    {
        self.registry.load_available(service).await
    }

    pub fn choose_model(&mut self, id: impl Into<String>) {
        self.registry.choose(id);
    }

    pub async fn set_model<S>(
        &mut self,
        id: impl Into<String>,
        service: &S,
        notifier: &dyn Notifier,
    ) -> VisionResult<()>
    where
        S: InferenceService + ?Sized,
    {
        self.registry.select(id, service, notifier).await
    }

    pub fn summary(&self) -> Vec<AggregatedRow> {
        aggregate(&self.results)
    }

    /// The on-screen results table, available once a batch has produced at
    /// least one result, even if no result carried a detection.
    pub fn summary_table(&self) -> Option<String> {
        if self.results.is_empty() {
            return None;
        }
        Some(render_summary(&self.summary()))
    }

    /// Builds the report stamped with the current time. An empty summary is
    /// reported to the user and produces no document.
    pub fn report(&self, notifier: &dyn Notifier) -> VisionResult<ReportDocument> {
        let generated_at = self.orchestrator.clock().timestamp();
        to_document(&self.summary(), &generated_at).map_err(|err| {
            notifier.notify(Notice::warning(MSG_NO_REPORT_DATA));
            err
        })
    }

    pub fn structured_view(&self) -> Vec<StructuredRow> {
        to_structured_view(&self.summary())
    }
}
