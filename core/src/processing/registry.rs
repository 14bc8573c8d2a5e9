use crate::inference::ModelSelectionState;
use crate::prelude::{InferenceService, VisionResult};
use crate::telemetry::notice::MSG_MODEL_SWITCH_FAILED;
use crate::telemetry::{LogManager, Notice, Notifier};
use std::collections::HashMap;

/// Holds the models the service offers and the one the user picked.
pub struct ModelRegistry {
    state: ModelSelectionState,
    labels: HashMap<String, String>,
    logger: LogManager,
}

impl ModelRegistry {
    pub fn new(labels: HashMap<String, String>) -> Self {
        Self {
            state: ModelSelectionState::default(),
            labels,
            logger: LogManager::new("models"),
        }
    }

    pub fn state(&self) -> &ModelSelectionState {
        &self.state
    }

    pub fn current(&self) -> &str {
        &self.state.current
    }

    /// Fetches the model list once at startup.
    ///
    /// Failures are logged and otherwise silent; the selection stays at
    /// whatever it held before the call.
    pub async fn load_available<S>(&mut self, service: &S) -> &ModelSelectionState
    where
        S: InferenceService + ?Sized,
    {
        match service.list_models().await {
            Ok(catalog) => {
                self.state = ModelSelectionState::from_catalog(catalog, &self.labels);
                self.logger.record(&format!(
                    "{} model(s) available, current '{}'",
                    self.state.available.len(),
                    self.state.current
                ));
            }
            Err(err) => {
                self.logger
                    .diagnostic(&format!("error fetching models: {}", err));
            }
        }
        &self.state
    }

    /// True when the service listed `id`, or when no list was ever loaded.
    pub fn is_offered(&self, id: &str) -> bool {
        self.state.available.is_empty() || self.state.find(id).is_some()
    }

    /// Changes the locally chosen model without contacting the service.
    pub fn choose(&mut self, id: impl Into<String>) {
        self.state.current = id.into();
    }

    /// Asks the service to activate the locally chosen model.
    ///
    /// On failure the local choice is kept as-is, so it may no longer match
    /// the model the service is actually running.
    pub async fn apply<S>(&self, service: &S, notifier: &dyn Notifier) -> VisionResult<()>
    where
        S: InferenceService + ?Sized,
    {
        let id = self.state.current.as_str();
        if !self.is_offered(id) {
            self.logger.diagnostic(&format!(
                "model '{}' is not in the service's model list, requesting it anyway",
                id
            ));
        }
        match service.set_model(id).await {
            Ok(()) => {
                self.logger.record(&format!("model switched to '{}'", id));
                notifier.notify(Notice::info(format!("Model switched to {}", id)));
                Ok(())
            }
            Err(err) => {
                self.logger
                    .diagnostic(&format!("error setting model '{}': {}", id, err));
                notifier.notify(Notice::warning(MSG_MODEL_SWITCH_FAILED));
                Err(err)
            }
        }
    }

    /// `choose` followed by `apply`.
    pub async fn select<S>(
        &mut self,
        id: impl Into<String>,
        service: &S,
        notifier: &dyn Notifier,
    ) -> VisionResult<()>
    where
        S: InferenceService + ?Sized,
    {
        self.choose(id);
        self.apply(service, notifier).await
    }
}
