use crate::inference::{ModelCatalog, Prediction, RawImage};
use async_trait::async_trait;

/// Common error type for the VisionBox client core.
#[derive(thiserror::Error, Debug)]
pub enum VisionError {
    #[error("nothing selected: {0}")]
    NothingSelected(String),
    #[error("no report data: {0}")]
    NoReportData(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("render failure: {0}")]
    Render(String),
}

pub type VisionResult<T> = Result<T, VisionError>;

/// Remote inference service consumed by the client.
///
/// Every call suspends at the network boundary; the client drives all of
/// them from one logical thread, so futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait InferenceService {
    /// `GET /models`
    async fn list_models(&self) -> VisionResult<ModelCatalog>;
    /// `POST /predict` with a single image.
    async fn predict(&self, image: &RawImage) -> VisionResult<Prediction>;
    /// `POST /set-model?model_name=<id>`; the body is ignored.
    async fn set_model(&self, model_id: &str) -> VisionResult<()>;
}
