pub mod detection;
pub mod image;
pub mod model;

pub use detection::{Detection, Prediction, UploadResult};
pub use image::RawImage;
pub use model::{Model, ModelCatalog, ModelDescriptor, ModelSelectionState};
