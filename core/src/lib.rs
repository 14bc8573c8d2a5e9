//! Client core for the VisionBox inventory detector.
//!
//! Uploads a batch of images to a remote inference service one at a time,
//! folds the per-image detections into class-level summary rows, and turns
//! those rows into a report document or a structured view.

pub mod clock;
pub mod inference;
pub mod prelude;
pub mod processing;
pub mod report;
pub mod state;
pub mod telemetry;

pub use clock::{Clock, FixedClock, SystemClock};
pub use prelude::{InferenceService, VisionError, VisionResult};
pub use state::AppState;
