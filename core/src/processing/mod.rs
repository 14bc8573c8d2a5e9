pub mod aggregator;
pub mod orchestrator;
pub mod preview_pool;
pub mod registry;

pub use aggregator::{aggregate, total_count, AggregatedRow};
pub use orchestrator::{BatchOutcome, BatchRun, UploadOrchestrator};
pub use preview_pool::{ImageSelection, PreviewHandle, PreviewPool};
pub use registry::ModelRegistry;
