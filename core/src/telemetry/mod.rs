pub mod log;
pub mod metrics;
pub mod notice;

pub use log::LogManager;
pub use metrics::{MetricsRecorder, MetricsSnapshot};
pub use notice::{MemoryNotifier, Notice, NoticeLevel, Notifier};
