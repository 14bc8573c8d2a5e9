use std::sync::Mutex;

pub const MSG_NOTHING_SELECTED: &str = "Please select at least one image.";
pub const MSG_UPLOAD_FAILED: &str = "Failed to upload and process an image.";
pub const MSG_NO_REPORT_DATA: &str = "No data available to generate a report.";
pub const MSG_MODEL_SWITCH_FAILED: &str = "Failed to switch the model.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A transient message meant for the person at the keyboard, as opposed to
/// the diagnostics written through `log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Keeps every notice in memory, in emission order.
#[derive(Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.level == NoticeLevel::Warning)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
