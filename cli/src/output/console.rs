use visionbox_core::inference::ModelSelectionState;
use visionbox_core::processing::ImageSelection;
use visionbox_core::telemetry::{Notice, NoticeLevel, Notifier};

/// Shows notices on the terminal: information on stdout, warnings on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => println!("[VisionBox] {}", notice.message),
            NoticeLevel::Warning => eprintln!("[VisionBox] {}", notice.message),
        }
    }
}

pub fn publish_status(message: &str) {
    println!("[VisionBox] {}", message);
}

pub fn publish_selection(selection: &ImageSelection) {
    for (position, preview) in selection.previews().iter().enumerate() {
        println!(
            "  Preview {}: {} ({} bytes)",
            position + 1,
            preview.filename(),
            preview.byte_len()
        );
    }
}

pub fn format_models(state: &ModelSelectionState) -> String {
    if state.available.is_empty() {
        return "No models available.".to_string();
    }
    state
        .available
        .iter()
        .map(|model| {
            let marker = if model.id == state.current { '*' } else { ' ' };
            format!("{} {:<10} {}", marker, model.id, model.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
