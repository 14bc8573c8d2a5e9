pub mod document;
pub mod render;

pub use document::{
    to_document, to_structured_view, ReportDocument, StructuredRow, REPORT_FILENAME, REPORT_TITLE,
};
pub use render::{render_document, render_structured, render_summary};
