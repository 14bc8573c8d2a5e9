use crate::processing::aggregator::{total_count, AggregatedRow};
use crate::prelude::{VisionError, VisionResult};
use crate::telemetry::notice::MSG_NO_REPORT_DATA;
use serde::{Deserialize, Serialize};

pub const REPORT_TITLE: &str = "VisionBox Detection Report";
pub const REPORT_FILENAME: &str = "VisionBox_Detection_Report.pdf";
pub const SUMMARY_LABEL: &str = "Detection Summary:";
pub const TABLE_HEADER: [&str; 4] = ["Sr. No.", "Type of Box", "Count", "Timestamps"];

/// Renderer-independent payload of the detection report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: String,
    pub header: [String; 4],
    pub body: Vec<[String; 4]>,
    pub total: usize,
}

impl ReportDocument {
    pub fn generated_line(&self) -> String {
        format!("Generated At: {}", self.generated_at)
    }

    pub fn summary_label(&self) -> &'static str {
        SUMMARY_LABEL
    }

    pub fn total_line(&self) -> String {
        format!("Overall Total Count: {}", self.total)
    }

    pub fn suggested_filename(&self) -> &'static str {
        REPORT_FILENAME
    }
}

/// Builds the report for `rows`. Refuses to build an empty report.
pub fn to_document(rows: &[AggregatedRow], generated_at: &str) -> VisionResult<ReportDocument> {
    if rows.is_empty() {
        return Err(VisionError::NoReportData(MSG_NO_REPORT_DATA.into()));
    }

    let body = rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.box_type.clone(),
                row.count.to_string(),
                row.timestamps.clone(),
            ]
        })
        .collect();

    Ok(ReportDocument {
        title: REPORT_TITLE.to_string(),
        generated_at: generated_at.to_string(),
        header: TABLE_HEADER.map(String::from),
        body,
        total: total_count(rows),
    })
}

/// Row of the on-screen structured view; the same as an aggregated row
/// without its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRow {
    #[serde(rename = "type")]
    pub box_type: String,
    pub count: usize,
    pub timestamps: String,
}

pub fn to_structured_view(rows: &[AggregatedRow]) -> Vec<StructuredRow> {
    rows.iter()
        .map(|row| StructuredRow {
            box_type: row.box_type.clone(),
            count: row.count,
            timestamps: row.timestamps.clone(),
        })
        .collect()
}
