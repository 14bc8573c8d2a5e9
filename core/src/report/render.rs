use crate::processing::aggregator::{total_count, AggregatedRow};
use crate::prelude::{VisionError, VisionResult};
use crate::report::document::{ReportDocument, StructuredRow};

pub const SUMMARY_TITLE: &str = "Prediction Results by Box Type";
pub const JSON_TITLE: &str = "Detection Results in JSON";

fn grid_line(cells: &[&str], widths: &[usize]) -> String {
    let padded = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!(" {}{} ", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("|{}|\n", padded)
}

/// Lays out `rows` as a fixed-width grid with `+---+` rules.
fn grid(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");
    let rule = format!("+{}+\n", rule);

    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&grid_line(header, &widths));
    out.push_str(&rule);
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&grid_line(&cells, &widths));
    }
    out.push_str(&rule);
    out
}

/// Plain-text rendering of the detection report.
pub fn render_document(document: &ReportDocument) -> String {
    let header: Vec<&str> = document.header.iter().map(String::as_str).collect();
    let body: Vec<Vec<String>> = document.body.iter().map(|row| row.to_vec()).collect();

    let mut out = String::new();
    out.push_str(&format!("{}\n", document.title));
    out.push_str(&format!("{}\n\n", document.generated_line()));
    out.push_str(&format!("{}\n", document.summary_label()));
    out.push_str(&grid(&header, &body));
    out.push_str(&format!("\n{}\n", document.total_line()));
    out
}

/// On-screen results table: one line per class and a closing `Total` row.
pub fn render_summary(rows: &[AggregatedRow]) -> String {
    let mut body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| vec![row.id.to_string(), row.box_type.clone(), row.count.to_string()])
        .collect();
    body.push(vec![
        "Total".to_string(),
        String::new(),
        total_count(rows).to_string(),
    ]);

    format!(
        "{}\n{}",
        SUMMARY_TITLE,
        grid(&["Sr. No.", "Type of Box", "Count"], &body)
    )
}

/// Pretty JSON with two-space indentation.
pub fn render_structured(view: &[StructuredRow]) -> VisionResult<String> {
    serde_json::to_string_pretty(view).map_err(|e| VisionError::Render(e.to_string()))
}
