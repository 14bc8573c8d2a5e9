use crate::inference::UploadResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One summary line covering every detection of a class across a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub id: usize,
    #[serde(rename = "type")]
    pub box_type: String,
    pub count: usize,
    pub timestamps: String,
}

struct Bucket<'a> {
    class: &'a str,
    timestamps: Vec<&'a str>,
}

/// Collapses per-image results into class rows.
///
/// Rows come out in first-appearance order of the class label, walking
/// results in batch order and detections in their given order. Each
/// contributing detection adds one timestamp entry; duplicates are kept.
pub fn aggregate(results: &[UploadResult]) -> Vec<AggregatedRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<Bucket<'_>> = Vec::new();

    for result in results {
        for detection in &result.detections {
            let slot = *index.entry(detection.class.as_str()).or_insert_with(|| {
                buckets.push(Bucket {
                    class: detection.class.as_str(),
                    timestamps: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].timestamps.push(result.timestamp.as_str());
        }
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(position, bucket)| AggregatedRow {
            id: position + 1,
            box_type: bucket.class.to_string(),
            count: bucket.timestamps.len(),
            timestamps: bucket.timestamps.join(", "),
        })
        .collect()
}

pub fn total_count(rows: &[AggregatedRow]) -> usize {
    rows.iter().map(|row| row.count).sum()
}
