use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One classified object returned by the inference service.
///
/// Only `class` is consulted by the client. Confidence, geometry and any
/// other server fields ride along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Detection {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            extra: Map::new(),
        }
    }
}

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Prediction {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self {
            detections,
            extra: Map::new(),
        }
    }

    /// Labels the prediction with the moment it was received.
    ///
    /// A `timestamp` sent by the server is discarded in favour of the
    /// client-side receipt time.
    pub fn received_at(self, timestamp: impl Into<String>) -> UploadResult {
        let mut extra = self.extra;
        extra.remove("timestamp");
        UploadResult {
            detections: self.detections,
            timestamp: timestamp.into(),
            extra,
        }
    }
}

/// A successfully processed image of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub detections: Vec<Detection>,
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UploadResult {
    pub fn new(detections: Vec<Detection>, timestamp: impl Into<String>) -> Self {
        Self {
            detections,
            timestamp: timestamp.into(),
            extra: Map::new(),
        }
    }
}
