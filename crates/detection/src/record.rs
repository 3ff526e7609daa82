use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// One raw record as returned by the inference collaborator.
///
/// Every field is optional on the wire; which ones must be present for the
/// record to survive normalization is decided in [`crate::normalize`].
/// `points`/`polygon` are accepted so polygon-capable models deserialize
/// cleanly, but they are unused (axis-aligned boxes only for now).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrediction {
    pub class: Option<String>,
    pub label: Option<String>,
    pub confidence: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    #[serde(default)]
    pub points: Option<serde_json::Value>,
    #[serde(default)]
    pub polygon: Option<serde_json::Value>,
}

/// A normalized detection: validated label, confidence and corner-form box.
///
/// Confidence is whatever the service reported (default 0 when absent); values
/// outside [0,1] pass through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl Detection {
    /// Case-insensitive label match.
    pub fn has_label(&self, label: &str) -> bool {
        self.label.eq_ignore_ascii_case(label)
    }
}
