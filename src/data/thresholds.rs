use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.40;
pub const DEFAULT_NUM_ITEMS_THRESHOLD: usize = 30;

/// Filtering parameters of the decode & suppression pass.
///
/// Values are taken as-is; a negative or >1 threshold simply changes what gets filtered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum best-class score for a candidate to be kept (`>=`).
    pub confidence: f32,
    /// Same-class overlap above which the weaker candidate is suppressed (strict `>`).
    pub iou: f32,
    /// Maximum number of boxes returned per call.
    pub num_items: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE_THRESHOLD,
            iou: DEFAULT_IOU_THRESHOLD,
            num_items: DEFAULT_NUM_ITEMS_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_confidence(mut self, x: f32) -> Self {
        self.confidence = x;
        self
    }

    pub fn with_iou(mut self, x: f32) -> Self {
        self.iou = x;
        self
    }

    pub fn with_num_items(mut self, n: usize) -> Self {
        self.num_items = n;
        self
    }
}
