use serde::{Deserialize, Serialize};
use crate::common::DetRect;
use crate::detection_runners::nms::Nms;

/// Candidate produced by the decoder, before suppression.
///
/// `rect` is already clamped to `[0, 1]` and never degenerate; the decoder drops anything else.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub rect: DetRect,
    pub class_index: usize,
    pub confidence: f32,
}

impl Nms for Detection {
    fn iou(&self, other: &Self) -> f32 {
        self.rect.iou(&other.rect)
    }

    fn confidence(&self) -> f32 {
        self.confidence
    }

    fn class_index(&self) -> usize {
        self.class_index
    }
}

impl Detection {
    pub fn new(rect: DetRect, class_index: usize, confidence: f32) -> Self {
        Self {
            rect,
            class_index,
            confidence,
        }
    }
}
