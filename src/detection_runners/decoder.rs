//! Decode & suppression of the raw detection head output.
//!
//! The output is feature-major: shape `[4 + num_classes, num_predictions]`, rows
//! `[x_center, y_center, width, height, class_0, class_1, ...]`, one column per prediction.
//! Coordinates are normalized to `[0, 1]`.

use ndarray::{ArrayView2, Axis};
use crate::common::{DetRect, Detection};
use crate::data::Thresholds;
use crate::detection_runners::nms::nms_per_class;

/// Rows of the output holding the box; class scores start right after.
pub const BOX_FEATURES: usize = 4;

/// Stateless between calls apart from the scratch vectors, which are cleared on every use.
#[derive(Debug, Default)]
pub struct Decoder {
    thresholds: Thresholds,
    candidates: Vec<Detection>,
    suppressed: Vec<bool>,
}

impl Decoder {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            candidates: Vec::new(),
            suppressed: Vec::new(),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn thresholds_mut(&mut self) -> &mut Thresholds {
        &mut self.thresholds
    }

    /// Full pass: decode, suppress, cap. The returned slice is valid until the next call.
    pub fn run(&mut self, output: ArrayView2<f32>) -> &[Detection] {
        self.decode(output);
        let decoded = self.candidates.len();

        nms_per_class(&mut self.candidates, self.thresholds.iou, &mut self.suppressed);
        let kept = self.candidates.len();

        self.candidates.truncate(self.thresholds.num_items);
        log::trace!(
            "Decoded {} candidates, {} after suppression, {} returned",
            decoded,
            kept,
            self.candidates.len()
        );

        &self.candidates
    }

    /// Confidence filtering only: fills the candidate list in prediction order.
    pub fn decode(&mut self, output: ArrayView2<f32>) -> &[Detection] {
        self.candidates.clear();

        if output.nrows() <= BOX_FEATURES {
            return &self.candidates;
        }

        for column in output.axis_iter(Axis(1)) {
            let Some((class_index, confidence)) = best_class(column.iter().skip(BOX_FEATURES).copied()) else {
                continue;
            };
            if confidence < self.thresholds.confidence {
                continue;
            }

            let rect = DetRect::from_cxcy_wh(column[0], column[1], column[2], column[3]).clamp01();
            if rect.is_degenerate() {
                continue;
            }

            self.candidates.push(Detection::new(rect, class_index, confidence));
        }

        &self.candidates
    }
}

/// Argmax over class scores, counting only scores above zero.
///
/// Ties keep the lowest index; NaN scores never win. `None` when no class scores above zero.
fn best_class(scores: impl Iterator<Item = f32>) -> Option<(usize, f32)> {
    let mut best = None;
    let mut best_score = 0.0;
    for (class_index, score) in scores.enumerate() {
        if score > best_score {
            best_score = score;
            best = Some((class_index, score));
        }
    }
    best
}
