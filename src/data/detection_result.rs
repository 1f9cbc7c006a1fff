use serde::{Deserialize, Serialize};
use crate::common::DetRect;
use crate::data::LabelTable;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One labeled detection, as handed to the caller.
///
/// # Fields
///
/// * `index` - Class id.
/// * `label` - Class name, or `"unknown"` when the label table is shorter than the model.
/// * `confidence` - Best class score.
/// * `pixel_rect` - Box in source-image pixel coordinates.
/// * `normalized_rect` - Box in `[0, 1]` coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedBox {
    pub index: usize,
    pub label: String,
    pub confidence: f32,
    pub pixel_rect: DetRect,
    pub normalized_rect: DetRect,
}

/// Everything produced by one detector call.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub orig_shape: ImageSize,
    pub boxes: Vec<DetectedBox>,
    /// Wall-clock time of the call, in milliseconds.
    pub speed_ms: f64,
    pub fps: f64,
    pub names: LabelTable,
}

impl std::fmt::Debug for DetectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut f = f.debug_struct("DetectionResult");
        f.field("orig_shape", &self.orig_shape);
        if !self.boxes.is_empty() {
            f.field("boxes", &self.boxes);
        }
        f.field("speed_ms", &self.speed_ms)
            .field("fps", &self.fps)
            .field("names", &self.names.len());
        f.finish()
    }
}

impl DetectionResult {
    /// Builds the aggregate; `fps` is derived from `speed_ms` (0 when the time is not positive).
    pub fn new(orig_shape: ImageSize, boxes: Vec<DetectedBox>, speed_ms: f64, names: LabelTable) -> Self {
        Self {
            orig_shape,
            boxes,
            speed_ms,
            fps: fps_from_ms(speed_ms),
            names,
        }
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// `(view_width / image_width, view_height / image_height)`, the factors an overlay
    /// multiplies `pixel_rect` by. `(0, 0)` for an empty source image.
    pub fn scale_factors(&self, view_width: f32, view_height: f32) -> (f32, f32) {
        if self.orig_shape.width == 0 || self.orig_shape.height == 0 {
            return (0.0, 0.0);
        }
        (
            view_width / self.orig_shape.width as f32,
            view_height / self.orig_shape.height as f32,
        )
    }
}

pub fn fps_from_ms(elapsed_ms: f64) -> f64 {
    if elapsed_ms > 0.0 {
        1000.0 / elapsed_ms
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_guard() {
        assert_eq!(fps_from_ms(0.0), 0.0);
        assert_eq!(fps_from_ms(-3.0), 0.0);
        assert!((fps_from_ms(40.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn scale_factors_for_view() {
        let result = DetectionResult::new(ImageSize::new(640, 480), vec![], 10.0, LabelTable::default());
        assert_eq!(result.scale_factors(320.0, 960.0), (0.5, 2.0));
        assert!(result.is_empty());
    }
}
