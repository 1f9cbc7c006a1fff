use serde::{Deserialize, Serialize};

/// Axis-aligned box in corner format `(x1, y1, x2, y2)`.
///
/// The same type carries both normalized `[0, 1]` coordinates and source-image pixel
/// coordinates; which one a value holds is decided by where it lives (see `DetectedBox`).
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl DetRect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// `x1 = cx - w/2, y1 = cy - h/2, x2 = cx + w/2, y2 = cy + h/2`.
    pub fn from_cxcy_wh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x1: cx - w / 2.0,
            y1: cy - h / 2.0,
            x2: cx + w / 2.0,
            y2: cy + h / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn cx(&self) -> f32 {
        self.x1 + self.width() / 2.
    }

    pub fn cy(&self) -> f32 {
        self.y1 + self.height() / 2.
    }

    /// `(cx, cy, w, h)`, the inverse of [`DetRect::from_cxcy_wh`].
    pub fn cxy_wh(&self) -> (f32, f32, f32, f32) {
        (self.cx(), self.cy(), self.width(), self.height())
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Clips every coordinate into `[0, 1]`. Out-of-range values are clipped, never rejected.
    pub fn clamp01(self) -> Self {
        Self {
            x1: self.x1.clamp(0.0, 1.0),
            y1: self.y1.clamp(0.0, 1.0),
            x2: self.x2.clamp(0.0, 1.0),
            y2: self.y2.clamp(0.0, 1.0),
        }
    }

    /// True when the box has no positive extent on either axis (NaN coordinates included).
    pub fn is_degenerate(&self) -> bool {
        !(self.x2 > self.x1 && self.y2 > self.y1)
    }

    /// Computes the intersection area between this bounding box and another.
    pub fn intersect(&self, other: &DetRect) -> f32 {
        let left = self.x1.max(other.x1);
        let right = self.x2.min(other.x2);
        let top = self.y1.max(other.y1);
        let bottom = self.y2.min(other.y2);
        (right - left).max(0.) * (bottom - top).max(0.)
    }

    /// Computes the union area between this bounding box and another.
    pub fn union(&self, other: &DetRect) -> f32 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Computes the intersection over union (IoU) between this bounding box and another.
    ///
    /// Returns `0` when the union area is not positive.
    pub fn iou(&self, other: &DetRect) -> f32 {
        let union = self.union(other);
        if union > 0.0 {
            self.intersect(other) / union
        } else {
            0.0
        }
    }

    /// Maps a normalized box onto an image of `width` x `height` pixels.
    pub fn scale_to(&self, width: f32, height: f32) -> Self {
        Self {
            x1: self.x1 * width,
            y1: self.y1 * height,
            x2: self.x2 * width,
            y2: self.y2 * height,
        }
    }
}
