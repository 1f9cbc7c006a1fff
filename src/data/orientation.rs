use serde::{Deserialize, Serialize};

/// Camera context of a frame. Decides which preprocessing pipeline runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation {
    pub rotate_for_camera: bool,
    pub is_landscape: bool,
    pub is_front_camera: bool,
}

/// Counter-clockwise quarter turns applied before resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    /// One quarter turn (90°).
    Quarter,
    /// Three quarter turns (270°).
    ThreeQuarters,
}

impl Orientation {
    /// Still image, no rotation.
    pub fn single_image() -> Self {
        Self::default()
    }

    pub fn camera(is_landscape: bool, is_front_camera: bool) -> Self {
        Self {
            rotate_for_camera: true,
            is_landscape,
            is_front_camera,
        }
    }

    pub fn rotation(&self) -> Rotation {
        if !self.rotate_for_camera || self.is_landscape {
            Rotation::None
        } else if self.is_front_camera {
            Rotation::Quarter
        } else {
            Rotation::ThreeQuarters
        }
    }
}

impl Rotation {
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 1,
            Rotation::ThreeQuarters => 3,
        }
    }
}
