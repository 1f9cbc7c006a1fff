use image::{DynamicImage, RgbImage};

/// Decoded RGB source frame handed to the detector.
#[derive(Debug, Clone, Default)]
pub struct DetImage {
    pub image: RgbImage,
}

impl std::ops::Deref for DetImage {
    type Target = RgbImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

/// Any decoded image; alpha is dropped and grey is expanded to RGB.
impl From<DynamicImage> for DetImage {
    fn from(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }
}

impl From<RgbImage> for DetImage {
    fn from(image: RgbImage) -> Self {
        Self { image }
    }
}
