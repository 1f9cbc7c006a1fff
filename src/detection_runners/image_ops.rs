//! Functions to preprocess images.
//!
//! Every frame goes through one of four fixed pipelines picked from its [`Orientation`]:
//! optional rotation, bilinear resize to the model input, normalization, f32 NHWC tensor.

use anyhow::{bail, Result};
use fast_image_resize::{
    images::{Image as FirImage, ImageRef},
    pixels::PixelType,
    FilterType, ResizeAlg, ResizeOptions, Resizer,
};
use image::RgbImage;
use ndarray::{Array4, ArrayView4, Zip};
use crate::data::{Orientation, Rotation};

/// Subtracted from every raw channel value. Must match the training normalization.
pub const INPUT_MEAN: f32 = 0.0;
/// Divisor applied after the mean. Must match the training normalization.
pub const INPUT_STD: f32 = 255.0;
pub const CHANNELS: usize = 3;

/// Rotation + resize + normalize, reusing its resize buffers across calls.
pub struct Preprocessor {
    input_width: u32,
    input_height: u32,
    resizer: Resizer,
    options: ResizeOptions,
    resized: FirImage<'static>,
}

impl std::fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preprocessor")
            .field("input_width", &self.input_width)
            .field("input_height", &self.input_height)
            .finish()
    }
}

impl Preprocessor {
    pub fn new(input_width: u32, input_height: u32) -> Self {
        Self {
            input_width,
            input_height,
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
            resized: FirImage::new(input_width, input_height, PixelType::U8x3),
        }
    }

    pub fn input_width(&self) -> u32 {
        self.input_width
    }

    pub fn input_height(&self) -> u32 {
        self.input_height
    }

    /// Allocates a zeroed `[1, H, W, 3]` tensor of the right size for [`Preprocessor::process`].
    pub fn new_input_tensor(&self) -> Array4<f32> {
        Array4::zeros((1, self.input_height as usize, self.input_width as usize, CHANNELS))
    }

    /// Runs the pipeline for `orientation` and writes the result into `input`.
    pub fn process(&mut self, image: &RgbImage, orientation: Orientation, input: &mut Array4<f32>) -> Result<()> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            bail!("Cannot preprocess an empty image ({}x{})", width, height);
        }
        let expected = [1, self.input_height as usize, self.input_width as usize, CHANNELS];
        if input.shape() != expected {
            bail!("Input tensor shape {:?} does not match {:?}", input.shape(), expected);
        }

        let rotated = rotate(image, orientation.rotation());
        let image = rotated.as_ref().unwrap_or(image);
        let src = ImageRef::new(image.width(), image.height(), image.as_raw(), PixelType::U8x3)?;
        self.resizer.resize(&src, &mut self.resized, &self.options)?;

        normalize_into(self.resized.buffer(), input)
    }
}

/// Counter-clockwise quarter turns, `None` when the frame is used as is.
/// `image` rotates clockwise, hence the swapped names.
pub fn rotate(image: &RgbImage, rotation: Rotation) -> Option<RgbImage> {
    match rotation {
        Rotation::None => None,
        Rotation::Quarter => Some(image::imageops::rotate270(image)),
        Rotation::ThreeQuarters => Some(image::imageops::rotate90(image)),
    }
}

/// `(value - INPUT_MEAN) / INPUT_STD` for every byte of a packed RGB buffer, NHWC order.
fn normalize_into(buf: &[u8], input: &mut Array4<f32>) -> Result<()> {
    let src = ArrayView4::from_shape(input.raw_dim(), buf)?;
    Zip::from(input)
        .and(&src)
        .par_for_each(|out, &value| *out = (value as f32 - INPUT_MEAN) / INPUT_STD);
    Ok(())
}
