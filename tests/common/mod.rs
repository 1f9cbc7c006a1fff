#![allow(dead_code)]

use anyhow::bail;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use ndarray::{Array3, Array4, ArrayView4};
use waste_detect::{InferenceAdapter, LabelTable};

pub const LABELS: [&str; 3] = ["plastic", "glass", "cardboard"];

pub fn labels() -> LabelTable {
    LabelTable::from(&LABELS[..])
}

/// One prediction column: box followed by one score per class.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
    pub scores: Vec<f32>,
}

impl Prediction {
    /// Box with `score` for `class_index` and zeros for every other class.
    pub fn new(cx: f32, cy: f32, w: f32, h: f32, class_index: usize, score: f32, num_classes: usize) -> Self {
        let mut scores = vec![0.0; num_classes];
        scores[class_index] = score;
        Self { cx, cy, w, h, scores }
    }
}

/// Builds a feature-major `[1, 4 + num_classes, num_predictions]` output tensor.
/// Columns past `predictions.len()` stay zero.
pub fn output_tensor(num_classes: usize, num_predictions: usize, predictions: &[Prediction]) -> Array3<f32> {
    let mut output = Array3::zeros((1, 4 + num_classes, num_predictions));
    for (p, pred) in predictions.iter().enumerate() {
        output[[0, 0, p]] = pred.cx;
        output[[0, 1, p]] = pred.cy;
        output[[0, 2, p]] = pred.w;
        output[[0, 3, p]] = pred.h;
        for (c, score) in pred.scores.iter().enumerate() {
            output[[0, 4 + c, p]] = *score;
        }
    }
    output
}

/// Returns a canned output and keeps the last input it was given.
#[derive(Debug, Clone)]
pub struct FakeAdapter {
    pub input_shape: Vec<usize>,
    pub output: Array3<f32>,
    pub last_input: Option<Array4<f32>>,
    pub calls: usize,
    pub fail: bool,
}

impl FakeAdapter {
    pub fn new(width: usize, height: usize, output: Array3<f32>) -> Self {
        Self {
            input_shape: vec![1, height, width, 3],
            output,
            last_input: None,
            calls: 0,
            fail: false,
        }
    }

    pub fn with_input_shape(mut self, shape: &[usize]) -> Self {
        self.input_shape = shape.to_vec();
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl InferenceAdapter for FakeAdapter {
    fn input_shape(&self) -> Vec<usize> {
        self.input_shape.clone()
    }

    fn output_shape(&self) -> Vec<usize> {
        self.output.shape().to_vec()
    }

    fn run(&mut self, input: ArrayView4<f32>, output: &mut Array3<f32>) -> anyhow::Result<()> {
        self.calls += 1;
        if self.fail {
            bail!("fake inference failure");
        }
        self.last_input = Some(input.to_owned());
        output.assign(&self.output);
        Ok(())
    }

    fn backend(&self) -> String {
        "fake".to_string()
    }
}

/// Asymmetric test scene: grey background with coloured blocks in three corners.
pub fn draw_scene(width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, Rgb([90, 90, 90]));
    let (bw, bh) = (width / 3, height / 4);
    draw_filled_rect_mut(&mut image, Rect::at(0, 0).of_size(bw, bh), Rgb([255, 0, 0]));
    draw_filled_rect_mut(
        &mut image,
        Rect::at((width - bw) as i32, 0).of_size(bw, bh),
        Rgb([0, 255, 0]),
    );
    draw_filled_rect_mut(
        &mut image,
        Rect::at(0, (height - bh) as i32).of_size(bw, bh),
        Rgb([0, 0, 255]),
    );
    image
}
