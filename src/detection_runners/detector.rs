use std::time::Instant;
use anyhow::{bail, Result};
use image::RgbImage;
use ndarray::{Array3, Array4, ArrayView2, Axis};
use crate::data::{
    DetectedBox, DetectionResult, ImageSize, LabelTable, Orientation, Thresholds, TimeCalc,
    CROSS_MARK, STAGE_INFERENCE, STAGE_POSTPROCESS, STAGE_PREPROCESS,
};
use crate::detection_runners::assembly::assemble_boxes;
use crate::detection_runners::decoder::{Decoder, BOX_FEATURES};
use crate::detection_runners::image_ops::{Preprocessor, CHANNELS};
use crate::detection_runners::inference_process::InferenceAdapter;

/// One detection engine: preprocessing, the inference adapter, decode & suppression and
/// result assembly, plus the scratch buffers they reuse.
///
/// Calls take `&mut self`; share an instance across threads only behind external
/// synchronization, or give each thread its own (see `DetectionWorker`).
#[derive(Debug)]
pub struct Detector<A: InferenceAdapter> {
    adapter: A,
    labels: LabelTable,
    preprocessor: Preprocessor,
    decoder: Decoder,
    input: Array4<f32>,
    output: Array3<f32>,
    num_features: usize,
    num_predictions: usize,
    timings: TimeCalc,
}

impl<A: InferenceAdapter> Detector<A> {
    pub fn new(adapter: A, labels: LabelTable) -> Result<Self> {
        Self::with_thresholds(adapter, labels, Thresholds::default())
    }

    /// Validates the adapter's tensor shapes and allocates the scratch buffers.
    ///
    /// Fails when the input is not `[1, H, W, 3]` or the output is not
    /// `[1, 4 + num_classes, num_predictions]` with at least one class and one prediction.
    pub fn with_thresholds(adapter: A, labels: LabelTable, thresholds: Thresholds) -> Result<Self> {
        let input_shape = adapter.input_shape();
        let (input_height, input_width) = match input_shape.as_slice() {
            &[1, h, w, CHANNELS] if h > 0 && w > 0 => (h, w),
            _ => bail!(
                "{CROSS_MARK} Input tensor shape not supported. Expected [1, H, W, 3]. Got {:?}",
                input_shape
            ),
        };

        let output_shape = adapter.output_shape();
        let (num_features, num_predictions) = match output_shape.as_slice() {
            &[1, f, p] if f > BOX_FEATURES && p > 0 => (f, p),
            _ => bail!(
                "{CROSS_MARK} Output tensor shape not supported. Expected [1, 4 + classes, predictions]. Got {:?}",
                output_shape
            ),
        };

        let preprocessor = Preprocessor::new(u32::try_from(input_width)?, u32::try_from(input_height)?);
        let input = preprocessor.new_input_tensor();
        let output = Array3::zeros((1, num_features, num_predictions));

        let num_classes = num_features - BOX_FEATURES;
        if labels.len() != num_classes {
            log::warn!(
                "Model predicts {} classes but {} labels were supplied",
                num_classes,
                labels.len()
            );
        }

        log::info!(
            "Detector ready | Backend: {} | Input: {}x{} | Output: [1, {}, {}] | Labels: {}",
            adapter.backend(),
            input_width,
            input_height,
            num_features,
            num_predictions,
            labels.len()
        );

        Ok(Self {
            adapter,
            labels,
            preprocessor,
            decoder: Decoder::new(thresholds),
            input,
            output,
            num_features,
            num_predictions,
            timings: TimeCalc::default(),
        })
    }

    /// Still-image detection, no rotation.
    pub fn detect(&mut self, image: &RgbImage) -> Result<DetectionResult> {
        self.detect_with_orientation(image, Orientation::single_image())
    }

    /// Runs the whole pipeline on one frame.
    ///
    /// Errors only come from an empty `image` or from the inference adapter; filtering never
    /// fails and an empty box list is a normal result.
    pub fn detect_with_orientation(&mut self, image: &RgbImage, orientation: Orientation) -> Result<DetectionResult> {
        let image_size = ImageSize::new(image.width(), image.height());
        let start = Instant::now();

        let t_pre = Instant::now();
        self.preprocessor.process(image, orientation, &mut self.input)?;
        let t_pre = t_pre.elapsed();

        let t_run = Instant::now();
        self.output.fill(0.0);
        self.adapter.run(self.input.view(), &mut self.output)?;
        if self.output.shape() != [1, self.num_features, self.num_predictions] {
            bail!(
                "Inference adapter changed the output shape to {:?}",
                self.output.shape()
            );
        }
        let t_run = t_run.elapsed();

        let t_post = Instant::now();
        let detections = self.decoder.run(self.output.index_axis(Axis(0), 0));
        let boxes = assemble_boxes(detections, &self.labels, image_size);
        let t_post = t_post.elapsed();

        let elapsed = start.elapsed();
        self.timings.add_or_push(STAGE_PREPROCESS, t_pre);
        self.timings.add_or_push(STAGE_INFERENCE, t_run);
        self.timings.add_or_push(STAGE_POSTPROCESS, t_post);
        self.timings.finish_call();

        let result = DetectionResult::new(
            image_size,
            boxes,
            elapsed.as_secs_f64() * 1000.0,
            self.labels.clone(),
        );

        log::debug!(
            "Preprocess: {t_pre:?} | Inference: {t_run:?} | Postprocess: {t_post:?} | Total: {elapsed:?} | FPS: {:.1} | Boxes: {}",
            result.fps,
            result.box_count()
        );

        Ok(result)
    }

    /// Post-inference half of the pipeline, for callers that run the model themselves.
    ///
    /// `output` is the `[4 + num_classes, num_predictions]` slice of the raw output.
    pub fn decode_output(&mut self, output: ArrayView2<f32>, image_size: ImageSize) -> Vec<DetectedBox> {
        let detections = self.decoder.run(output);
        assemble_boxes(detections, &self.labels, image_size)
    }

    pub fn thresholds(&self) -> &Thresholds {
        self.decoder.thresholds()
    }

    pub fn thresholds_mut(&mut self) -> &mut Thresholds {
        self.decoder.thresholds_mut()
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.thresholds().confidence
    }

    pub fn set_confidence_threshold(&mut self, threshold: f32) {
        self.thresholds_mut().confidence = threshold;
    }

    pub fn iou_threshold(&self) -> f32 {
        self.thresholds().iou
    }

    pub fn set_iou_threshold(&mut self, threshold: f32) {
        self.thresholds_mut().iou = threshold;
    }

    pub fn num_items_threshold(&self) -> usize {
        self.thresholds().num_items
    }

    pub fn set_num_items_threshold(&mut self, threshold: usize) {
        self.thresholds_mut().num_items = threshold;
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn input_width(&self) -> u32 {
        self.preprocessor.input_width()
    }

    pub fn input_height(&self) -> u32 {
        self.preprocessor.input_height()
    }

    pub fn num_classes(&self) -> usize {
        self.num_features - BOX_FEATURES
    }

    pub fn num_predictions(&self) -> usize {
        self.num_predictions
    }

    pub fn timings(&self) -> &TimeCalc {
        &self.timings
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}
