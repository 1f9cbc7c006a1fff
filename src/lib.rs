pub mod common;
pub mod data;
pub mod detection_runners;

pub use common::{DetImage, DetRect, Detection, DetectorConfig, InferenceDevice};
pub use data::{
    DetectedBox, DetectionResult, ImageSize, LabelTable, Orientation, Rotation, Thresholds,
};
pub use detection_runners::{DetectionWorker, Detector, InferenceAdapter};

#[cfg(feature = "ort")]
pub use ort_init::init_detector;

#[cfg(feature = "ort")]
mod ort_init {
    use anyhow::{bail, Result};
    use crate::common::{DetImage, DetectorConfig};
    use crate::data::{FsAccess, LabelTable, CROSS_MARK};
    use crate::detection_runners::{Detector, OrtAdapter};

    /// Builds a ready-to-use ONNX Runtime detector from `config` and runs one warm-up pass.
    ///
    /// Labels come from `config.labels_path` when set, otherwise from the names embedded in
    /// the model.
    pub fn init_detector(config: &DetectorConfig) -> Result<Detector<OrtAdapter>> {
        log::info!(
            "Initializing ORT session with ({}) execution provider",
            config.device
        );
        let adapter = OrtAdapter::new(config)?;

        let labels = if config.labels_path.is_empty() {
            match adapter.embedded_names() {
                Some(names) => LabelTable::from(names),
                None => bail!("{CROSS_MARK} No label file configured and the model carries no class names"),
            }
        } else {
            LabelTable::from_file(FsAccess::resolve(&config.labels_path, None)?)?
        };

        let mut detector = Detector::with_thresholds(adapter, labels, config.thresholds)?;

        let warmup = DetImage::from(image::RgbImage::new(
            detector.input_width(),
            detector.input_height(),
        ));
        detector.detect(&warmup)?;
        log::info!("Detector warm-up done in {:?}", detector.timings().total());

        Ok(detector)
    }
}
