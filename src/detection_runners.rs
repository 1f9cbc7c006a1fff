pub mod assembly;
pub mod decoder;
pub mod detector;
pub mod image_ops;
pub mod inference_process;
pub mod nms;
pub mod worker;
#[cfg(feature = "ort")]
pub mod ort_detector;

pub use detector::Detector;
pub use inference_process::InferenceAdapter;
pub use worker::DetectionWorker;
#[cfg(feature = "ort")]
pub use ort_detector::OrtAdapter;
