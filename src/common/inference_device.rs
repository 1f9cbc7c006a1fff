use serde::{Deserialize, Serialize};

/// Execution backend requested for the inference adapter.
///
/// Anything other than `CPU` is a preference: an adapter that cannot reach the accelerator
/// falls back to the CPU instead of failing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "device_id", rename_all = "lowercase")]
pub enum InferenceDevice {
    #[default] CPU,
    CUDA(usize),
    TensorRT(usize),
    CoreML(usize),
}

impl InferenceDevice {
    fn name(&self) -> &'static str {
        match self {
            InferenceDevice::CPU => "CPU",
            InferenceDevice::CUDA(_) => "CUDA",
            InferenceDevice::TensorRT(_) => "TensorRT",
            InferenceDevice::CoreML(_) => "CoreML",
        }
    }
}

impl std::fmt::Display for InferenceDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceDevice::CPU => write!(f, "{}", self.name()),
            InferenceDevice::CUDA(id)
            | InferenceDevice::TensorRT(id)
            | InferenceDevice::CoreML(id) => write!(f, "{}:{}", self.name(), id),
        }
    }
}
