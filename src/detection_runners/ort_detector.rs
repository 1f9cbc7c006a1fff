//! ONNX Runtime backed [`InferenceAdapter`].

use std::path::Path;
use anyhow::{bail, Context, Result};
use ndarray::{Array3, ArrayView4, Ix3};
use ort::{
    inputs, CPUExecutionProvider, CUDAExecutionProvider, CoreMLExecutionProvider,
    ExecutionProvider, GraphOptimizationLevel, Session, SessionBuilder, TensorRTExecutionProvider,
    ValueType,
};
use regex::Regex;
use crate::common::{DetectorConfig, InferenceDevice};
use crate::data::{FsAccess, CROSS_MARK};
use crate::detection_runners::inference_process::InferenceAdapter;

/// Metadata key holding the class names exported with the model.
const NAMES_KEY: &str = "names";

#[derive(Debug)]
pub struct OrtAdapter {
    session: Session,
    device: InferenceDevice,
    input_name: String,
    output_name: String,
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
}

impl OrtAdapter {
    /// Loads the model named by `config.model_path` (`.onnx` appended when missing) on the
    /// configured device. A GPU device that cannot be initialized falls back to CPU.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        if let Some(ort_lib_path) = &config.ort_lib_path {
            ort::init_from(ort_lib_path)
                .commit()
                .with_context(|| format!("{CROSS_MARK} Failed to load ONNX Runtime from {ort_lib_path}"))?;
        }

        let model_path = FsAccess::resolve(&config.model_path, Some("onnx"))?;

        let mut builder = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.num_threads.max(1))?;

        let mut device = config.device;
        let registered = match device {
            InferenceDevice::CPU => Ok(()),
            InferenceDevice::CUDA(device_id) => Self::build_cuda(&mut builder, device_id),
            InferenceDevice::TensorRT(device_id) => Self::build_trt(&mut builder, device_id),
            InferenceDevice::CoreML(_) => Self::build_coreml(&mut builder),
        };
        if let Err(err) = registered {
            log::warn!("{err}, Using cpu");
            device = InferenceDevice::CPU;
        }
        if device == InferenceDevice::CPU {
            Self::build_cpu(&mut builder)?;
        }

        let session = builder
            .commit_from_file(&model_path)
            .with_context(|| format!("{CROSS_MARK} Failed to load model {}", model_path.display()))?;

        let input = session
            .inputs
            .first()
            .context("Model has no inputs")?;
        let output = session
            .outputs
            .first()
            .context("Model has no outputs")?;

        let adapter = Self {
            input_name: input.name.clone(),
            output_name: output.name.clone(),
            input_shape: Self::dims(&input.input_type)?,
            output_shape: Self::dims(&output.output_type)?,
            device,
            session,
        };

        log::info!(
            "Loaded {} on {} | Input '{}' {:?} | Output '{}' {:?}",
            Self::file_name(&model_path),
            adapter.device,
            adapter.input_name,
            adapter.input_shape,
            adapter.output_name,
            adapter.output_shape
        );

        Ok(adapter)
    }

    /// Custom metadata entry, if the model carries one.
    pub fn try_fetch(&self, key: &str) -> Option<String> {
        match self.session.metadata() {
            Err(_) => None,
            Ok(metadata) => metadata.custom(key).unwrap_or_default(),
        }
    }

    /// Class names embedded at export time, in class order.
    pub fn embedded_names(&self) -> Option<Vec<String>> {
        self.try_fetch(NAMES_KEY).and_then(|names| parse_names(&names))
    }

    /// Static dimensions of a tensor. A dynamic batch is read as 1; any other dynamic
    /// dimension is read as 0 so the detector rejects it.
    fn dims(value_type: &ValueType) -> Result<Vec<usize>> {
        let Some(dims) = value_type.tensor_dimensions() else {
            bail!("{CROSS_MARK} Model input/output is not a tensor: {:?}", value_type);
        };
        Ok(dims
            .iter()
            .enumerate()
            .map(|(i, &d)| match (i, d) {
                (0, d) if d < 0 => 1,
                (_, d) if d < 0 => 0,
                (_, d) => d as usize,
            })
            .collect())
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|x| x.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    fn build_trt(builder: &mut SessionBuilder, device_id: usize) -> Result<()> {
        let ep = TensorRTExecutionProvider::default().with_device_id(device_id as i32);
        if ep.is_available()? {
            match ep.register(builder) {
                Ok(_) => {}
                Err(err) => bail!("{CROSS_MARK} TensorRT initialization failed: {:?}", err),
            }
            Ok(())
        } else {
            bail!("{CROSS_MARK} TensorRT execution provider not available")
        }
    }

    fn build_cuda(builder: &mut SessionBuilder, device_id: usize) -> Result<()> {
        let ep = CUDAExecutionProvider::default().with_device_id(device_id as i32);
        if ep.is_available()? {
            match ep.register(builder) {
                Ok(_) => {}
                Err(err) => bail!("{CROSS_MARK} CUDA initialization failed: {:?}", err),
            }
            Ok(())
        } else {
            bail!("{CROSS_MARK} CUDA execution provider not available")
        }
    }

    fn build_coreml(builder: &mut SessionBuilder) -> Result<()> {
        let ep = CoreMLExecutionProvider::default(); // subgraphs are disabled by default
        if ep.is_available()? {
            match ep.register(builder) {
                Ok(_) => {}
                Err(err) => bail!("{CROSS_MARK} CoreML initialization failed: {:?}", err),
            }
            Ok(())
        } else {
            bail!("{CROSS_MARK} CoreML execution provider not available")
        }
    }

    fn build_cpu(builder: &mut SessionBuilder) -> Result<()> {
        let ep = CPUExecutionProvider::default();
        if ep.is_available()? {
            match ep.register(builder) {
                Ok(_) => {}
                Err(err) => bail!("{CROSS_MARK} CPU initialization failed: {:?}", err),
            }
            Ok(())
        } else {
            bail!("{CROSS_MARK} CPU execution provider not available")
        }
    }
}

impl InferenceAdapter for OrtAdapter {
    fn input_shape(&self) -> Vec<usize> {
        self.input_shape.clone()
    }

    fn output_shape(&self) -> Vec<usize> {
        self.output_shape.clone()
    }

    fn run(&mut self, input: ArrayView4<f32>, output: &mut Array3<f32>) -> Result<()> {
        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => input]?)?;
        let y = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;
        let y = y.into_dimensionality::<Ix3>()?;
        if y.shape() != output.shape() {
            bail!(
                "Model produced output shape {:?}, expected {:?}",
                y.shape(),
                output.shape()
            );
        }
        output.assign(&y);
        Ok(())
    }

    fn backend(&self) -> String {
        format!("onnxruntime ({})", self.device)
    }
}

/// Parses names metadata such as `{0: 'plastic', 1: 'glass', 2: "paper's box"}`.
fn parse_names(names: &str) -> Option<Vec<String>> {
    let re = Regex::new(r#"(['"])([-()\w '"]+)(['"])"#).ok()?;
    let names: Vec<String> = re
        .captures_iter(names)
        .map(|x| x.extract::<3>().1[1].to_string())
        .collect();
    (!names.is_empty()).then_some(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_from_metadata() {
        let names = parse_names("{0: 'plastic', 1: 'glass bottle', 2: 'can'}").unwrap();
        assert_eq!(names, vec!["plastic", "glass bottle", "can"]);
        assert!(parse_names("{}").is_none());
    }
}
