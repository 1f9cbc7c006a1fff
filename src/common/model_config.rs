//! Options for building a detector.

use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::common::InferenceDevice;
use crate::data::Thresholds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub model_path: String,
    pub labels_path: String,
    pub ort_lib_path: Option<String>,
    pub device: InferenceDevice,
    pub num_threads: usize,
    pub thresholds: Thresholds,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: String::new(),
            labels_path: String::new(),
            ort_lib_path: None,
            device: InferenceDevice::CPU,
            num_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            thresholds: Thresholds::default(),
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid detector configuration")
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read detector configuration {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_model(mut self, model_path: &str) -> Self {
        self.model_path = model_path.to_string();
        self
    }

    pub fn with_labels(mut self, labels_path: &str) -> Self {
        self.labels_path = labels_path.to_string();
        self
    }

    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Self {
        self.ort_lib_path = Some(ort_lib_path.to_string());
        self
    }

    pub fn with_device(mut self, device: InferenceDevice) -> Self {
        self.device = device;
        self
    }

    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = n;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_confidence_threshold(mut self, x: f32) -> Self {
        self.thresholds.confidence = x;
        self
    }

    pub fn with_iou_threshold(mut self, x: f32) -> Self {
        self.thresholds.iou = x;
        self
    }

    pub fn with_num_items_threshold(mut self, n: usize) -> Self {
        self.thresholds.num_items = n;
        self
    }
}
