use crate::common::DetImage;
use crate::data::{DetectionResult, Orientation};

/// One frame queued for the detection worker.
#[derive(Debug, Clone)]
pub struct DetectionRequest {
    pub image: DetImage,
    pub orientation: Orientation,
}

pub type DetectionResponse = anyhow::Result<DetectionResult>;

/// Worker side: receives frames, sends results.
#[derive(Debug)]
pub struct DetectionState {
    pub opt_rx: crossbeam_channel::Receiver<Box<DetectionRequest>>,
    pub det_tx: crossbeam_channel::Sender<DetectionResponse>,
}

/// Caller side: sends frames, receives results.
#[derive(Debug)]
pub struct SendState {
    pub opt_tx: crossbeam_channel::Sender<Box<DetectionRequest>>,
    pub det_rx: crossbeam_channel::Receiver<DetectionResponse>,
}

/// Creates both ends of a worker channel pair. At most `capacity` frames wait in the queue
/// and at most `capacity` results wait to be received; past that the worker blocks.
pub fn channel_pair(capacity: usize) -> (SendState, DetectionState) {
    let (opt_tx, opt_rx) = crossbeam_channel::bounded(capacity);
    let (det_tx, det_rx) = crossbeam_channel::bounded(capacity);
    (SendState { opt_tx, det_rx }, DetectionState { opt_rx, det_tx })
}
