//! Background thread owning one detector, fed through the channel pair in
//! [`crate::data::send_channels`].

use std::thread::JoinHandle;
use anyhow::{anyhow, bail, Result};
use crossbeam_channel::TrySendError;
use crate::common::DetImage;
use crate::data::send_channels::{channel_pair, DetectionRequest, DetectionState, SendState};
use crate::data::{DetectionResult, Orientation};
use crate::detection_runners::detector::Detector;
use crate::detection_runners::inference_process::InferenceAdapter;

const THREAD_NAME: &str = "waste-detect-worker";

/// Results come back in submission order, one per submitted frame.
#[derive(Debug)]
pub struct DetectionWorker {
    send: Option<SendState>,
    handle: Option<JoinHandle<()>>,
}

impl DetectionWorker {
    /// Moves `detector` onto a new thread. At most `capacity` frames wait in the queue and
    /// at most `capacity` results wait in the reply channel.
    pub fn spawn<A>(detector: Detector<A>, capacity: usize) -> Result<Self>
    where
        A: InferenceAdapter + Send + 'static,
    {
        let (send, state) = channel_pair(capacity);
        let handle = std::thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run_loop(detector, state))?;

        log::info!("Detection worker started");
        Ok(Self {
            send: Some(send),
            handle: Some(handle),
        })
    }

    /// Queues a frame, blocking while the queue is full.
    ///
    /// Every submitted frame produces one result that must be taken with [`Self::recv`].
    /// Once `capacity` results are left unread the worker stops taking frames, so a caller
    /// that keeps submitting without receiving will block here.
    pub fn submit(&self, image: DetImage, orientation: Orientation) -> Result<()> {
        let send = self.send_state()?;
        send.opt_tx
            .send(Box::new(DetectionRequest { image, orientation }))
            .map_err(|_| anyhow!("Detection worker has stopped"))
    }

    /// Queues a frame without blocking. Fails when the queue is full.
    pub fn try_submit(&self, image: DetImage, orientation: Orientation) -> Result<()> {
        let send = self.send_state()?;
        match send.opt_tx.try_send(Box::new(DetectionRequest { image, orientation })) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => bail!("Detection queue is full"),
            Err(TrySendError::Disconnected(_)) => bail!("Detection worker has stopped"),
        }
    }

    /// Waits for the next result.
    pub fn recv(&self) -> Result<DetectionResult> {
        let send = self.send_state()?;
        send.det_rx
            .recv()
            .map_err(|_| anyhow!("Detection worker has stopped"))?
    }

    pub fn detect(&self, image: DetImage, orientation: Orientation) -> Result<DetectionResult> {
        self.submit(image, orientation)?;
        self.recv()
    }

    /// Closes the queue and joins the thread. Results not yet received are discarded.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn send_state(&self) -> Result<&SendState> {
        self.send
            .as_ref()
            .ok_or_else(|| anyhow!("Detection worker has been shut down"))
    }

    fn stop(&mut self) -> Result<()> {
        self.send = None;
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow!("Detection worker panicked")),
            None => Ok(()),
        }
    }
}

impl Drop for DetectionWorker {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::error!("{err}");
        }
    }
}

fn run_loop<A: InferenceAdapter>(mut detector: Detector<A>, state: DetectionState) {
    for request in state.opt_rx.iter() {
        let result = detector.detect_with_orientation(&request.image, request.orientation);
        if let Err(err) = &result {
            log::error!("Detection failed: {err:#}");
        }
        if state.det_tx.send(result).is_err() {
            break;
        }
    }

    let timings = detector.timings();
    log::info!(
        "Detection worker stopped after {} frames, average {:?} per frame",
        timings.n(),
        timings.avg()
    );
}
