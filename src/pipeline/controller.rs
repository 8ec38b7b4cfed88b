//! Controller tying the session lifecycle, task queues, and view together.
//!
//! The controller owns the only mutable reference to the engine session.
//! Background units never touch it: they report completion through a
//! single event channel, and the owner applies those events by draining
//! the channel on its own thread ([`ModelController::poll`] /
//! [`ModelController::pump`]). Attachment, load generations, and session
//! adoption are all decided at delivery time, so results that arrive for
//! a detached view or a superseded load are discarded, and any session
//! they carry is released instead of leaked.

use crate::core::errors::{ClassifyError, ClassifyResult};
use crate::core::tensor::element_count_for;
use crate::core::traits::{Backend, EngineSession, InferenceEngine};
use crate::domain::model::Model;
use crate::pipeline::cache::BitmapCache;
use crate::pipeline::events::ControllerEvent;
use crate::pipeline::queue::SerialQueue;
use crate::pipeline::view::{ModelInfo, ModelView, ViewError};
use crate::processors::{encode_image, load_mean_image, top_k};
use image::RgbImage;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Name of the input tensor fed to the network.
pub const INPUT_TENSOR: &str = "data";

/// Name of the output layer reduced to a top-1 label.
pub const OUTPUT_LAYER: &str = "prob";

/// Lifecycle state of the managed inference session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session and no pending load.
    Empty,
    /// A load is pending; its result has not settled yet.
    Loading,
    /// A session is adopted and ready to classify.
    Ready,
}

/// Controller for one model over one inference engine.
pub struct ModelController {
    model: Arc<Model>,
    engine: Arc<dyn InferenceEngine>,
    cache: Arc<BitmapCache>,
    view: Option<Arc<dyn ModelView>>,
    session: Option<Arc<dyn EngineSession>>,
    /// Generation of the most recently requested load.
    current_generation: u64,
    /// Generation of the most recently settled load.
    settled_generation: u64,
    /// Shared with load units for advisory pre-start cancellation.
    latest_generation: Arc<AtomicU64>,
    load_queue: SerialQueue,
    classify_queue: SerialQueue,
    events_tx: Sender<ControllerEvent>,
    events_rx: Receiver<ControllerEvent>,
}

impl ModelController {
    /// Creates a controller for a model descriptor and engine.
    pub fn new(model: Model, engine: Arc<dyn InferenceEngine>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            model: Arc::new(model),
            engine,
            cache: Arc::new(BitmapCache::new()),
            view: None,
            session: None,
            current_generation: 0,
            settled_generation: 0,
            latest_generation: Arc::new(AtomicU64::new(0)),
            load_queue: SerialQueue::new("network-load"),
            classify_queue: SerialQueue::new("classify"),
            events_tx,
            events_rx,
        }
    }

    /// Attaches the UI collaborator.
    ///
    /// Shows the loading indicator, schedules decoding of every sample
    /// image (cache hits are delivered synchronously), and starts a CPU
    /// load of the network.
    pub fn attach(&mut self, view: Arc<dyn ModelView>) {
        view.show_loading(true);
        self.view = Some(view);
        self.load_image_samples();
        self.load_network(Backend::Cpu);
    }

    /// Detaches the UI collaborator and releases the current session.
    ///
    /// Results still in flight are dropped at delivery time; any session
    /// they carry is released instead of adopted.
    pub fn detach(&mut self) {
        self.view = None;
        self.release();
    }

    /// Returns whether a collaborator is currently attached.
    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    /// Returns the session lifecycle state.
    pub fn state(&self) -> SessionState {
        if self.session.is_some() {
            SessionState::Ready
        } else if self.is_load_pending() {
            SessionState::Loading
        } else {
            SessionState::Empty
        }
    }

    /// Returns whether the most recent load request has not settled yet.
    pub fn is_load_pending(&self) -> bool {
        self.current_generation != self.settled_generation
    }

    /// Releases the current session, if any. Safe to call when `Empty`.
    pub fn release(&mut self) {
        if let Some(session) = self.session.take() {
            session.release();
        }
    }

    /// Returns the model descriptor.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Looks up a decoded sample bitmap in the cache.
    pub fn cached_bitmap(&self, path: &Path) -> Option<Arc<RgbImage>> {
        self.cache.get(path)
    }

    /// Switches to a backend selected from the backend menu.
    ///
    /// No-op when detached; otherwise shows the loading indicator and
    /// starts a fresh load that supersedes whatever came before it.
    pub fn select_backend(&mut self, backend: Backend) {
        let Some(view) = self.view.clone() else {
            return;
        };
        view.show_loading(true);
        self.load_network(backend);
    }

    /// Begins an asynchronous load of the network on `backend`.
    ///
    /// A `Ready` session is released synchronously first; a pending load
    /// is superseded (its eventual result will be discarded and, if it
    /// carries a session, released). Cancellation is advisory: the
    /// in-flight unit may still run to completion.
    pub fn load_network(&mut self, backend: Backend) {
        self.release();
        if self.is_load_pending() {
            debug!(generation = self.current_generation, "superseding pending network load");
        }

        self.current_generation += 1;
        let generation = self.current_generation;
        self.latest_generation.store(generation, Ordering::SeqCst);

        let engine = Arc::clone(&self.engine);
        let model_file = self.model.file.clone();
        let latest = Arc::clone(&self.latest_generation);
        let events = self.events_tx.clone();

        debug!(%backend, generation, "submitting network load");
        self.load_queue.submit(move || {
            // Advisory cancellation: a load superseded before it starts
            // never touches the engine.
            if latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "network load superseded before start");
                return;
            }
            match engine.build(&model_file, backend, false) {
                Ok(session) => {
                    let _ = events.send(ControllerEvent::NetworkLoaded {
                        generation,
                        session,
                    });
                }
                Err(err) => {
                    error!(error = %err, %backend, "network build failed");
                    let _ = events.send(ControllerEvent::NetworkLoadFailed {
                        generation,
                        error: err,
                    });
                }
            }
        });
    }

    /// Submits a classification of `bitmap` against the current session.
    ///
    /// Requires a `Ready` session: when `Empty` or still `Loading`, the
    /// collaborator gets a single "not loaded" signal and no background
    /// unit is submitted. Classifications are serialized; later requests
    /// queue behind earlier ones in FIFO order.
    pub fn classify(&mut self, bitmap: Arc<RgbImage>) {
        let Some(session) = self.session.clone() else {
            if let Some(view) = &self.view {
                view.show_error(ViewError::ModelNotLoaded);
            }
            return;
        };

        let model = Arc::clone(&self.model);
        let events = self.events_tx.clone();
        self.classify_queue.submit(move || {
            match run_classification(session.as_ref(), model.as_ref(), bitmap.as_ref()) {
                Ok((label, score)) => {
                    let _ = events.send(ControllerEvent::Classified { label, score });
                }
                Err(error) => {
                    let _ = events.send(ControllerEvent::ClassificationFailed { error });
                }
            }
        });
    }

    /// Applies every event already delivered, without blocking.
    ///
    /// Returns the number of events processed.
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.process_event(event);
            processed += 1;
        }
        processed
    }

    /// Waits up to `timeout` for the next event, then drains the rest.
    ///
    /// Returns `false` when the timeout elapsed with nothing delivered.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        match self.events_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.process_event(event);
                self.poll();
                true
            }
            Err(_) => false,
        }
    }

    fn load_image_samples(&self) {
        for path in &self.model.sample_images {
            if let Some(bitmap) = self.cache.get(path) {
                if let Some(view) = &self.view {
                    view.add_decoded_image(bitmap);
                }
                continue;
            }
            let path = path.clone();
            let events = self.events_tx.clone();
            rayon::spawn(move || match crate::utils::load_image(&path) {
                Ok(img) => {
                    let _ = events.send(ControllerEvent::ImageDecoded {
                        path,
                        bitmap: Arc::new(img),
                    });
                }
                Err(error) => {
                    let _ = events.send(ControllerEvent::ImageDecodeFailed { path, error });
                }
            });
        }
    }

    fn process_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::ImageDecoded { path, bitmap } => {
                // Cache even when detached; the decode cost is not wasted.
                self.cache.insert(&path, &bitmap);
                if let Some(view) = &self.view {
                    view.add_decoded_image(bitmap);
                }
            }
            ControllerEvent::ImageDecodeFailed { path, error } => {
                warn!(path = %path.display(), %error, "sample image decode failed");
            }
            ControllerEvent::NetworkLoaded {
                generation,
                session,
            } => {
                if generation != self.current_generation {
                    debug!(generation, "discarding superseded network load result");
                    session.release();
                    return;
                }
                self.settled_generation = generation;
                match &self.view {
                    Some(view) => {
                        let info = ModelInfo::from_session(&self.model.name, session.as_ref());
                        self.session = Some(session);
                        view.show_model_info(&info);
                        view.show_loading(false);
                    }
                    None => {
                        // The view detached during the load; release the
                        // fresh session instead of adopting it.
                        session.release();
                    }
                }
            }
            ControllerEvent::NetworkLoadFailed { generation, error } => {
                if generation != self.current_generation {
                    debug!(generation, "discarding superseded network load failure");
                    return;
                }
                self.settled_generation = generation;
                warn!(%error, "network load failed");
                if let Some(view) = &self.view {
                    view.show_error(ViewError::ModelLoadFailed);
                }
            }
            ControllerEvent::Classified { label, score } => {
                if let Some(view) = &self.view {
                    view.show_classification(&label, score);
                }
            }
            ControllerEvent::ClassificationFailed { error } => {
                warn!(%error, "classification failed");
                if let Some(view) = &self.view {
                    view.show_error(ViewError::ClassificationFailed);
                }
            }
        }
    }
}

impl Drop for ModelController {
    fn drop(&mut self) {
        self.release();
    }
}

/// Runs one classification unit: encode, execute, reduce to top-1.
///
/// Every failure is converted into a categorized error; nothing panics
/// across the async boundary.
fn run_classification(
    session: &dyn EngineSession,
    model: &Model,
    image: &RgbImage,
) -> ClassifyResult<(String, f32)> {
    let shapes = session.input_shapes();
    let shape = shapes.get(INPUT_TENSOR).ok_or_else(|| {
        ClassifyError::invalid_input(format!("network has no '{INPUT_TENSOR}' input tensor"))
    })?;
    let element_count = element_count_for(shape)?;

    let mean = load_mean_image(model.mean_image.as_deref(), element_count);
    let tensor = encode_image(image, &mean, INPUT_TENSOR, shape)?;

    let mut inputs = HashMap::new();
    inputs.insert(INPUT_TENSOR.to_string(), tensor);
    let outputs = session.execute(inputs)?;

    let prob = outputs.get(OUTPUT_LAYER).ok_or_else(|| {
        ClassifyError::inference_message(format!(
            "network produced no '{OUTPUT_LAYER}' output layer"
        ))
    })?;

    let top = top_k(1, prob);
    let (index, score) = top
        .first()
        .copied()
        .ok_or_else(|| ClassifyError::inference_message("empty output tensor"))?;
    Ok((model.label(index), score))
}
