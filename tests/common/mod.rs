//! Shared test doubles: a mock inference engine and a recording view.

use percept::core::{Backend, ClassifyError, ClassifyResult, EngineSession, InferenceEngine, Tensor};
use percept::domain::Model;
use percept::pipeline::{ModelInfo, ModelView, ViewError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A session handed out by [`MockEngine`].
pub struct MockSession {
    backend: Backend,
    input_shape: Vec<usize>,
    scores: Vec<f32>,
    released: AtomicBool,
    executions: AtomicUsize,
}

impl MockSession {
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

impl EngineSession for MockSession {
    fn input_shapes(&self) -> HashMap<String, Vec<usize>> {
        let mut shapes = HashMap::new();
        shapes.insert("data".to_string(), self.input_shape.clone());
        shapes
    }

    fn output_layer_names(&self) -> Vec<String> {
        vec!["prob".to_string()]
    }

    fn model_version(&self) -> String {
        format!("mock-1.0-{}", self.backend)
    }

    fn execute(
        &self,
        inputs: HashMap<String, Tensor>,
    ) -> ClassifyResult<HashMap<String, Tensor>> {
        if !inputs.contains_key("data") {
            return Err(ClassifyError::inference_message("missing 'data' input"));
        }
        self.executions.fetch_add(1, Ordering::SeqCst);
        let mut outputs = HashMap::new();
        outputs.insert(
            "prob".to_string(),
            Tensor::from_vec("prob", &[self.scores.len()], self.scores.clone())?,
        );
        Ok(outputs)
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// A scriptable engine that records every session it builds.
pub struct MockEngine {
    input_shape: Vec<usize>,
    scores: Vec<f32>,
    build_delay: Duration,
    pub sessions: Mutex<Vec<Arc<MockSession>>>,
}

impl MockEngine {
    pub fn new(input_shape: Vec<usize>, scores: Vec<f32>) -> Self {
        Self {
            input_shape,
            scores,
            build_delay: Duration::ZERO,
            sessions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_build_delay(mut self, delay: Duration) -> Self {
        self.build_delay = delay;
        self
    }

    pub fn built_sessions(&self) -> Vec<Arc<MockSession>> {
        self.sessions.lock().unwrap().clone()
    }
}

impl InferenceEngine for MockEngine {
    fn supported_backends(&self) -> Vec<Backend> {
        vec![Backend::Cpu, Backend::Gpu, Backend::Dsp]
    }

    fn build(
        &self,
        _model_file: &Path,
        backend: Backend,
        _debug: bool,
    ) -> ClassifyResult<Arc<dyn EngineSession>> {
        if !self.build_delay.is_zero() {
            std::thread::sleep(self.build_delay);
        }
        let session = Arc::new(MockSession {
            backend,
            input_shape: self.input_shape.clone(),
            scores: self.scores.clone(),
            released: AtomicBool::new(false),
            executions: AtomicUsize::new(0),
        });
        self.sessions.lock().unwrap().push(Arc::clone(&session));
        Ok(session)
    }
}

/// Everything a view was asked to show, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    AddImage,
    Loading(bool),
    ModelInfo { name: String, version: String },
    Classification { label: String, score: f32 },
    Error(ViewError),
}

/// A view that records every delivery.
#[derive(Debug, Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count<F: Fn(&ViewCall) -> bool>(&self, pred: F) -> usize {
        self.calls().iter().filter(|call| pred(call)).count()
    }
}

impl ModelView for RecordingView {
    fn add_decoded_image(&self, _bitmap: Arc<image::RgbImage>) {
        self.calls.lock().unwrap().push(ViewCall::AddImage);
    }

    fn show_loading(&self, visible: bool) {
        self.calls.lock().unwrap().push(ViewCall::Loading(visible));
    }

    fn show_model_info(&self, info: &ModelInfo) {
        self.calls.lock().unwrap().push(ViewCall::ModelInfo {
            name: info.name.clone(),
            version: info.version.clone(),
        });
    }

    fn show_classification(&self, label: &str, score: f32) {
        self.calls.lock().unwrap().push(ViewCall::Classification {
            label: label.to_string(),
            score,
        });
    }

    fn show_error(&self, kind: ViewError) {
        self.calls.lock().unwrap().push(ViewCall::Error(kind));
    }
}

/// A minimal model descriptor for controller tests.
pub fn test_model(labels: &[&str]) -> Model {
    Model {
        name: "mocknet".to_string(),
        version: None,
        file: PathBuf::from("mocknet.bin"),
        sample_images: Vec::new(),
        mean_image: None,
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}
