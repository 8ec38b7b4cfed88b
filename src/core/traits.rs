//! Traits at the boundary between the runtime core and the inference engine.
//!
//! The engine is an opaque capability: it lists the backends it supports,
//! builds sessions bound to one backend, and executes named tensors. The
//! core never looks inside a model file or chooses backends on its own.

use crate::core::errors::ClassifyResult;
use crate::core::tensor::Tensor;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Target execution unit for inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// General-purpose processor.
    Cpu,
    /// Graphics processor.
    Gpu,
    /// Dedicated signal processor.
    Dsp,
}

impl Backend {
    /// All backends the core knows about, in menu order.
    pub const ALL: [Backend; 3] = [Backend::Cpu, Backend::Gpu, Backend::Dsp];

    /// Returns the human-readable name used in backend menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::Cpu => "CPU",
            Backend::Gpu => "GPU",
            Backend::Dsp => "DSP",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A loaded, ready-to-run instance of a network bound to one backend.
///
/// `release` must be idempotent: the runtime guarantees it calls it at
/// least once for every adopted or discarded session, and implementations
/// must tolerate repeated calls without double-freeing engine resources.
pub trait EngineSession: Send + Sync {
    /// Returns the shape of every input tensor, keyed by layer name.
    fn input_shapes(&self) -> HashMap<String, Vec<usize>>;

    /// Returns the names of the network's output layers.
    fn output_layer_names(&self) -> Vec<String>;

    /// Returns the model version string reported by the engine.
    fn model_version(&self) -> String;

    /// Executes the network over the given named input tensors.
    ///
    /// # Errors
    ///
    /// Returns an inference error if the engine fails; the runtime converts
    /// this into a "classification failed" outcome, never a panic.
    fn execute(&self, inputs: HashMap<String, Tensor>) -> ClassifyResult<HashMap<String, Tensor>>;

    /// Releases the underlying engine resources.
    fn release(&self);
}

/// An opaque inference engine capable of building sessions.
pub trait InferenceEngine: Send + Sync {
    /// Returns the backends this engine can actually run on.
    fn supported_backends(&self) -> Vec<Backend>;

    /// Builds a session for the given model file on the given backend.
    ///
    /// # Errors
    ///
    /// Returns a model load error if the engine refuses to build a session
    /// (bad file, unsupported backend, I/O failure).
    fn build(
        &self,
        model_file: &Path,
        backend: Backend,
        debug: bool,
    ) -> ClassifyResult<Arc<dyn EngineSession>>;
}

/// Builds the ordered backend menu for an engine.
///
/// Entries are `(backend, display name)` pairs filtered down to the
/// backends the engine reports as supported. A UI selection maps back by
/// backend identifier, never by menu position.
pub fn backend_menu(engine: &dyn InferenceEngine) -> Vec<(Backend, &'static str)> {
    let supported = engine.supported_backends();
    Backend::ALL
        .iter()
        .filter(|backend| supported.contains(backend))
        .map(|backend| (*backend, backend.display_name()))
        .collect()
}
