//! # percept
//!
//! Runtime core for on-device image classification over an opaque
//! inference engine. The crate converts decoded bitmaps into the exact
//! tensor layout a network expects, reduces output tensors to top-k
//! labels, and orchestrates the asynchronous loading, caching, and
//! session lifecycle around those calls.
//!
//! ## Components
//!
//! - **Tensor codec**: bitmap to flattened float tensor, blue-green-red
//!   channel order, per-element mean subtraction, optional grayscale
//!   reduction ([`processors::encode_image`])
//! - **Top-k reduction**: highest-scoring class indices with
//!   deterministic tie-break ([`processors::top_k`])
//! - **Session management**: at-most-one in-flight load, supersede on
//!   backend switch, deterministic release
//!   ([`pipeline::ModelController`])
//! - **Task orchestration**: parallel image decoding, serialized load
//!   and classify queues, attachment-aware result delivery
//!
//! The engine itself — model format, backend kernels — stays behind the
//! [`core::InferenceEngine`] and [`core::EngineSession`] traits.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use percept::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn engine() -> Arc<dyn percept::core::InferenceEngine> { unimplemented!() }
//! # fn view() -> Arc<dyn ModelView> { unimplemented!() }
//! # fn main() -> Result<(), ClassifyError> {
//! let model = Model::from_manifest(Path::new("assets/alexnet/model.json"))?;
//! let mut controller = ModelController::new(model, engine());
//!
//! controller.attach(view());
//! while controller.pump(Duration::from_millis(100)) {}
//!
//! // A UI selection maps back by backend identifier.
//! controller.select_backend(Backend::Gpu);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        backend_menu, Backend, ClassifyError, ClassifyResult, EngineSession, InferenceEngine,
        Tensor,
    };
    pub use crate::domain::Model;
    pub use crate::pipeline::{
        ModelController, ModelInfo, ModelView, SessionState, ViewError,
    };
    pub use crate::processors::{encode_image, load_mean_image, top_k};
}
