//! Core types for the classification runtime.
//!
//! This module provides the error handling system, the tensor type
//! exchanged with the engine, and the traits that describe the opaque
//! inference engine boundary.

pub mod errors;
pub mod tensor;
pub mod traits;

pub use errors::{ClassifyError, ClassifyResult, ProcessingStage};
pub use tensor::{element_count_for, Tensor};
pub use traits::{backend_menu, Backend, EngineSession, InferenceEngine};
