//! Domain types for the classification runtime.

pub mod model;

pub use model::{read_labels, Model, ModelManifest};
