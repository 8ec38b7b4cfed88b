//! The UI collaborator boundary.
//!
//! The runtime never owns a view. A controller holds an attached
//! collaborator between `attach` and `detach` and checks attachment at
//! delivery time, so async results arriving after teardown are silently
//! dropped instead of reaching a dead surface.

use crate::core::traits::EngineSession;
use image::RgbImage;
use std::collections::HashMap;
use std::sync::Arc;

/// Categorized user-visible failure kinds.
///
/// Every failure is local and recoverable by retrying the triggering
/// action (re-tap an image, reselect a backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// Classification was requested before a network finished loading.
    ModelNotLoaded,
    /// The engine refused to build a session.
    ModelLoadFailed,
    /// Encoding or inference failed for one frame.
    ClassificationFailed,
}

/// Facts about a loaded network published to the collaborator.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Display name of the model.
    pub name: String,
    /// Version string reported by the engine session.
    pub version: String,
    /// Input tensor shapes keyed by layer name.
    pub input_shapes: HashMap<String, Vec<usize>>,
    /// Output layer names.
    pub output_layers: Vec<String>,
}

impl ModelInfo {
    /// Derives the published facts from a freshly adopted session.
    pub fn from_session(name: &str, session: &dyn EngineSession) -> Self {
        Self {
            name: name.to_string(),
            version: session.model_version(),
            input_shapes: session.input_shapes(),
            output_layers: session.output_layer_names(),
        }
    }
}

/// The UI collaborator.
///
/// Implementations receive results only while attached; none of these
/// methods is ever invoked after `detach` returns.
pub trait ModelView {
    /// Delivers a freshly decoded sample image.
    fn add_decoded_image(&self, bitmap: Arc<RgbImage>);

    /// Toggles the loading indicator.
    fn show_loading(&self, visible: bool);

    /// Publishes the facts derived from a newly adopted session.
    fn show_model_info(&self, info: &ModelInfo);

    /// Delivers a top-1 classification result.
    fn show_classification(&self, label: &str, score: f32);

    /// Reports a categorized failure.
    fn show_error(&self, kind: ViewError);
}
