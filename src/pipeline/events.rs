//! Events delivered from background units back to the controller.
//!
//! Every unit of work reports exactly one event through the controller's
//! channel. The controller applies events on the caller's thread while
//! draining, which is the only place the session reference is mutated.

use crate::core::errors::ClassifyError;
use crate::core::traits::EngineSession;
use image::RgbImage;
use std::path::PathBuf;
use std::sync::Arc;

/// One completed unit of background work.
pub(crate) enum ControllerEvent {
    /// A sample image finished decoding.
    ImageDecoded {
        path: PathBuf,
        bitmap: Arc<RgbImage>,
    },
    /// A sample image failed to decode.
    ImageDecodeFailed {
        path: PathBuf,
        error: ClassifyError,
    },
    /// A network load settled successfully.
    NetworkLoaded {
        generation: u64,
        session: Arc<dyn EngineSession>,
    },
    /// A network load settled with a failure.
    NetworkLoadFailed {
        generation: u64,
        error: ClassifyError,
    },
    /// A classification produced a top-1 result.
    Classified { label: String, score: f32 },
    /// A classification failed (precondition or engine error).
    ClassificationFailed { error: ClassifyError },
}
