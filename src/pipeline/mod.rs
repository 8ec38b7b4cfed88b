//! Asynchronous orchestration of decode, load, and classify units.
//!
//! # Modules
//!
//! * `cache` - Weakly-held cache of decoded bitmaps
//! * `controller` - Session lifecycle and event delivery
//! * `queue` - Single-worker FIFO queues
//! * `view` - The UI collaborator boundary

pub mod cache;
pub mod controller;
mod events;
pub mod queue;
pub mod view;

pub use cache::BitmapCache;
pub use controller::{ModelController, SessionState, INPUT_TENSOR, OUTPUT_LAYER};
pub use queue::SerialQueue;
pub use view::{ModelInfo, ModelView, ViewError};
