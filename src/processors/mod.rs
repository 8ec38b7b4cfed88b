//! Pre- and post-processing for the classification pipeline.
//!
//! # Modules
//!
//! * `encode` - Bitmap to input tensor encoding with mean subtraction
//! * `mean` - Mean image loading from raw float files
//! * `topk` - Top-k reduction over output tensors

mod encode;
mod mean;
mod topk;

pub use encode::encode_image;
pub use mean::load_mean_image;
pub use topk::top_k;
