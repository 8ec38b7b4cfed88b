//! Bitmap to input tensor encoding.
//!
//! Converts a decoded RGB bitmap into the flattened float layout the
//! inference engine expects: row-major, channel-last, blue-green-red
//! channel order (matching the source decode order, not RGB), with
//! per-element mean subtraction. A target shape whose last dimension is
//! `1` selects the single-channel grayscale path instead.

use crate::core::errors::{ClassifyError, ClassifyResult};
use crate::core::tensor::{element_count_for, Tensor};
use image::RgbImage;

/// Standard luma weights applied to raw 0-255 channel values.
const LUMA_R: f32 = 0.30;
const LUMA_G: f32 = 0.59;
const LUMA_B: f32 = 0.11;

/// Encodes a bitmap into an input tensor with mean subtraction.
///
/// The color path subtracts sequential mean-buffer scalars from B, G, R in
/// that order and writes exactly those three floats per pixel. The
/// grayscale path computes luma over the raw channel values first and
/// subtracts the per-pixel mean scalar afterwards; the two paths are
/// deliberately left asymmetric to match the tensors the deployed models
/// were trained against.
///
/// # Arguments
///
/// * `image` - The decoded bitmap; its dimensions must agree with the
///   target shape.
/// * `mean` - Mean image buffer; its length must equal the tensor element
///   count exactly.
/// * `name` - Name of the produced input tensor.
/// * `target_shape` - Engine-declared input shape, channel-last.
///
/// # Errors
///
/// * A mean buffer whose length differs from the tensor element count is
///   a hard input-validation gate; the caller must not attempt inference.
/// * Image dimensions inconsistent with the target shape are rejected
///   before any pixel is processed.
pub fn encode_image(
    image: &RgbImage,
    mean: &[f32],
    name: &str,
    target_shape: &[usize],
) -> ClassifyResult<Tensor> {
    let channels = *target_shape
        .last()
        .ok_or_else(|| ClassifyError::invalid_input("target shape is empty"))?;
    let element_count = element_count_for(target_shape)?;

    if mean.len() != element_count {
        return Err(ClassifyError::encode(format!(
            "mean buffer has {} elements but input tensor expects {}",
            mean.len(),
            element_count
        )));
    }

    let (width, height) = image.dimensions();
    let pixel_count = width as usize * height as usize;
    let grayscale = channels == 1;
    let floats_per_pixel = if grayscale { 1 } else { 3 };

    if pixel_count * floats_per_pixel != element_count {
        return Err(ClassifyError::invalid_input(format!(
            "{}x{} image yields {} floats but shape {:?} declares {}",
            width,
            height,
            pixel_count * floats_per_pixel,
            target_shape,
            element_count
        )));
    }

    let mut data = Vec::with_capacity(element_count);
    let mut cursor = 0usize;

    for y in 0..height {
        for x in 0..width {
            let image::Rgb([r, g, b]) = *image.get_pixel(x, y);
            if grayscale {
                let luma = r as f32 * LUMA_R + g as f32 * LUMA_G + b as f32 * LUMA_B;
                data.push(luma - mean[cursor]);
                cursor += 1;
            } else {
                data.push(b as f32 - mean[cursor]);
                data.push(g as f32 - mean[cursor + 1]);
                data.push(r as f32 - mean[cursor + 2]);
                cursor += 3;
            }
        }
    }

    Tensor::from_vec(name, target_shape, data)
}
