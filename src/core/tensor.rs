//! Named, shaped float tensors exchanged with the inference engine.
//!
//! A [`Tensor`] owns a flat buffer of 32-bit floats with a declared shape
//! in row-major, channel-last layout. The element count always matches the
//! product of the shape; this is enforced at construction, before any
//! numeric processing touches the buffer.

use crate::core::errors::{ClassifyError, ClassifyResult};
use ndarray::{ArrayD, ArrayViewD, IxDyn};

/// Upper bound on tensor elements, guarding shape products against
/// pathological manifests.
const MAX_TENSOR_ELEMENTS: usize = 1_000_000_000;

/// Computes the element count for a shape with overflow checking.
///
/// # Arguments
///
/// * `shape` - The declared tensor shape.
///
/// # Returns
///
/// * `Ok(usize)` - The total element count.
/// * `Err(ClassifyError)` - If the product overflows or exceeds the
///   maximum allowed tensor size.
pub fn element_count_for(shape: &[usize]) -> ClassifyResult<usize> {
    let count = shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| {
            ClassifyError::invalid_input(format!(
                "tensor shape {shape:?} would cause integer overflow"
            ))
        })?;

    if count > MAX_TENSOR_ELEMENTS {
        return Err(ClassifyError::invalid_input(format!(
            "tensor size {count} exceeds maximum allowed size {MAX_TENSOR_ELEMENTS}"
        )));
    }

    Ok(count)
}

/// A named, shaped buffer of 32-bit floats.
///
/// Owned exclusively by the caller that creates it for the duration of one
/// inference call; dropping it reclaims the buffer.
#[derive(Debug, Clone)]
pub struct Tensor {
    name: String,
    data: ArrayD<f32>,
}

impl Tensor {
    /// Creates a zero-filled tensor with the given name and shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape product overflows or exceeds the
    /// maximum tensor size.
    pub fn zeros(name: impl Into<String>, shape: &[usize]) -> ClassifyResult<Self> {
        element_count_for(shape)?;
        Ok(Self {
            name: name.into(),
            data: ArrayD::zeros(IxDyn(shape)),
        })
    }

    /// Creates a tensor from a flat buffer and a declared shape.
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len()` does not equal the shape product.
    pub fn from_vec(
        name: impl Into<String>,
        shape: &[usize],
        data: Vec<f32>,
    ) -> ClassifyResult<Self> {
        let expected = element_count_for(shape)?;
        if data.len() != expected {
            return Err(ClassifyError::invalid_input(format!(
                "tensor data has {} elements but shape {:?} declares {}",
                data.len(),
                shape,
                expected
            )));
        }
        let data = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Ok(Self {
            name: name.into(),
            data,
        })
    }

    /// Returns the tensor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared shape.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Returns the total number of elements.
    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    /// Returns a read-only multi-dimensional view over the buffer.
    pub fn view(&self) -> ArrayViewD<'_, f32> {
        self.data.view()
    }

    /// Copies the tensor contents into a plain scalar buffer, row-major.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}
