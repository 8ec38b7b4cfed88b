//! Error types for the classification runtime.
//!
//! This module defines the error types that can occur while preparing
//! tensors, loading networks, and running inference, along with helper
//! constructors for creating errors with appropriate context.

use thiserror::Error;

/// Convenient result alias for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Enum representing different stages of processing in the classification pipeline.
///
/// This enum is used to identify which stage of the pipeline an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Error occurred while encoding a bitmap into an input tensor.
    Encode,
    /// Error occurred while loading or applying the mean image.
    MeanImage,
    /// Error occurred while reducing the output tensor.
    PostProcess,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Encode => write!(f, "tensor encoding"),
            ProcessingStage::MeanImage => write!(f, "mean image"),
            ProcessingStage::PostProcess => write!(f, "post-processing"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the classification pipeline.
///
/// Background units never let these escape uncaught; every worker converts
/// failures into a categorized outcome delivered through the controller's
/// single event path.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// Error occurred while decoding an image from disk.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during pixel or tensor processing.
    #[error("{stage} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        stage: ProcessingStage,
        /// Additional context about the error.
        context: String,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// The engine refused to build a session for the requested backend.
    #[error("model load failed: {context}")]
    ModelLoad {
        /// Additional context about the failure.
        context: String,
        /// The underlying engine error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The engine failed while executing a loaded network.
    #[error("inference failed: {context}")]
    Inference {
        /// Additional context about the failure.
        context: String,
        /// The underlying engine error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from tensor shape operations.
    #[error("tensor shape")]
    Shape(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ClassifyError {
    /// Creates a processing error for a specific pipeline stage.
    pub fn processing(stage: ProcessingStage, context: impl Into<String>) -> Self {
        Self::Processing {
            stage,
            context: context.into(),
        }
    }

    /// Creates an encoding error.
    pub fn encode(context: impl Into<String>) -> Self {
        Self::processing(ProcessingStage::Encode, context)
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a model load error wrapping an engine failure.
    pub fn model_load(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ModelLoad {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a model load error without an underlying source.
    pub fn model_load_message(context: impl Into<String>) -> Self {
        Self::ModelLoad {
            context: context.into(),
            source: None,
        }
    }

    /// Creates an inference error wrapping an engine failure.
    pub fn inference(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an inference error without an underlying source.
    pub fn inference_message(context: impl Into<String>) -> Self {
        Self::Inference {
            context: context.into(),
            source: None,
        }
    }
}
