//! Model descriptor and manifest loading.
//!
//! A [`Model`] is an immutable description of one bundled network: its
//! on-disk model file, sample images, optional mean image, and ordered
//! label list. It is created once at startup from a JSON manifest and
//! read-only for the process lifetime.

use crate::core::errors::{ClassifyError, ClassifyResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// JSON manifest describing a bundled model.
///
/// Relative paths are resolved against the directory containing the
/// manifest file.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelManifest {
    /// Display name of the model.
    pub name: String,
    /// Optional descriptor-level version string. The version shown to the
    /// user comes from the loaded engine session, not from here.
    #[serde(default)]
    pub version: Option<String>,
    /// Path to the model file handed to the engine.
    pub model_file: PathBuf,
    /// Sample images offered for classification.
    #[serde(default)]
    pub sample_images: Vec<PathBuf>,
    /// Optional raw-float mean image file.
    #[serde(default)]
    pub mean_image: Option<PathBuf>,
    /// Path to the label file, one label per line, ordered by class index.
    pub labels_file: PathBuf,
}

/// Immutable model descriptor.
#[derive(Debug, Clone)]
pub struct Model {
    /// Display name of the model.
    pub name: String,
    /// Optional descriptor-level version string.
    pub version: Option<String>,
    /// Path to the model file handed to the engine.
    pub file: PathBuf,
    /// Sample images offered for classification.
    pub sample_images: Vec<PathBuf>,
    /// Optional raw-float mean image file.
    pub mean_image: Option<PathBuf>,
    /// Ordered class labels.
    pub labels: Vec<String>,
}

impl Model {
    /// Loads a model descriptor from a JSON manifest file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the manifest cannot be read or
    /// parsed, or if the label file cannot be read.
    pub fn from_manifest(manifest_path: &Path) -> ClassifyResult<Self> {
        let content = std::fs::read_to_string(manifest_path).map_err(|e| {
            ClassifyError::config(format!(
                "failed to read model manifest '{}': {}",
                manifest_path.display(),
                e
            ))
        })?;
        let manifest: ModelManifest = serde_json::from_str(&content).map_err(|e| {
            ClassifyError::config(format!(
                "failed to parse model manifest '{}': {}",
                manifest_path.display(),
                e
            ))
        })?;

        let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
        let resolve = |path: &Path| -> PathBuf {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                base.join(path)
            }
        };

        let labels = read_labels(&resolve(&manifest.labels_file))?;

        Ok(Self {
            name: manifest.name,
            version: manifest.version,
            file: resolve(&manifest.model_file),
            sample_images: manifest.sample_images.iter().map(|p| resolve(p)).collect(),
            mean_image: manifest.mean_image.as_deref().map(resolve),
            labels,
        })
    }

    /// Returns the label for a class index, or a stable placeholder when
    /// the index falls outside the label list.
    pub fn label(&self, index: usize) -> String {
        self.labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("class_{index}"))
    }
}

/// Reads a label file and returns one label per line.
///
/// Empty lines are preserved so label indices stay aligned with class
/// indices.
///
/// # Errors
///
/// Returns an invalid input error if the file cannot be read.
pub fn read_labels(path: &Path) -> ClassifyResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ClassifyError::invalid_input(format!(
            "failed to read labels from '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(content.lines().map(|s| s.to_string()).collect())
}
