//! Mean image loading.
//!
//! A mean image is a per-element bias subtracted from pixel values before
//! inference, mirroring training-time normalization. It is stored on disk
//! as raw native-endian 32-bit floats, parallel in size to one input
//! tensor.

use std::path::Path;
use tracing::warn;

/// Loads the mean image for a tensor of `element_count` floats.
///
/// Policy, in order:
/// * No path configured, or the file does not exist: returns a zero-filled
///   buffer of exactly `element_count` floats (zero mean).
/// * File read succeeds: returns one float per four bytes read, trailing
///   partial words dropped. The caller validates the length against the
///   tensor; any mismatch aborts classification for that frame.
/// * File read fails mid-stream: returns a zero-length buffer. This is
///   treated as "absent", not as zero mean, so it fails the codec's size
///   precondition instead of silently proceeding with zeros.
///
/// The file handle is scoped and closed on every exit path.
pub fn load_mean_image(path: Option<&Path>, element_count: usize) -> Vec<f32> {
    let Some(path) = path else {
        return vec![0.0; element_count];
    };

    if !path.exists() {
        return vec![0.0; element_count];
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read mean image");
            return Vec::new();
        }
    };

    bytes
        .chunks_exact(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            f32::from_ne_bytes(word)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("percept-mean-{}-{}", std::process::id(), name))
    }

    #[test]
    fn missing_file_yields_zero_mean() {
        let mean = load_mean_image(Some(Path::new("/nonexistent/mean.bin")), 8);
        assert_eq!(mean, vec![0.0; 8]);
    }

    #[test]
    fn no_path_yields_zero_mean() {
        let mean = load_mean_image(None, 4);
        assert_eq!(mean, vec![0.0; 4]);
    }

    #[test]
    fn reads_native_endian_floats() {
        let path = temp_path("floats");
        let values = [1.5f32, -2.0, 104.0];
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        std::fs::write(&path, bytes).unwrap();

        let mean = load_mean_image(Some(&path), 3);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(mean, values);
    }

    #[test]
    fn short_file_returns_its_own_length() {
        // The codec precondition rejects the mismatch downstream.
        let path = temp_path("short");
        let bytes: Vec<u8> = [1.0f32, 2.0].iter().flat_map(|v| v.to_ne_bytes()).collect();
        std::fs::write(&path, bytes).unwrap();

        let mean = load_mean_image(Some(&path), 100);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(mean.len(), 2);
    }

    #[test]
    fn trailing_partial_word_is_dropped() {
        let path = temp_path("partial");
        let mut bytes: Vec<u8> = 7.0f32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        std::fs::write(&path, bytes).unwrap();

        let mean = load_mean_image(Some(&path), 1);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(mean, vec![7.0]);
    }
}
