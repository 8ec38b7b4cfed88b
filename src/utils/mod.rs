//! Utility functions for image handling.

use crate::core::errors::{ClassifyError, ClassifyResult};
use image::RgbImage;
use std::path::Path;

/// Loads an image from a file path and converts it to an RGB bitmap.
///
/// # Errors
///
/// Returns an image load error if the file cannot be decoded.
pub fn load_image(path: &Path) -> ClassifyResult<RgbImage> {
    let img = image::open(path).map_err(ClassifyError::ImageLoad)?;
    Ok(img.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_image_fails_for_missing_file() {
        let result = load_image(Path::new("/nonexistent/sample.jpg"));
        assert!(matches!(result, Err(ClassifyError::ImageLoad(_))));
    }

    #[test]
    fn load_image_roundtrips_a_written_png() {
        let path = std::env::temp_dir().join(format!(
            "percept-utils-{}-sample.png",
            std::process::id()
        ));
        let img = RgbImage::from_pixel(4, 3, image::Rgb([9, 8, 7]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(*loaded.get_pixel(0, 0), image::Rgb([9, 8, 7]));
    }
}
