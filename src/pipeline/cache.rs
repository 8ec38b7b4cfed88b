//! Weakly-held cache of decoded bitmaps.
//!
//! Entries map an image file identity (absolute path string) to a weak
//! handle on the decoded bitmap. The cache never owns a bitmap: once every
//! strong handle elsewhere is dropped the entry is reclaimed, and the next
//! lookup misses and re-decodes. Capacity is implementation-defined and
//! may shrink at any time; callers must always be prepared to re-decode.
//!
//! Entries are inserted only after a successful decode, never
//! pre-populated, and never explicitly removed. Inserts from concurrent
//! decode units are safe; existing entries are only ever overwritten with
//! a fresh handle for the same path.

use image::RgbImage;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, Weak};

/// Insert-only cache of weakly-held decoded bitmaps.
#[derive(Debug, Default)]
pub struct BitmapCache {
    entries: Mutex<HashMap<String, Weak<RgbImage>>>,
}

impl BitmapCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the decoded bitmap for an image file.
    ///
    /// Returns `None` when the path was never decoded or the weak hold has
    /// been reclaimed; the caller re-decodes in either case.
    pub fn get(&self, path: &Path) -> Option<Arc<RgbImage>> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(&path.display().to_string())
            .and_then(Weak::upgrade)
    }

    /// Records a freshly decoded bitmap for an image file.
    pub fn insert(&self, path: &Path, bitmap: &Arc<RgbImage>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(path.display().to_string(), Arc::downgrade(bitmap));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bitmap() -> Arc<RgbImage> {
        Arc::new(RgbImage::new(2, 2))
    }

    #[test]
    fn hit_after_insert_while_strong_handle_lives() {
        let cache = BitmapCache::new();
        let path = PathBuf::from("/samples/kitten.jpg");
        let img = bitmap();
        cache.insert(&path, &img);
        assert!(cache.get(&path).is_some());
    }

    #[test]
    fn miss_for_unknown_path() {
        let cache = BitmapCache::new();
        assert!(cache.get(Path::new("/samples/unknown.jpg")).is_none());
    }

    #[test]
    fn entry_is_reclaimed_once_strong_handles_drop() {
        let cache = BitmapCache::new();
        let path = PathBuf::from("/samples/kitten.jpg");
        let img = bitmap();
        cache.insert(&path, &img);
        drop(img);
        assert!(cache.get(&path).is_none());
    }

    #[test]
    fn concurrent_inserts_do_not_corrupt_the_map() {
        let cache = Arc::new(BitmapCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let img = Arc::new(RgbImage::new(1, 1));
                    let path = PathBuf::from(format!("/samples/{i}.jpg"));
                    cache.insert(&path, &img);
                    // Keep the strong handle alive long enough to observe the hit.
                    assert!(cache.get(&path).is_some());
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
