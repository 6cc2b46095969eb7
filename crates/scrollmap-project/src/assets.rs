//! Content-addressed asset store.
//!
//! Scratch names every asset file `<md5>.<ext>` inside the archive, so two
//! costumes with identical bytes share one file.

use std::collections::BTreeMap;
use tracing::trace;

/// Blank stage backdrop, 480x360.
pub const BACKDROP_SVG: &str = r##"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="480" height="360" viewBox="0,0,480,360"><rect x="0" y="0" width="480" height="360" fill="#ffffff" fill-opacity="0"/></svg>"##;

/// Player marker drawn at the stage center.
pub const PLAYER_SVG: &str = r##"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0,0,24,24"><circle cx="12" cy="12" r="10" fill="#ff6600" stroke="#000000" stroke-width="2"/></svg>"##;

/// Stored asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Lowercase hex md5 of the file bytes.
    pub asset_id: String,
    /// Archive file name, `<asset_id>.<ext>`.
    pub md5ext: String,
    /// Extension without the dot.
    pub data_format: String,
}

/// Asset files keyed by archive name.
#[derive(Debug, Default, Clone)]
pub struct AssetStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl AssetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, returning its reference. Identical bytes are stored once.
    pub fn insert(&mut self, bytes: Vec<u8>, ext: &str) -> AssetRef {
        let asset_id = format!("{:x}", md5::compute(&bytes));
        let md5ext = format!("{}.{}", asset_id, ext);
        if self.files.contains_key(&md5ext) {
            trace!(md5ext = %md5ext, "asset already stored");
        } else {
            trace!(md5ext = %md5ext, bytes = bytes.len(), "storing asset");
            self.files.insert(md5ext.clone(), bytes);
        }
        AssetRef {
            asset_id,
            md5ext,
            data_format: ext.to_string(),
        }
    }

    /// Returns the bytes stored under `md5ext`.
    pub fn get(&self, md5ext: &str) -> Option<&[u8]> {
        self.files.get(md5ext).map(Vec::as_slice)
    }

    /// Number of distinct files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if nothing was stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in archive-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_naming() {
        let mut store = AssetStore::new();
        let asset = store.insert(b"hello".to_vec(), "png");
        assert_eq!(asset.asset_id, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(asset.md5ext, "5d41402abc4b2a76b9719d911017c592.png");
        assert_eq!(asset.data_format, "png");
        assert_eq!(store.get(&asset.md5ext), Some(&b"hello"[..]));
    }

    #[test]
    fn test_dedup() {
        let mut store = AssetStore::new();
        let a = store.insert(vec![1, 2, 3], "png");
        let b = store.insert(vec![1, 2, 3], "png");
        let c = store.insert(vec![1, 2, 4], "png");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_builtin_svgs_differ() {
        let mut store = AssetStore::new();
        store.insert(BACKDROP_SVG.as_bytes().to_vec(), "svg");
        store.insert(PLAYER_SVG.as_bytes().to_vec(), "svg");
        assert_eq!(store.len(), 2);
        assert!(store.iter().all(|(name, _)| name.ends_with(".svg")));
    }
}
