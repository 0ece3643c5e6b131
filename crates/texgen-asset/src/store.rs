//! Content-addressed payload storage

use std::fs;
use std::path::{Path, PathBuf};
use texgen_core::{ContentHash, Result};

/// Content-addressed file storage
///
/// Stores payloads at `<root>/<first-2-hex>/<full-hash>.<ext>`
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a new content store at the given root directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Store a payload and return its content hash
    pub fn store_bytes(&self, data: &[u8], ext: &str) -> Result<ContentHash> {
        let hash = ContentHash::from_bytes(data);
        let dest = self.path_for(&hash, ext);
        if dest.exists() {
            return Ok(hash);
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&dest, data)?;
        Ok(hash)
    }

    /// Location of a stored payload, if present
    pub fn get(&self, hash: &ContentHash) -> Option<PathBuf> {
        let hex = hash.to_hex();
        let dir = self.root.join(&hex[..2]);

        fs::read_dir(&dir).ok()?.flatten().find_map(|entry| {
            let name = entry.file_name();
            name.to_string_lossy()
                .starts_with(&hex)
                .then(|| entry.path())
        })
    }

    /// Check if a hash exists in the store
    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.get(hash).is_some()
    }

    fn path_for(&self, hash: &ContentHash, ext: &str) -> PathBuf {
        let hex = hash.to_hex();
        self.root.join(&hex[..2]).join(format!("{}.{}", hex, ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("texgen_store_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_store_and_retrieve() {
        let store_dir = temp_dir();
        let store = ContentStore::new(&store_dir);

        let hash = store.store_bytes(b"png bytes", "png").unwrap();
        assert!(store.contains(&hash));

        let retrieved = store.get(&hash).unwrap();
        assert_eq!(retrieved.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(fs::read(retrieved).unwrap(), b"png bytes");

        fs::remove_dir_all(&store_dir).ok();
    }

    #[test]
    fn test_store_dedup() {
        let store_dir = temp_dir();
        let store = ContentStore::new(&store_dir);

        let hash1 = store.store_bytes(b"same content", "png").unwrap();
        let hash2 = store.store_bytes(b"same content", "png").unwrap();
        assert_eq!(hash1, hash2);

        let prefix_dir = store_dir.join(&hash1.to_hex()[..2]);
        assert_eq!(fs::read_dir(prefix_dir).unwrap().count(), 1);

        fs::remove_dir_all(&store_dir).ok();
    }

    #[test]
    fn test_missing_hash() {
        let store_dir = temp_dir();
        let store = ContentStore::new(&store_dir);
        assert!(!store.contains(&ContentHash::from_bytes(b"never stored")));
        fs::remove_dir_all(&store_dir).ok();
    }
}
