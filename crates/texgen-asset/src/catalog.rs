//! Asset catalog for discovering registered textures

use crate::path::AssetPath;
use crate::types::{AssetMeta, AssetType, PackageFile};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use texgen_core::Result;

/// Catalog of known assets and their metadata
#[derive(Debug, Default)]
pub struct AssetCatalog {
    /// Assets indexed by logical path, ordered for stable listings
    assets: BTreeMap<AssetPath, AssetMeta>,
    /// Hash to path index for reverse lookup
    hash_index: HashMap<String, AssetPath>,
}

impl AssetCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load asset metadata from `.asset.toml` package files in a directory tree.
    ///
    /// Directories starting with `.` (the content store) are skipped, as are
    /// packages that were created but never populated. Package files that do
    /// not parse are logged and skipped.
    pub fn load_from_directory<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut catalog = Self::new();
        Self::scan_directory(&mut catalog, path.as_ref())?;
        Ok(catalog)
    }

    fn scan_directory(catalog: &mut AssetCatalog, dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if path.is_dir() {
                if !file_name.starts_with('.') {
                    Self::scan_directory(catalog, &path)?;
                }
            } else if file_name.ends_with(".asset.toml") {
                let content = fs::read_to_string(&path)?;
                match toml::from_str::<PackageFile>(&content) {
                    Ok(PackageFile {
                        asset: Some(asset), ..
                    }) => catalog.register(asset),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(file = %path.display(), error = %e, "skipping unreadable package");
                    }
                }
            }
        }

        Ok(())
    }

    /// Register an asset in the catalog
    pub fn register(&mut self, meta: AssetMeta) {
        if let Some(previous) = self.assets.get(&meta.path) {
            self.hash_index.remove(&previous.hash);
        }
        self.hash_index.insert(meta.hash.clone(), meta.path.clone());
        self.assets.insert(meta.path.clone(), meta);
    }

    /// Get asset metadata by logical path
    pub fn get(&self, path: &AssetPath) -> Option<&AssetMeta> {
        self.assets.get(path)
    }

    /// Get asset metadata by content hash
    pub fn get_by_hash(&self, hash: &str) -> Option<&AssetMeta> {
        self.hash_index
            .get(hash)
            .and_then(|path| self.assets.get(path))
    }

    /// All assets of a given type, in path order
    pub fn by_type(&self, asset_type: AssetType) -> Vec<&AssetMeta> {
        self.assets
            .values()
            .filter(|a| a.asset_type == asset_type)
            .collect()
    }

    /// All assets under a folder, in path order
    pub fn in_folder(&self, folder: &str) -> Vec<&AssetMeta> {
        let folder = folder.trim_end_matches('/');
        self.assets
            .values()
            .filter(|a| {
                a.path
                    .as_str()
                    .strip_prefix(folder)
                    .map(|rest| rest.starts_with('/'))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Iterate over every registered asset in path order
    pub fn iter(&self) -> impl Iterator<Item = &AssetMeta> {
        self.assets.values()
    }

    /// Get the number of registered assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
