//! The content library: packages on disk, payloads in the store, and the
//! catalog that makes them discoverable.
//!
//! Layout under the library root:
//! - `<root>/<Folder>/<Name>.asset.toml` - one package per logical path
//! - `<root>/.store/<xx>/<sha256>.png` - texture payloads

use crate::catalog::AssetCatalog;
use crate::path::AssetPath;
use crate::store::ContentStore;
use crate::texture::Texture2D;
use crate::types::{AssetMeta, AssetType, PackageFile, PackageHeader};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use texgen_core::{ContentHash, Result, TexGenError};

const STORE_DIR: &str = ".store";
const PAYLOAD_FORMAT: &str = "png";

/// A freshly created, not yet populated package
#[derive(Debug)]
pub struct Package {
    path: AssetPath,
    file: PathBuf,
}

impl Package {
    pub fn path(&self) -> &AssetPath {
        &self.path
    }

    /// Package file on disk
    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Persisted, discoverable texture assets rooted at one directory
pub struct ContentLibrary {
    root: PathBuf,
    store: ContentStore,
    catalog: AssetCatalog,
}

impl ContentLibrary {
    /// Open a library, scanning existing packages into the catalog
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let catalog = AssetCatalog::load_from_directory(&root)?;
        tracing::debug!(root = %root.display(), assets = catalog.len(), "opened content library");
        Ok(Self {
            store: ContentStore::new(root.join(STORE_DIR)),
            root,
            catalog,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Create a new, empty package at `path`.
    ///
    /// Fails if a package already exists there or the file cannot be written.
    pub fn create_package(&self, path: &AssetPath) -> Result<Package> {
        if self.catalog.get(path).is_some() {
            return Err(TexGenError::DestinationError(format!(
                "asset already exists at {}",
                path
            )));
        }

        let file = self.root.join(path.package_file());
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TexGenError::DestinationError(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let mut handle = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    TexGenError::DestinationError(format!("package already exists at {}", path))
                }
                _ => TexGenError::DestinationError(format!(
                    "cannot create package {}: {}",
                    file.display(),
                    e
                )),
            })?;

        let header = PackageFile {
            package: PackageHeader { path: path.clone() },
            asset: None,
        };
        let content = toml::to_string_pretty(&header)?;
        handle.write_all(content.as_bytes()).map_err(|e| {
            TexGenError::DestinationError(format!("cannot write package {}: {}", file.display(), e))
        })?;

        Ok(Package {
            path: path.clone(),
            file,
        })
    }

    /// Store `texture` as the content of `package` and register it.
    pub fn save_texture(
        &mut self,
        package: Package,
        texture: &Texture2D,
        properties: HashMap<String, toml::Value>,
    ) -> Result<AssetMeta> {
        let png = texture.encode_png()?;
        let hash = self
            .store
            .store_bytes(&png, PAYLOAD_FORMAT)
            .map_err(|e| TexGenError::TextureCreationError(format!("cannot store payload: {}", e)))?;

        let meta = AssetMeta {
            name: package.path.name().to_string(),
            path: package.path.clone(),
            asset_type: AssetType::Texture,
            hash: hash.to_prefixed_hex(),
            format: PAYLOAD_FORMAT.to_string(),
            width: texture.width(),
            height: texture.height(),
            properties,
        };

        let file = PackageFile {
            package: PackageHeader {
                path: package.path.clone(),
            },
            asset: Some(meta.clone()),
        };
        let content = toml::to_string_pretty(&file)?;
        fs::write(&package.file, content).map_err(|e| {
            TexGenError::TextureCreationError(format!(
                "cannot write package {}: {}",
                package.file.display(),
                e
            ))
        })?;

        self.catalog.register(meta.clone());
        tracing::debug!(path = %meta.path, hash = %meta.hash, "registered texture");
        Ok(meta)
    }

    /// Location of an asset's stored payload
    pub fn payload_path(&self, meta: &AssetMeta) -> Option<PathBuf> {
        ContentHash::from_prefixed_hex(&meta.hash).and_then(|h| self.store.get(&h))
    }

    /// Load a registered texture back from the store
    pub fn load_texture(&self, path: &AssetPath) -> Result<Texture2D> {
        let meta = self
            .catalog
            .get(path)
            .ok_or_else(|| TexGenError::AssetError(format!("no asset at {}", path)))?;
        let payload = self.payload_path(meta).ok_or_else(|| {
            TexGenError::AssetError(format!("payload {} missing from store", meta.hash))
        })?;
        let bytes = fs::read(payload)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| TexGenError::AssetError(format!("stored payload unreadable: {}", e)))?;
        Ok(Texture2D::from_image(image.to_rgba8()))
    }
}
