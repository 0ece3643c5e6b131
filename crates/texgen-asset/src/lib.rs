//! texgen Asset - Content library for generated textures
//!
//! Provides logical asset paths, an RGBA texture object, content-addressed
//! payload storage, and a catalog that makes stored textures discoverable.

mod catalog;
mod library;
mod path;
mod store;
mod texture;
mod types;

pub use catalog::AssetCatalog;
pub use library::{ContentLibrary, Package};
pub use path::AssetPath;
pub use store::ContentStore;
pub use texture::{Texture2D, MAX_TEXTURE_DIMENSION};
pub use types::{AssetMeta, AssetType, PackageFile, PackageHeader};
