//! Turn decoded pixels into a persisted, discoverable texture asset.

use crate::decode::ImagePixels;
use std::collections::HashMap;
use texgen_asset::{AssetMeta, AssetPath, ContentLibrary, Texture2D};
use texgen_core::Result;

/// Where a generated image came from, recorded on the asset
#[derive(Debug, Clone, Default)]
pub struct Provenance {
    pub prompt: String,
    pub size: String,
    pub source_url: String,
    pub transport: String,
}

impl Provenance {
    fn into_properties(self) -> HashMap<String, toml::Value> {
        HashMap::from([
            ("prompt".to_string(), toml::Value::String(self.prompt)),
            ("size".to_string(), toml::Value::String(self.size)),
            ("source_url".to_string(), toml::Value::String(self.source_url)),
            ("transport".to_string(), toml::Value::String(self.transport)),
        ])
    }
}

/// Create the package at `destination`, build the texture, and register it.
///
/// The package is created before the texture is built; if texture creation
/// fails the empty package stays on disk.
pub fn materialize_texture(
    library: &mut ContentLibrary,
    pixels: ImagePixels,
    destination: &AssetPath,
    provenance: Provenance,
) -> Result<AssetMeta> {
    let package = library.create_package(destination).inspect_err(|e| {
        tracing::warn!(destination = %destination, error = %e, "package creation failed");
    })?;

    let meta = Texture2D::from_pixels(pixels.width, pixels.height, &pixels.pixels)
        .and_then(|texture| {
            library.save_texture(package, &texture, provenance.into_properties())
        })
        .inspect_err(|e| {
            tracing::warn!(destination = %destination, error = %e, "texture creation failed");
        })?;

    Ok(meta)
}
