//! Asset type definitions

use crate::path::AssetPath;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kinds of asset the content library manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Texture,
}

/// Metadata for a registered asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetMeta {
    pub name: String,
    pub path: AssetPath,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub hash: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub properties: HashMap<String, toml::Value>,
}

/// Header written when a package is first created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageHeader {
    pub path: AssetPath,
}

/// On-disk package format (`<path>.asset.toml`).
///
/// A package whose `asset` table is missing was created but never populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageFile {
    pub package: PackageHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_file_serde() {
        let toml_str = r#"
[package]
path = "/Game/Gen/Circle"

[asset]
name = "Circle"
path = "/Game/Gen/Circle"
type = "texture"
hash = "sha256:a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2"
format = "png"
width = 512
height = 512

[asset.properties]
prompt = "a red circle"
"#;

        let file: PackageFile = toml::from_str(toml_str).unwrap();
        let asset = file.asset.unwrap();
        assert_eq!(asset.name, "Circle");
        assert_eq!(asset.asset_type, AssetType::Texture);
        assert_eq!(asset.width, 512);
        assert_eq!(
            asset.properties.get("prompt").and_then(|v| v.as_str()),
            Some("a red circle")
        );
    }

    #[test]
    fn test_unpopulated_package() {
        let file: PackageFile = toml::from_str("[package]\npath = \"/Game/Empty\"\n").unwrap();
        assert!(file.asset.is_none());
        assert_eq!(file.package.path.name(), "Empty");

        let written = toml::to_string_pretty(&file).unwrap();
        assert!(!written.contains("[asset]"));
    }
}
