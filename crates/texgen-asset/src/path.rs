//! Logical asset paths
//!
//! Assets are addressed by rooted, slash-separated paths such as
//! `/Game/Gen/Circle`. The last segment is the asset name; everything before
//! it is the folder the user picked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use texgen_core::{Result, TexGenError};

/// A validated logical path inside the content library
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    /// Parse a full logical path like `/Game/Gen/Circle`
    pub fn parse(path: &str) -> Result<Self> {
        let rest = path.strip_prefix('/').ok_or_else(|| {
            TexGenError::DestinationError(format!("'{}' must start with '/'", path))
        })?;

        if rest.is_empty() {
            return Err(TexGenError::DestinationError(
                "asset path has no name".to_string(),
            ));
        }

        for segment in rest.split('/') {
            validate_segment(path, segment)?;
        }

        Ok(Self(path.to_string()))
    }

    /// Combine a folder and an asset name, tolerating stray separators on
    /// either side of the join (`/Game/` + `Tex` and `/Game` + `/Tex` both
    /// give `/Game/Tex`).
    pub fn join(folder: &str, name: &str) -> Result<Self> {
        let folder = folder.trim_end_matches('/');
        let name = name.trim_start_matches('/');
        Self::parse(&format!("{}/{}", folder, name))
    }

    /// The final segment
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// The folder portion, `/` for top-level assets
    pub fn folder(&self) -> &str {
        match self.0.rfind('/') {
            Some(0) | None => "/",
            Some(idx) => &self.0[..idx],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative filesystem location of this path's package file
    pub(crate) fn package_file(&self) -> PathBuf {
        let mut rel = PathBuf::new();
        for segment in self.0[1..].split('/') {
            rel.push(segment);
        }
        rel.set_file_name(format!("{}.asset.toml", self.name()));
        rel
    }
}

fn validate_segment(path: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(TexGenError::DestinationError(format!(
            "'{}' contains an empty path segment",
            path
        )));
    }
    if segment.starts_with('.') {
        return Err(TexGenError::DestinationError(format!(
            "'{}': segment '{}' may not start with '.'",
            path, segment
        )));
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(TexGenError::DestinationError(format!(
            "'{}': invalid character {:?}",
            path, bad
        )));
    }
    Ok(())
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AssetPath {
    type Error = TexGenError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<AssetPath> for String {
    fn from(value: AssetPath) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_join_folder_and_name() {
        let path = AssetPath::join("/Game/Gen", "Circle").unwrap();
        assert_eq!(path.as_str(), "/Game/Gen/Circle");
        assert_eq!(path.name(), "Circle");
        assert_eq!(path.folder(), "/Game/Gen");
    }

    #[test]
    fn test_join_tolerates_separators() {
        assert_eq!(
            AssetPath::join("/Game/", "/TestTexture").unwrap().as_str(),
            "/Game/TestTexture"
        );
    }

    #[test]
    fn test_top_level_folder() {
        let path = AssetPath::parse("/Brick").unwrap();
        assert_eq!(path.folder(), "/");
        assert_eq!(path.name(), "Brick");
    }

    #[test]
    fn test_rejects_invalid_paths() {
        assert!(AssetPath::parse("Game/Tex").is_err());
        assert!(AssetPath::parse("/").is_err());
        assert!(AssetPath::parse("/Game//Tex").is_err());
        assert!(AssetPath::parse("/Game/../Tex").is_err());
        assert!(AssetPath::parse("/Game/My Tex").is_err());
        assert!(AssetPath::join("/Game", "").is_err());
    }

    #[test]
    fn test_package_file_location() {
        let path = AssetPath::parse("/Game/Gen/Circle").unwrap();
        assert_eq!(
            path.package_file(),
            Path::new("Game").join("Gen").join("Circle.asset.toml")
        );
    }

    #[test]
    fn test_serde_validates() {
        #[derive(Deserialize)]
        struct Holder {
            path: AssetPath,
        }
        let ok: Holder = toml::from_str(r#"path = "/Game/Tex""#).unwrap();
        assert_eq!(ok.path.name(), "Tex");
        assert!(toml::from_str::<Holder>(r#"path = "no/root""#).is_err());
    }
}
