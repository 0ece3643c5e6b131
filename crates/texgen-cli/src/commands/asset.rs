//! Asset inspection commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use texgen_asset::{AssetMeta, AssetPath, AssetType, ContentLibrary};
use texgen_pipeline::TexGenConfig;

#[derive(Subcommand)]
pub enum AssetCommands {
    /// List texture assets in the content root
    List {
        /// Content directory (defaults to config)
        #[arg(long)]
        content_root: Option<String>,

        /// Only assets under this folder, e.g. /Game/Gen
        #[arg(long)]
        folder: Option<String>,

        /// Output format (json or toml)
        #[arg(long, default_value = "toml")]
        format: String,
    },

    /// Show asset info
    Info {
        /// Logical asset path, e.g. /Game/Gen/Circle
        path: String,

        /// Content directory (defaults to config)
        #[arg(long)]
        content_root: Option<String>,
    },
}

pub fn run(cmd: AssetCommands) -> Result<()> {
    match cmd {
        AssetCommands::List {
            content_root,
            folder,
            format,
        } => run_list(content_root, folder.as_deref(), &format),
        AssetCommands::Info { path, content_root } => run_info(&path, content_root),
    }
}

#[derive(Serialize)]
struct ListedAsset<'a> {
    path: &'a str,
    hash: &'a str,
    width: u32,
    height: u32,
}

#[derive(Serialize)]
struct ListedAssets<'a> {
    assets: Vec<ListedAsset<'a>>,
}

impl<'a> From<&'a AssetMeta> for ListedAsset<'a> {
    fn from(meta: &'a AssetMeta) -> Self {
        Self {
            path: meta.path.as_str(),
            hash: &meta.hash,
            width: meta.width,
            height: meta.height,
        }
    }
}

fn open_library(content_root: Option<String>) -> Result<ContentLibrary> {
    let root = match content_root {
        Some(root) => root,
        None => TexGenConfig::load()?.generation.content_root,
    };
    Ok(ContentLibrary::open(root)?)
}

fn run_list(content_root: Option<String>, folder: Option<&str>, format: &str) -> Result<()> {
    let library = open_library(content_root)?;
    let catalog = library.catalog();

    let assets: Vec<&AssetMeta> = match folder {
        Some(folder) => catalog.in_folder(folder),
        None => catalog.by_type(AssetType::Texture),
    };

    if assets.is_empty() {
        println!("No texture assets found in {}", library.root().display());
        return Ok(());
    }

    let listed = ListedAssets {
        assets: assets.iter().map(|a| ListedAsset::from(*a)).collect(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&listed.assets)?),
        "toml" => print!("{}", toml::to_string_pretty(&listed)?),
        other => anyhow::bail!("Unknown format '{}'. Use json or toml", other),
    }

    Ok(())
}

fn run_info(path: &str, content_root: Option<String>) -> Result<()> {
    let library = open_library(content_root)?;
    let path = AssetPath::parse(path)?;

    let Some(meta) = library.catalog().get(&path) else {
        anyhow::bail!("Asset '{}' not found", path);
    };

    println!("Asset: {}", meta.path);
    println!("  Name: {}", meta.name);
    println!("  Type: {:?}", meta.asset_type);
    println!("  Hash: {}", meta.hash);
    println!("  Format: {}", meta.format);
    println!("  Dimensions: {}x{}", meta.width, meta.height);
    if let Some(payload) = library.payload_path(meta) {
        println!("  Payload: {}", payload.display());
    }
    if !meta.properties.is_empty() {
        let mut keys: Vec<_> = meta.properties.keys().collect();
        keys.sort();
        println!("  Properties:");
        for key in keys {
            println!("    {}: {}", key, meta.properties[key]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use texgen_asset::Texture2D;

    #[test]
    fn test_listed_asset_serializes() {
        let root = std::env::temp_dir().join(format!("texgen_cli_list_test_{}", uuid::Uuid::new_v4()));
        let mut library = ContentLibrary::open(&root).unwrap();
        let path = AssetPath::parse("/Game/Gen/Swatch").unwrap();
        let package = library.create_package(&path).unwrap();
        let texture = Texture2D::from_pixels(2, 1, &[[255, 0, 0, 255], [0, 0, 255, 255]]).unwrap();
        let meta = library
            .save_texture(package, &texture, Default::default())
            .unwrap();

        let listed = ListedAssets {
            assets: vec![ListedAsset::from(&meta)],
        };
        let text = toml::to_string_pretty(&listed).unwrap();
        assert!(text.contains("path = \"/Game/Gen/Swatch\""));
        assert!(text.contains("width = 2"));

        let json = serde_json::to_value(&listed.assets).unwrap();
        assert_eq!(json[0]["height"], 1);

        std::fs::remove_dir_all(&root).ok();
    }
}
