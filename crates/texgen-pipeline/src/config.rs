//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `TEXGEN_OPENAI_API_KEY`, then `OPENAI_API_KEY`
//! 2. Project-local: `.texgen/config.toml`
//! 3. Global: `~/.texgen/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use texgen_core::{Result, TexGenError};

use crate::request::DEFAULT_SIZE;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/images/generations";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const API_KEY_ENV_VARS: [&str; 2] = ["TEXGEN_OPENAI_API_KEY", "OPENAI_API_KEY"];

/// Image service settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Defaults for the generation inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_content_root")]
    pub content_root: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            path: default_path(),
            name: default_name(),
            content_root: default_content_root(),
        }
    }
}

fn default_size() -> String {
    DEFAULT_SIZE.to_string()
}
fn default_path() -> String {
    "/Game".to_string()
}
fn default_name() -> String {
    "TestTexture".to_string()
}
fn default_content_root() -> String {
    "content".to_string()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TexGenConfigFile {
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct TexGenConfig {
    pub openai: OpenAiConfig,
    pub generation: GenerationConfig,
}

impl TexGenConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = TexGenConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".texgen/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok());

        Ok(config.into())
    }

    /// Load config from a specific file path only, plus env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok());
        Ok(config.into())
    }

    /// The bearer token, if any layer supplied one
    pub fn api_key(&self) -> Option<&str> {
        self.openai.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Generation endpoint (or its default)
    pub fn api_url(&self) -> &str {
        self.openai.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Global timeout applied to each HTTP call
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.openai.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".texgen").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<TexGenConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            TexGenError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut TexGenConfigFile, overlay: TexGenConfigFile) {
        if overlay.openai.api_key.is_some() {
            base.openai.api_key = overlay.openai.api_key;
        }
        if overlay.openai.api_url.is_some() {
            base.openai.api_url = overlay.openai.api_url;
        }
        if overlay.openai.timeout_secs.is_some() {
            base.openai.timeout_secs = overlay.openai.timeout_secs;
        }

        if overlay.generation.size != default_size() {
            base.generation.size = overlay.generation.size;
        }
        if overlay.generation.path != default_path() {
            base.generation.path = overlay.generation.path;
        }
        if overlay.generation.name != default_name() {
            base.generation.name = overlay.generation.name;
        }
        if overlay.generation.content_root != default_content_root() {
            base.generation.content_root = overlay.generation.content_root;
        }
    }

    fn apply_env_overrides<F>(config: &mut TexGenConfigFile, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .find_map(|&name| lookup(name).filter(|v| !v.is_empty()))
        {
            config.openai.api_key = Some(key);
        }
    }
}

impl From<TexGenConfigFile> for TexGenConfig {
    fn from(file: TexGenConfigFile) -> Self {
        Self {
            openai: file.openai,
            generation: file.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("texgen_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_load_config_file() {
        let path = temp_config(
            r#"
[openai]
api_key = "sk-file"
api_url = "https://images.example.com/generate"
timeout_secs = 30

[generation]
size = "512x512"
path = "/Game/Gen"
"#,
        );
        let file = TexGenConfig::load_file(&path).unwrap();
        let config = TexGenConfig::from(file);

        assert_eq!(config.api_key(), Some("sk-file"));
        assert_eq!(config.api_url(), "https://images.example.com/generate");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.generation.size, "512x512");
        assert_eq!(config.generation.path, "/Game/Gen");
        assert_eq!(config.generation.name, "TestTexture");

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_defaults() {
        let config = TexGenConfig::default();
        assert_eq!(config.api_key(), None);
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.generation.size, "1024x1024");
        assert_eq!(config.generation.path, "/Game");
        assert_eq!(config.generation.content_root, "content");
    }

    #[test]
    fn test_project_overrides_global() {
        let mut base: TexGenConfigFile = toml::from_str(
            r#"
[openai]
api_key = "sk-global"
timeout_secs = 10

[generation]
name = "GlobalName"
"#,
        )
        .unwrap();
        let project: TexGenConfigFile = toml::from_str(
            r#"
[openai]
api_key = "sk-project"

[generation]
size = "256x256"
"#,
        )
        .unwrap();

        TexGenConfig::merge_into(&mut base, project);
        let config = TexGenConfig::from(base);
        assert_eq!(config.api_key(), Some("sk-project"));
        assert_eq!(config.openai.timeout_secs, Some(10));
        assert_eq!(config.generation.name, "GlobalName");
        assert_eq!(config.generation.size, "256x256");
    }

    #[test]
    fn test_env_override_precedence() {
        let mut config = TexGenConfigFile::default();
        config.openai.api_key = Some("sk-file".to_string());

        TexGenConfig::apply_env_overrides(
            &mut config,
            lookup_from(&[("OPENAI_API_KEY", "sk-generic"), ("TEXGEN_OPENAI_API_KEY", "sk-texgen")]),
        );
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-texgen"));

        TexGenConfig::apply_env_overrides(&mut config, lookup_from(&[("OPENAI_API_KEY", "sk-generic")]));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-generic"));

        TexGenConfig::apply_env_overrides(&mut config, lookup_from(&[("TEXGEN_OPENAI_API_KEY", "")]));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-generic"));
    }

    #[test]
    fn test_empty_key_is_none() {
        let mut config = TexGenConfig::default();
        config.openai.api_key = Some(String::new());
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_invalid_config_file() {
        let path = temp_config("[openai\napi_key = ");
        let err = TexGenConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, TexGenError::ConfigError(_)));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
