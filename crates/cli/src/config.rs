use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Local CLI preferences, layered under the engine's own
/// `EngineConfig::load()` env-var config -- this file only holds the
/// things a human running the CLI wants to persist between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Path to a vocabulary file for `FileEmbeddingProvider::load`. When
    /// unset, the CLI falls back to the deterministic mock provider.
    #[serde(default)]
    pub embedding_path: Option<String>,
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { embedding_path: None, default_language: default_language() }
    }
}

impl CliConfig {
    /// Config file path: ~/.config/brainprint/cli.toml
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("brainprint");
        Ok(config_dir.join("cli.toml"))
    }

    /// Load config from file, falling back to defaults.
    /// Environment variables override file values.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(path) = std::env::var("BRAINPRINT_EMBEDDING_PATH") {
            config.embedding_path = Some(path);
        }
        if let Ok(lang) = std::env::var("BRAINPRINT_DEFAULT_LANGUAGE") {
            config.default_language = lang;
        }

        Ok(config)
    }

    /// Save current config to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Set a single config key and save.
    pub fn set(key: &str, value: &str) -> Result<()> {
        let mut config = Self::load()?;
        match key {
            "embedding_path" => config.embedding_path = Some(value.to_string()),
            "default_language" => config.default_language = value.to_string(),
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: embedding_path, default_language"),
        }
        config.save()
    }
}
