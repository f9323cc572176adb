use crate::error::{PhotoSearchError, Result};
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub unsplash_key: Option<String>,
    pub pixabay_key: Option<String>,
    pub pexels_key: Option<String>,
    pub timeout_seconds: u64,
    pub default_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unsplash_key: None,
            pixabay_key: None,
            pexels_key: None,
            timeout_seconds: 10,
            default_count: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoSearchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-search").join("config.json"))
    }

    /// プロバイダのAPIキーを取得（環境変数を優先）
    pub fn api_key(&self, provider: Provider) -> Result<String> {
        if let Ok(key) = std::env::var(provider.key_env()) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        let stored = match provider {
            Provider::Unsplash => &self.unsplash_key,
            Provider::Pixabay => &self.pixabay_key,
            Provider::Pexels => &self.pexels_key,
        };

        stored
            .clone()
            .ok_or_else(|| PhotoSearchError::MissingApiKey(provider.label().to_string()))
    }

    pub fn set_api_key(&mut self, provider: Provider, key: String) -> Result<()> {
        match provider {
            Provider::Unsplash => self.unsplash_key = Some(key),
            Provider::Pixabay => self.pixabay_key = Some(key),
            Provider::Pexels => self.pexels_key = Some(key),
        }
        self.save()
    }

    pub fn has_api_key(&self, provider: Provider) -> bool {
        self.api_key(provider).is_ok()
    }
}
