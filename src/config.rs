//! Configuration management for Chef's Choice
//!
//! Handles config file loading/saving and API endpoint resolution.
//! Config is stored at ~/.config/chefs-choice/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::mealdb::{premium_base_url, DEFAULT_TIMEOUT, PUBLIC_BASE_URL};
use crate::api::MealDbClient;
use crate::favorites::FileStore;
use crate::selector::{QualifyingSelector, DEFAULT_AREAS, DEFAULT_MAX_ATTEMPTS};

/// Environment variable holding a premium TheMealDB key
pub const API_KEY_ENV: &str = "MEALDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Premium TheMealDB API key
    pub api_key: Option<String>,
    /// Full API base URL, overrides `api_key`
    pub api_base: Option<String>,
    /// Areas accepted for the home screen's random recipe
    pub allowed_areas: Option<Vec<String>>,
    /// Random draws before giving up on a qualifying recipe
    pub max_attempts: Option<u32>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Where favorites are stored
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/chefs-choice/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("chefs-choice").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from `path`, or return default if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        toml::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Self::default()
        })
    }

    /// Write config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// API base URL with fallback chain:
    /// 1. `api_base` from the config file
    /// 2. Premium endpoint for environment variable MEALDB_API_KEY
    /// 3. Premium endpoint for `api_key` from the config file
    /// 4. Public test endpoint
    pub fn api_base_url(&self) -> String {
        if let Some(ref base) = self.api_base {
            return base.clone();
        }

        let env_key = std::env::var(API_KEY_ENV).ok();
        match env_key.as_deref().or(self.api_key.as_deref()) {
            Some(key) if !key.trim().is_empty() => premium_base_url(key.trim()),
            _ => PUBLIC_BASE_URL.to_string(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn client(&self) -> MealDbClient {
        MealDbClient::with_base_url(self.api_base_url()).timeout(self.request_timeout())
    }

    pub fn selector(&self) -> QualifyingSelector {
        let attempts = self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        match &self.allowed_areas {
            Some(areas) => QualifyingSelector::new(areas.iter().cloned(), attempts),
            None => QualifyingSelector::new(DEFAULT_AREAS, attempts),
        }
    }

    /// Favorites directory: configured, platform data dir, or `./.chefs-choice`
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(FileStore::default_dir)
            .unwrap_or_else(|| PathBuf::from(".chefs-choice"))
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_dir())
    }
}
