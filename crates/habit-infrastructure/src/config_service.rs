//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `~/.config/habit-tracker/config.toml` and
//! applies environment overrides.
//!
//! Priority: environment variables > config file > defaults. Command-line
//! flags are applied on top by the binary.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use habit_core::config::ClientConfig;
use habit_core::{HabitError, Result};

use crate::paths::HabitPaths;
use crate::storage::FileTokenStore;

pub const ENV_BASE_URL: &str = "HABIT_BASE_URL";
pub const ENV_TOKEN_FILE: &str = "HABIT_TOKEN_FILE";
pub const ENV_LOG: &str = "HABIT_LOG";

/// Loads the client configuration and resolves the paths derived from it.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    paths: HabitPaths,
}

impl ConfigService {
    pub fn new(paths: HabitPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &HabitPaths {
        &self.paths
    }

    /// Loads the config file and applies process environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        Ok(Self::apply_env(config, |key| std::env::var(key).ok()))
    }

    /// Loads the config file only. A missing file yields defaults; a
    /// malformed one is an error.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let path = self.paths.config_file()?;
        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                HabitError::config(format!("Invalid config file {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Ok(ClientConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes `config` to the config file, creating the directory.
    pub fn save(&self, config: &ClientConfig) -> Result<PathBuf> {
        let path = self.paths.config_file()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(config)?)?;
        Ok(path)
    }

    /// Applies overrides from an environment lookup.
    pub fn apply_env<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(token_file) = lookup(ENV_TOKEN_FILE).filter(|v| !v.trim().is_empty()) {
            config.token_file = Some(PathBuf::from(token_file));
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.log_level = level;
        }
        config
    }

    /// Builds the token store named by `config`, falling back to the default
    /// token path.
    pub fn token_store(&self, config: &ClientConfig) -> Result<FileTokenStore> {
        let path = match &config.token_file {
            Some(path) => path.clone(),
            None => self.paths.token_file()?,
        };
        Ok(FileTokenStore::with_path(path))
    }
}
