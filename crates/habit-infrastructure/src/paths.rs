//! Unified path management for the client's local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/habit-tracker/     # Config directory
//! ├── config.toml              # Client configuration
//! ├── token                    # Bearer token (mode 600)
//! └── logs/                    # Application logs
//!     └── habit.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "habit-tracker";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for habit_core::HabitError {
    fn from(err: PathError) -> Self {
        habit_core::HabitError::config(err.to_string())
    }
}

/// Resolves every local path from one root.
///
/// `HabitPaths::new(None)` uses the platform config directory; tests pass a
/// temporary directory instead.
#[derive(Debug, Clone)]
pub struct HabitPaths {
    base: Option<PathBuf>,
}

impl HabitPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the config directory (e.g. `~/.config/habit-tracker/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn token_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("token"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}

impl Default for HabitPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
