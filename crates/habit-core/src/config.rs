//! Client configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings read from `config.toml`.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the habit service
    pub base_url: String,
    /// Override for the token file location
    pub token_file: Option<PathBuf>,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Also write logs to a daily-rolling file in the logs directory
    pub log_to_file: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_file: false,
        }
    }
}

impl ClientConfig {
    /// Parses the base URL, making sure it ends with `/` so relative paths
    /// join beneath it.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }
}
