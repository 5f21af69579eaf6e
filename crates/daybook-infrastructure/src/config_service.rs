//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `~/.config/daybook/config.toml` and applies
//! environment overrides.

use crate::paths::DaybookPaths;
use daybook_core::config::ClientConfig;
use daybook_core::error::{DaybookError, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding `api_base_url`.
pub const API_BASE_URL_ENV: &str = "DAYBOOK_API_BASE_URL";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the default config file location.
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(DaybookPaths::config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration with `DAYBOOK_API_BASE_URL` applied.
    pub fn load(&self) -> Result<ClientConfig> {
        let override_url = std::env::var(API_BASE_URL_ENV).ok();
        self.load_with_override(override_url.as_deref())
    }

    /// Loads the file (defaults when missing) and applies `base_url_override`
    /// when it is non-empty.
    pub fn load_with_override(&self, base_url_override: Option<&str>) -> Result<ClientConfig> {
        let mut config = self.load_file()?;

        if let Some(url) = base_url_override.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("[ConfigService] Using {} override", API_BASE_URL_ENV);
            config = config.with_api_base_url(url);
        } else {
            let url = config.api_base_url.clone();
            config = config.with_api_base_url(url);
        }

        Ok(config)
    }

    /// Loads the configuration and requires a base URL to be set.
    ///
    /// A non-blank `base_url_override` wins over `DAYBOOK_API_BASE_URL`,
    /// which wins over the file.
    pub fn load_required(&self, base_url_override: Option<&str>) -> Result<ClientConfig> {
        let config = match base_url_override.filter(|u| !u.trim().is_empty()) {
            Some(url) => self.load_with_override(Some(url))?,
            None => self.load()?,
        };
        if !config.has_api_base_url() {
            return Err(DaybookError::config(format!(
                "Missing API base URL: set api_base_url in {:?} or {}",
                self.path, API_BASE_URL_ENV
            )));
        }
        Ok(config)
    }

    fn load_file(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", self.path);
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }
        Ok(toml::from_str(&content)?)
    }
}
