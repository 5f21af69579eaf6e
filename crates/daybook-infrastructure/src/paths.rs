//! Path management for Daybook's local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/daybook/           # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── credentials.toml         # Access token and login email (0600)
//! ```

use daybook_core::error::{DaybookError, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "daybook";

pub struct DaybookPaths;

impl DaybookPaths {
    /// Returns the Daybook configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| DaybookError::config("Cannot find config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn credentials_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("credentials.toml"))
    }
}
