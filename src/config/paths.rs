//! XDG path resolution for rosh configuration and cache directories.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Settings;

impl Settings {
    /// Returns the platform-specific configuration directory for rosh.
    ///
    /// Returns `~/.config/rosh/` on Linux (`XDG_CONFIG_HOME/rosh`).
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the platform-specific cache directory for rosh.
    ///
    /// Used for the readline history file.
    pub fn cache_dir() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the default config file path (`~/.config/rosh/config.toml` on Linux).
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(crate::constants::CONFIG_FILENAME))
    }

    /// Returns the readline history path.
    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::cache_dir()?.join(crate::constants::HISTORY_FILENAME))
    }
}
