//! File loading and precedence merging for rosh configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use super::types::{ConfigError, FileConfig, InputMode, Overrides, Settings};
use crate::constants::{DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT};

impl FileConfig {
    /// Reads and parses a TOML config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config file.
    ///
    /// An explicit path must exist. The default path is optional: when it is
    /// absent an empty config is returned.
    pub fn load(explicit: Option<&Path>, default_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_path(path);
        }
        match default_path {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading config");
                Self::from_path(path)
            }
            _ => Ok(Self::default()),
        }
    }
}

impl Settings {
    /// Resolve settings with precedence: overrides > config file > defaults.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self, ConfigError> {
        let host = overrides
            .host
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = overrides.port.or(file.port).unwrap_or(DEFAULT_PORT);
        let model = overrides
            .model
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let host = host.trim().to_string();
        if host.is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if port == 0 {
            return Err(ConfigError::InvalidPort(port));
        }
        if model.trim().is_empty() {
            return Err(ConfigError::MissingModel);
        }

        let multiline = overrides.multiline.or(file.multiline).unwrap_or(true);
        let settings = Settings {
            host,
            port,
            model,
            transcript: overrides
                .transcript
                .or(file.transcript)
                .filter(|p| !p.as_os_str().is_empty()),
            streaming: overrides.stream.or(file.stream).unwrap_or(true),
            input_mode: if multiline {
                InputMode::MultiLine
            } else {
                InputMode::SingleLine
            },
            timeout: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        };
        debug!(?settings, "resolved settings");
        Ok(settings)
    }

    /// The generation endpoint URL.
    pub fn address(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.host,
            self.port,
            crate::constants::GENERATE_PATH
        )
    }
}
