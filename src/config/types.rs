//! Struct definitions for rosh configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Settings read from `config.toml`.
///
/// Every key is optional; anything left unset falls through to the
/// built-in defaults.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    /// Server host name or IP address.
    pub host: Option<String>,
    /// Server port.
    pub port: Option<u16>,
    /// Model identifier (e.g. `"llama3.2"`).
    pub model: Option<String>,
    /// Path of the transcript file.
    pub transcript: Option<PathBuf>,
    /// Whether responses are streamed.
    pub stream: Option<bool>,
    /// Whether prompts span multiple lines.
    pub multiline: Option<bool>,
    /// Deadline for a whole request, in seconds.
    pub timeout_secs: Option<u64>,
}

/// Values taken from command-line flags and environment variables.
///
/// Each field wins over the config file when set.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
    pub transcript: Option<PathBuf>,
    pub stream: Option<bool>,
    pub multiline: Option<bool>,
    pub timeout_secs: Option<u64>,
}

/// How prompt input is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Every line is a prompt.
    SingleLine,
    /// Lines are collected until two consecutive blank lines.
    MultiLine,
}

/// Fully resolved settings, built once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub transcript: Option<PathBuf>,
    pub streaming: bool,
    pub input_mode: InputMode,
    pub timeout: Option<Duration>,
}

/// Configuration failures detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("server host is empty (set --ip, ROSH_HOST or `host` in the config file)")]
    MissingHost,

    #[error("invalid server port: {0}")]
    InvalidPort(u16),

    #[error("model name is empty")]
    MissingModel,

    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
