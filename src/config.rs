//! Environment configuration

use crate::runtime::DEFAULT_IDLE_TIMEOUT;
use crate::state_machine::state::DEFAULT_REPLY_DELAY;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_UI_DIR: &str = "ui";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Simulated "thinking" time before each reply
    pub reply_delay: Duration,
    /// Conversations with no open stream for this long are dropped
    pub idle_timeout: Duration,
    /// Filesystem fallback for assets not embedded in the binary
    pub ui_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            reply_delay: DEFAULT_REPLY_DELAY,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            ui_dir: PathBuf::from(DEFAULT_UI_DIR),
        }
    }
}

impl AppConfig {
    /// Read `LEARNPATH_*` variables, falling back to defaults for anything
    /// missing or malformed
    pub fn from_env() -> Self {
        let (config, errors) = Self::from_lookup(|name| std::env::var(name).ok());
        for error in errors {
            tracing::warn!(%error, "Ignoring invalid configuration value");
        }
        config
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        match parse_var::<u16>(&lookup, "LEARNPATH_PORT") {
            Ok(Some(port)) => config.port = port,
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        match parse_var::<u64>(&lookup, "LEARNPATH_REPLY_DELAY_MS") {
            Ok(Some(ms)) => config.reply_delay = Duration::from_millis(ms),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        match parse_var::<u64>(&lookup, "LEARNPATH_IDLE_TIMEOUT_MS") {
            Ok(Some(ms)) => config.idle_timeout = Duration::from_millis(ms),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        if let Some(dir) = lookup("LEARNPATH_UI_DIR") {
            config.ui_dir = PathBuf::from(dir);
        }

        (config, errors)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { name, value }),
    }
}
