//! Configuration file loading.
//!
//! # Design
//! The file is a JSON object with the connection parameters plus an
//! optional transport `timeout`. It is parsed into `FileConfig`, checked,
//! then split into the immutable `Config` the client needs and the
//! settings that belong to the transport.

use std::path::Path;
use std::time::Duration;

use easydns_core::{Config, ResponseFormat};
use serde::Deserialize;

use crate::error::CliError;

const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Raw contents of the configuration file. `delay` and `timeout` are in
/// seconds and may be fractional.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    pub token: String,
    pub key: String,
    pub endpoint: String,
    pub format: ResponseFormat,
    pub delay: f64,
    pub ttl: u32,
    pub domain: String,
    #[serde(default = "default_timeout")]
    pub timeout: f64,
}

fn default_timeout() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

/// Everything a run needs from the configuration file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub timeout: Duration,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, CliError> {
        serde_json::from_str(text).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn into_settings(self) -> Result<Settings, CliError> {
        for (name, value) in [
            ("domain", &self.domain),
            ("token", &self.token),
            ("key", &self.key),
        ] {
            if value.trim().is_empty() {
                return Err(CliError::Config(format!("{name} must not be empty")));
            }
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(CliError::Config(format!(
                "endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        if self.ttl == 0 {
            return Err(CliError::Config("ttl must be positive".to_string()));
        }
        let delay = seconds("delay", self.delay, true)?;
        let timeout = seconds("timeout", self.timeout, false)?;

        Ok(Settings {
            config: Config::new(
                &self.domain,
                &self.token,
                &self.key,
                &self.endpoint,
                self.format,
                delay,
                self.ttl,
            ),
            timeout,
        })
    }
}

fn seconds(name: &str, value: f64, allow_zero: bool) -> Result<Duration, CliError> {
    let in_range = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if !in_range {
        return Err(CliError::Config(format!("{name} out of range: {value}")));
    }
    Duration::try_from_secs_f64(value)
        .map_err(|e| CliError::Config(format!("{name} out of range: {e}")))
}

/// Read and check the configuration file at `path`.
pub fn load(path: &Path) -> Result<Settings, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    FileConfig::parse(&text)
        .and_then(FileConfig::into_settings)
        .map_err(|e| match e {
            CliError::Config(reason) => CliError::Config(format!("{}: {reason}", path.display())),
            other => other,
        })
}
