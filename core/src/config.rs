//! Connection parameters for the easyDNS API.
//!
//! # Design
//! `Config` is built once per invocation from already-validated values and
//! handed to `ApiClient::new` by value. It is never mutated afterwards and
//! there is no process-wide copy of it.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Response format requested through the `format` query parameter.
///
/// Only JSON is decodable by the client, so it is the only variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable connection parameters.
#[derive(Debug, Clone)]
pub struct Config {
    domain: String,
    token: String,
    key: String,
    endpoint: String,
    format: ResponseFormat,
    delay: Duration,
    ttl: u32,
}

impl Config {
    /// Stores every field as given. A trailing `/` on `endpoint` is dropped
    /// so URL templates can always prepend it.
    pub fn new(
        domain: &str,
        token: &str,
        key: &str,
        endpoint: &str,
        format: ResponseFormat,
        delay: Duration,
        ttl: u32,
    ) -> Self {
        Self {
            domain: domain.to_string(),
            token: token.to_string(),
            key: key.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            format,
            delay,
            ttl,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_stored_as_given() {
        let config = Config::new(
            "example.com",
            "tok",
            "sekret",
            "https://rest.easydns.net",
            ResponseFormat::Json,
            Duration::from_millis(250),
            300,
        );
        assert_eq!(config.domain(), "example.com");
        assert_eq!(config.token(), "tok");
        assert_eq!(config.key(), "sekret");
        assert_eq!(config.endpoint(), "https://rest.easydns.net");
        assert_eq!(config.format(), ResponseFormat::Json);
        assert_eq!(config.delay(), Duration::from_millis(250));
        assert_eq!(config.ttl(), 300);
    }

    #[test]
    fn trailing_slash_is_stripped_from_endpoint() {
        let config = Config::new(
            "example.com",
            "tok",
            "sekret",
            "https://rest.easydns.net/",
            ResponseFormat::Json,
            Duration::ZERO,
            300,
        );
        assert_eq!(config.endpoint(), "https://rest.easydns.net");
    }

    #[test]
    fn format_parses_lowercase_json() {
        let format: ResponseFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(format, ResponseFormat::Json);
        assert_eq!(format.to_string(), "json");
        assert!(serde_json::from_str::<ResponseFormat>(r#""xml""#).is_err());
    }
}
