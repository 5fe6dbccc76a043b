//! Error types for the easyDNS API client.
//!
//! # Design
//! Every variant is fatal for the invocation. The client returns them to
//! the caller instead of exiting, and each carries the context needed for a
//! single diagnostic line (URL, status, provider code).

use thiserror::Error;

/// Errors returned by `ApiClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received: connection refused, DNS failure, timeout.
    #[error("easydns API call failed: {detail} (url: {url})")]
    Transport { url: String, detail: String },

    /// A response arrived but its body is not JSON.
    #[error("easydns API call returned undecodable body: {body} (status: {status}, url: {url})")]
    Decode {
        url: String,
        status: u16,
        body: String,
    },

    /// The provider answered with an `error` envelope.
    #[error("easydns API call returned error: {message} (code: {code}, url: {url})")]
    Api {
        url: String,
        message: String,
        code: String,
    },

    /// Update requested for a hostname with no existing record.
    #[error("hostname {hostname}.{domain} does not exist (searched {searched} records)")]
    NotFound {
        hostname: String,
        domain: String,
        searched: usize,
    },

    /// A request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Short name of the failure class, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "transport",
            ApiError::Decode { .. } => "decode",
            ApiError::Api { .. } => "api",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Serialization(_) => "serialization",
        }
    }
}
