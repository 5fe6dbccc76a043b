//! Errors surfaced by the command-line front end.

use easydns_core::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or conflicting command-line options.
    #[error("{0}")]
    Usage(String),

    /// The configuration file is missing, unreadable, or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Hostname or address failed validation.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CliError {
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "usage",
            CliError::Config(_) => "config",
            CliError::Validation(_) => "validation",
            CliError::Api(err) => err.kind(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}
