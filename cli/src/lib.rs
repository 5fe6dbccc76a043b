//! Command-line front end for `easydns-core`.
//!
//! # Overview
//! Parses options, loads the configuration file, validates the hostname
//! and address, then runs exactly one create or update through
//! `ApiClient`. Everything that can fail returns `CliError`; only `main`
//! turns an error into an exit status.

pub mod args;
pub mod error;
pub mod settings;
pub mod transport;
pub mod validate;

use std::net::Ipv4Addr;

use easydns_core::{ApiClient, ApiResponse, Transport};
use tracing::info;

pub use args::{Args, Command, Mode};
pub use error::CliError;
pub use settings::{FileConfig, Settings};
pub use transport::UreqTransport;

/// A fully checked run: configuration loaded, inputs validated.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub mode: Mode,
    pub hostname: String,
    pub address: Ipv4Addr,
    pub verify: bool,
    pub settings: Settings,
}

impl Invocation {
    /// Load the configuration file, then validate hostname and address.
    /// Nothing touches the network here.
    pub fn prepare(args: Args) -> Result<Self, CliError> {
        let settings = settings::load(&args.config_path)?;
        let hostname = validate::hostname(&args.hostname)?;
        let address = validate::address(&args.address)?;
        Ok(Self {
            mode: args.mode,
            hostname,
            address,
            verify: args.verify,
            settings,
        })
    }

    pub fn client(&self) -> ApiClient<UreqTransport> {
        ApiClient::new(
            self.settings.config.clone(),
            UreqTransport::new(self.settings.timeout),
        )
    }

    /// Run the requested operation with `client`.
    pub fn execute<T: Transport>(&self, client: &ApiClient<T>) -> Result<ApiResponse, CliError> {
        info!(
            "started (delay set to {:.2} seconds)",
            self.settings.config.delay().as_secs_f64()
        );
        if self.verify {
            client.verify_credentials()?;
        }
        let response = match self.mode {
            Mode::Create => client.create_record(&self.hostname, self.address)?,
            Mode::Update => client.update_record(&self.hostname, self.address)?,
        };
        Ok(response)
    }
}
