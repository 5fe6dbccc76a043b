use std::process::ExitCode;
use std::time::Instant;

use easydns_cli::{args, CliError, Command, Invocation};
use easydns_core::ApiError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), CliError> {
    let args = match args::parse(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", args::USAGE);
            return Ok(());
        }
        Command::Version => {
            println!("easydns {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Run(args) => args,
    };

    let invocation = Invocation::prepare(args)?;
    let started = Instant::now();
    let result = invocation.execute(&invocation.client());
    tracing::info!("completed in {:.2} seconds", started.elapsed().as_secs_f64());
    result.map(|_| ())
}

/// Log one diagnostic line for `err`, with its context fields.
fn report(err: &CliError) {
    match err {
        CliError::Api(ApiError::Transport { url, detail }) => {
            tracing::error!(kind = err.kind(), %url, "easydns API call failed: {detail}");
        }
        CliError::Api(ApiError::Decode { url, status, body }) => {
            tracing::error!(kind = err.kind(), %url, status, "undecodable response: {body}");
        }
        CliError::Api(ApiError::Api { url, message, code }) => {
            tracing::error!(kind = err.kind(), %url, %code, "easydns API call returned error: {message}");
        }
        CliError::Usage(_) => {
            tracing::error!(kind = err.kind(), "{err}");
            eprintln!("{}", args::USAGE);
        }
        _ => tracing::error!(kind = err.kind(), "{err}"),
    }
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}
