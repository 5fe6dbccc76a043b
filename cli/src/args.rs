//! Command-line option parsing.

use std::path::PathBuf;

use crate::error::CliError;

pub const USAGE: &str = "\
A command-line tool for managing (create/update) easyDNS A records.

Usage: easydns -f <FILE> (-c | -u) -H <HOSTNAME> -a <IPADDR> [--verify]

Options:
  -f, --file <FILE>          configuration file containing easyDNS API details
  -c, --create               create new record
  -u, --update               update existing record to new IP address
  -H, --hostname <HOSTNAME>  short hostname without the domain part, e.g. www
  -a, --address <IPADDR>     IPv4 address for the hostname
      --verify               check the API token and key before the change
  -h, --help                 print this help
  -V, --version              print version";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Options for a create or update run, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config_path: PathBuf,
    pub mode: Mode,
    pub hostname: String,
    pub address: String,
    pub verify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

/// Parse options, excluding the program name.
///
/// Values may be given as `-f path`, `--file path` or `--file=path`.
pub fn parse<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut create = false;
    let mut update = false;
    let mut hostname = None;
    let mut address = None;
    let mut verify = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| CliError::Usage(format!("option {name} requires a value")))
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-f" | "--file" => config_path = Some(PathBuf::from(value("--file")?)),
            "-H" | "--hostname" => hostname = Some(value("--hostname")?),
            "-a" | "--address" => address = Some(value("--address")?),
            "-c" | "--create" => create = true,
            "-u" | "--update" => update = true,
            "--verify" => verify = true,
            other => return Err(CliError::Usage(format!("unrecognized option: {other}"))),
        }
    }

    let config_path =
        config_path.ok_or_else(|| CliError::Usage("configuration file missing".to_string()))?;
    let mode = match (create, update) {
        (true, true) => {
            return Err(CliError::Usage(
                "options --create and --update cannot be specified together".to_string(),
            ))
        }
        (true, false) => Mode::Create,
        (false, true) => Mode::Update,
        (false, false) => {
            return Err(CliError::Usage(
                "option --create or --update must be specified".to_string(),
            ))
        }
    };
    let (Some(hostname), Some(address)) = (hostname, address) else {
        return Err(CliError::Usage(
            "both option --hostname and --address must be specified".to_string(),
        ));
    };

    Ok(Command::Run(Args {
        config_path,
        mode,
        hostname,
        address,
        verify,
    }))
}
