//! Hostname and address checks applied before any API call.

use std::net::Ipv4Addr;

use crate::error::CliError;

/// Lowercase `raw` and require `^[a-z][a-z0-9]*$`. Dots are rejected, so
/// only the short host label is accepted, never a fully qualified name.
pub fn hostname(raw: &str) -> Result<String, CliError> {
    let hostname = raw.to_lowercase();
    let mut chars = hostname.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !valid {
        return Err(CliError::Validation(format!(
            "invalid hostname specified: {raw}"
        )));
    }
    Ok(hostname)
}

/// Require four dot-separated integers, each in 0..=255.
pub fn address(raw: &str) -> Result<Ipv4Addr, CliError> {
    let invalid = || CliError::Validation(format!("invalid ip address specified: {raw}"));

    let octets = raw
        .split('.')
        .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<Vec<u8>, _>>()?;
    let [a, b, c, d] = octets[..] else {
        return Err(invalid());
    };
    Ok(Ipv4Addr::new(a, b, c, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_is_lowercased() {
        assert_eq!(hostname("WWW").unwrap(), "www");
        assert_eq!(hostname("Node7").unwrap(), "node7");
    }

    #[test]
    fn hostname_rejects_bad_shapes() {
        for bad in ["", "7up", "www.example", "my-host", "under_score", "ünï"] {
            assert!(
                matches!(hostname(bad), Err(CliError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn address_accepts_dotted_quad() {
        assert_eq!(address("1.2.3.4").unwrap(), Ipv4Addr::new(1, 2, 3, 4));
        assert_eq!(address("0.0.0.0").unwrap(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(address("255.255.255.255").unwrap(), Ipv4Addr::BROADCAST);
        assert_eq!(address("010.1.1.1").unwrap(), Ipv4Addr::new(10, 1, 1, 1));
    }

    #[test]
    fn address_rejects_out_of_range_and_malformed() {
        for bad in ["999.1.1.1", "1.2.3", "1.2.3.4.5", "a.b.c.d", "1..2.3", "-1.2.3.4", ""] {
            assert!(
                matches!(address(bad), Err(CliError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
