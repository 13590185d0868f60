//! Configuration validation functions.
//!
//! Field-level validators plus cross-field checks that serde alone cannot
//! express (mTLS cert/key pairing, TLS option gating).

use std::borrow::Cow;
use std::net::SocketAddr;

use url::Url;
use validator::ValidationError;

use crate::ca::CaConfig;

/// Validate socket address format.
pub fn validate_socket_addr(addr: &str) -> Result<(), ValidationError> {
    addr.parse::<SocketAddr>().map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("invalid_socket_address");
        err.message = Some(Cow::Owned(format!(
            "Invalid socket address '{}'. Expected format: IP:PORT (e.g., '127.0.0.1:8080')",
            addr
        )));
        err
    })
}

/// Cross-field validation for the CA section.
pub fn validate_ca_config(config: &CaConfig) -> Result<(), ValidationError> {
    if config.enabled {
        let url = Url::parse(&config.address).map_err(|_| {
            field_error(
                "invalid_ca_address",
                format!("Invalid CA address '{}': expected an absolute URL", config.address),
            )
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(field_error(
                "invalid_ca_address",
                format!("CA address scheme must be http or https, got '{}'", url.scheme()),
            ));
        }
    }

    match (&config.tls_client_cert, &config.tls_client_key) {
        (Some(_), None) | (None, Some(_)) => {
            return Err(field_error(
                "incomplete_client_identity",
                "tls_client_cert and tls_client_key must be configured together",
            ));
        }
        _ => {}
    }

    if !config.tls
        && (config.tls_insecure
            || config.tls_ca_bundle.is_some()
            || config.tls_client_cert.is_some())
    {
        return Err(field_error(
            "tls_options_without_tls",
            "TLS options require tls = true",
        ));
    }

    Ok(())
}

fn field_error(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message.into()));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_accepts_ipv4_and_ipv6() {
        assert!(validate_socket_addr("0.0.0.0:8080").is_ok());
        assert!(validate_socket_addr("[::1]:8080").is_ok());
        assert!(validate_socket_addr("localhost:8080").is_err());
        assert!(validate_socket_addr("127.0.0.1").is_err());
    }

    #[test]
    fn disabled_ca_skips_address_check() {
        let config = CaConfig::default();
        assert!(validate_ca_config(&config).is_ok());
    }
}
