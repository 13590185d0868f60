//! Upstream Puppet/OpenVox CA connection settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Connection settings for the upstream CA service.
///
/// The gateway talks to the CA's REST API (`puppet-ca/v1`) over HTTP or
/// HTTPS. TLS options only take effect when `tls` is set; client certificate
/// and key must be configured together.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validation::validate_ca_config"))]
pub struct CaConfig {
    /// Whether the CA integration is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Base address of the CA service, e.g. `https://puppet.example.com:8140`
    #[serde(default)]
    pub address: String,

    /// Whether to configure TLS for the upstream connection
    #[serde(default)]
    pub tls: bool,

    /// Skip server certificate verification (DANGEROUS - opt-in only)
    #[serde(default)]
    pub tls_insecure: bool,

    /// Path to a PEM bundle with custom trust roots
    #[serde(default)]
    pub tls_ca_bundle: Option<PathBuf>,

    /// Path to a PEM client certificate for mutual TLS
    #[serde(default)]
    pub tls_client_cert: Option<PathBuf>,

    /// Path to the PEM private key matching `tls_client_cert`
    #[serde(default)]
    pub tls_client_key: Option<PathBuf>,
}

impl Default for CaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: String::new(),
            tls: false,
            tls_insecure: false,
            tls_ca_bundle: None,
            tls_client_cert: None,
            tls_client_key: None,
        }
    }
}
