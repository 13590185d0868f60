//! Error types for CA operations.

use thiserror::Error;

/// Errors that can occur while talking to the upstream CA.
///
/// None of these are retried; every failure is terminal for the request that
/// triggered it and is surfaced to the caller.
#[derive(Debug, Error)]
pub enum CaError {
    /// Network, DNS or TLS handshake failure on the outbound request
    #[error("CA transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The CA returned a 200 with a body that failed to decode
    #[error("Failed to decode CA response: {0}")]
    Decode(#[from] serde_json::Error),

    /// TLS client configuration could not be constructed
    #[error("TLS configuration error: {message}")]
    Tls {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Clean was requested for a certificate the CA does not know
    #[error("Certificate '{name}' not found")]
    NotFound { name: String },

    /// Clean was requested for a certificate in a state with no clean path
    #[error("Certificate '{name}' is in state '{state}', cannot clean")]
    InvalidState { name: String, state: String },

    /// The CA answered a write operation with a status outside the accepted set
    #[error("Unexpected status code {status} from CA during {operation}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
    },
}

impl CaError {
    /// Status code carried by an [`CaError::UnexpectedStatus`], if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            CaError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
