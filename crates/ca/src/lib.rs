//! Client for the Puppet/OpenVox CA REST API.
//!
//! This crate implements the certificate lifecycle operations the gateway
//! forwards to the CA service:
//!
//! - [`model`]: certificate status wire model and query types
//! - [`transport`]: one-shot HTTPS request/response cycle, optional mutual TLS
//! - [`client`]: lifecycle operations (list, get, sign, revoke, clean)
//! - [`filter`]: free-text filtering over status listings
//! - [`error`]: the error taxonomy; every failure is terminal, nothing retries

pub mod client;
pub mod error;
pub mod filter;
pub mod model;
mod transport;

pub use client::CaClient;
pub use error::CaError;
pub use model::{CertificateState, CertificateStatus, CertificateStatusQuery};
