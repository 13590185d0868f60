//! Certificate lifecycle client.
//!
//! Orchestrates calls to the CA's `puppet-ca/v1` API. The client holds only
//! configuration-derived state (the transport); it is cheap to share and has
//! no interior mutability. All configuration is injected at construction.

use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::{debug, error, info, warn};

use voxgate_config::CaConfig;

use crate::error::CaError;
use crate::filter;
use crate::model::{CertificateState, CertificateStatus, CertificateStatusQuery};
use crate::transport::CaTransport;

const STATUSES_ENDPOINT: &str = "puppet-ca/v1/certificate_statuses/all";
const CLEAN_ENDPOINT: &str = "puppet-ca/v1/clean";

fn status_endpoint(name: &str) -> String {
    format!("puppet-ca/v1/certificate_status/{}", name)
}

/// Client for certificate lifecycle operations against the upstream CA.
#[derive(Debug)]
pub struct CaClient {
    transport: CaTransport,
}

impl CaClient {
    /// Build a client from configuration.
    ///
    /// Fails if the TLS context cannot be constructed (unreadable or
    /// malformed PEM material).
    pub fn new(config: &CaConfig) -> Result<Self, CaError> {
        Ok(Self {
            transport: CaTransport::new(config)?,
        })
    }

    /// List certificate statuses, optionally restricted to one state.
    pub async fn list(
        &self,
        state: Option<&CertificateState>,
    ) -> Result<Vec<CertificateStatus>, CaError> {
        let state_value = state.map(|s| s.to_string());
        let query: Vec<(&str, &str)> = match state_value.as_deref() {
            Some(s) => vec![("state", s)],
            None => vec![],
        };

        let (status, body) = self
            .transport
            .call::<Vec<CertificateStatus>>(Method::GET, STATUSES_ENDPOINT, &query, None)
            .await?;

        match status {
            StatusCode::OK => Ok(body.unwrap_or_default()),
            other => {
                warn!(status = other.as_u16(), "CA returned unexpected status for listing");
                Err(CaError::UnexpectedStatus {
                    operation: "list",
                    status: other.as_u16(),
                })
            }
        }
    }

    /// Look up a single certificate by name.
    ///
    /// Returns `None` for any non-200 response that is not itself a
    /// transport failure; the CA answers 404 for unknown certnames.
    pub async fn get(&self, name: &str) -> Result<Option<CertificateStatus>, CaError> {
        let (status, body) = self
            .transport
            .call::<CertificateStatus>(Method::GET, &status_endpoint(name), &[], None)
            .await?;

        match status {
            StatusCode::OK => Ok(body),
            other => {
                debug!(certificate = %name, status = other.as_u16(), "Certificate lookup miss");
                Ok(None)
            }
        }
    }

    /// Sign a pending certificate request.
    pub async fn sign(&self, name: &str) -> Result<(), CaError> {
        self.set_desired_state(name, CertificateState::Signed, "sign")
            .await
    }

    /// Revoke a signed certificate.
    pub async fn revoke(&self, name: &str) -> Result<(), CaError> {
        self.set_desired_state(name, CertificateState::Revoked, "revoke")
            .await
    }

    /// Remove a certificate from the CA entirely.
    ///
    /// The endpoint depends on the certificate's current state, so this is a
    /// read-before-write: a race with a concurrent external state change is
    /// an accepted limitation.
    ///
    /// - `signed` certificates go through the bulk `clean` endpoint, which
    ///   revokes and deletes in one step server-side.
    /// - `requested` and `revoked` certificates have no signed material to
    ///   revoke and are deleted directly.
    /// - anything else is refused with [`CaError::InvalidState`].
    pub async fn clean(&self, name: &str) -> Result<(), CaError> {
        let current = self.get(name).await.map_err(|err| {
            error!(certificate = %name, error = %err, "Failed to fetch certificate state for clean");
            err
        })?;

        let Some(current) = current else {
            warn!(certificate = %name, "Certificate not found, cannot clean");
            return Err(CaError::NotFound {
                name: name.to_string(),
            });
        };

        let status = match current.state {
            CertificateState::Signed => {
                let payload = json!({ "certnames": [name] });
                self.transport
                    .send(Method::PUT, CLEAN_ENDPOINT, Some(&payload))
                    .await
            }
            CertificateState::Requested | CertificateState::Revoked => {
                self.transport
                    .send(Method::DELETE, &status_endpoint(name), None)
                    .await
            }
            CertificateState::Other(state) => {
                warn!(certificate = %name, state = %state, "Certificate state has no clean path");
                return Err(CaError::InvalidState {
                    name: name.to_string(),
                    state,
                });
            }
        }
        .map_err(|err| {
            error!(certificate = %name, error = %err, "Failed to clean certificate");
            err
        })?;

        match status {
            StatusCode::OK | StatusCode::NO_CONTENT => {
                info!(certificate = %name, "Certificate cleaned");
                Ok(())
            }
            other => {
                error!(
                    certificate = %name,
                    status = other.as_u16(),
                    "Unexpected status code while cleaning certificate"
                );
                Err(CaError::UnexpectedStatus {
                    operation: "clean",
                    status: other.as_u16(),
                })
            }
        }
    }

    /// Run a status query: list the requested states sequentially, in order,
    /// concatenate without deduplication, then apply the free-text filter.
    pub async fn query(
        &self,
        query: &CertificateStatusQuery,
    ) -> Result<Vec<CertificateStatus>, CaError> {
        let results = match &query.states {
            Some(states) => {
                let mut all = Vec::new();
                for state in states {
                    all.extend(self.list(Some(state)).await?);
                }
                all
            }
            None => self.list(None).await?,
        };

        Ok(filter::apply(results, query.filter.as_deref()))
    }

    async fn set_desired_state(
        &self,
        name: &str,
        desired: CertificateState,
        operation: &'static str,
    ) -> Result<(), CaError> {
        let payload = json!({ "desired_state": desired });

        let status = self
            .transport
            .send(Method::PUT, &status_endpoint(name), Some(&payload))
            .await
            .map_err(|err| {
                error!(certificate = %name, operation, error = %err, "Certificate write failed");
                err
            })?;

        match status {
            StatusCode::OK | StatusCode::NO_CONTENT => {
                info!(certificate = %name, operation, "Certificate state updated");
                Ok(())
            }
            other => {
                error!(
                    certificate = %name,
                    operation,
                    status = other.as_u16(),
                    "Unexpected status code from CA"
                );
                Err(CaError::UnexpectedStatus {
                    operation,
                    status: other.as_u16(),
                })
            }
        }
    }
}
