//! One-shot HTTP transport to the CA service.
//!
//! Performs a single request/response cycle against the configured CA base
//! address. TLS is wired up from configuration at construction time: opt-in
//! insecure mode, an optional custom trust-root bundle, and an optional
//! client certificate/key pair for mutual TLS. The reqwest client is built
//! once and reused across calls.

use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use voxgate_config::CaConfig;

use crate::error::CaError;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

#[derive(Debug)]
pub(crate) struct CaTransport {
    client: reqwest::Client,
    base_address: String,
}

impl CaTransport {
    /// Build the transport, constructing the TLS context from configuration.
    pub(crate) fn new(config: &CaConfig) -> Result<Self, CaError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if config.tls {
            if config.tls_insecure {
                warn!(
                    address = %config.address,
                    "SECURITY WARNING: TLS certificate verification disabled for CA connection"
                );
                builder = builder.danger_accept_invalid_certs(true);
            }

            if let Some(path) = &config.tls_ca_bundle {
                let pem = read_pem(path, "CA trust bundle")?;
                let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| CaError::Tls {
                    message: format!("Failed to parse CA trust bundle {}", path.display()),
                    source: Some(Box::new(e)),
                })?;
                builder = builder.add_root_certificate(cert);
                debug!(path = %path.display(), "Using custom trust roots for CA connection");
            }

            if let (Some(cert_path), Some(key_path)) =
                (&config.tls_client_cert, &config.tls_client_key)
            {
                let mut identity_pem = read_pem(cert_path, "client certificate")?;
                identity_pem.push(b'\n');
                identity_pem.extend_from_slice(&read_pem(key_path, "client key")?);

                let identity =
                    reqwest::Identity::from_pem(&identity_pem).map_err(|e| CaError::Tls {
                        message: format!(
                            "Failed to parse client certificate/key pair ({}, {})",
                            cert_path.display(),
                            key_path.display()
                        ),
                        source: Some(Box::new(e)),
                    })?;
                builder = builder.identity(identity);
                debug!(cert = %cert_path.display(), "Using client certificate for mutual TLS to CA");
            }
        }

        Ok(Self {
            client: builder.build()?,
            base_address: config.address.trim_end_matches('/').to_string(),
        })
    }

    /// Perform one request/response cycle and decode the body on a 200.
    ///
    /// Any other status code is returned as-is with no decode attempt; the
    /// caller interprets it. Transport failures are not retried.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        payload: Option<&serde_json::Value>,
    ) -> Result<(StatusCode, Option<T>), CaError> {
        let (status, body) = self.dispatch(method, endpoint, query, payload).await?;
        if status == StatusCode::OK {
            let decoded = serde_json::from_slice(&body)?;
            Ok((status, Some(decoded)))
        } else {
            Ok((status, None))
        }
    }

    /// Perform one request/response cycle, ignoring the response body.
    pub(crate) async fn send(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<StatusCode, CaError> {
        let (status, _) = self.dispatch(method, endpoint, &[], payload).await?;
        Ok(status)
    }

    async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        payload: Option<&serde_json::Value>,
    ) -> Result<(StatusCode, bytes::Bytes), CaError> {
        let uri = format!("{}/{}", self.base_address, endpoint);

        let mut request = self
            .client
            .request(method.clone(), &uri)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        if !query.is_empty() {
            request = request.query(query);
        }

        match payload {
            Some(payload) => {
                debug!(method = %method, uri = %uri, payload = %payload, "Dispatching CA request");
                request = request.body(serde_json::to_vec(payload)?);
            }
            None => {
                debug!(method = %method, uri = %uri, "Dispatching CA request");
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body))
    }
}

fn read_pem(path: &Path, what: &str) -> Result<Vec<u8>, CaError> {
    std::fs::read(path).map_err(|e| CaError::Tls {
        message: format!("Failed to read {} from {}", what, path.display()),
        source: Some(Box::new(e)),
    })
}
