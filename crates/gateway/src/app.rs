//! Application state and router assembly.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use voxgate_ca::{CaClient, CaError};
use voxgate_config::Config;

use crate::handlers;
use crate::response::ApiError;

/// Shared application state.
///
/// The CA client is stateless, so one instance is shared across all
/// requests. `None` means the CA integration is disabled in configuration.
#[derive(Clone)]
pub struct AppState {
    ca: Option<Arc<CaClient>>,
}

impl AppState {
    /// Construct the state from configuration, building the CA client (and
    /// its TLS context) once.
    pub fn from_config(config: &Config) -> Result<Self, CaError> {
        let ca = if config.ca.enabled {
            Some(Arc::new(CaClient::new(&config.ca)?))
        } else {
            None
        };
        Ok(Self { ca })
    }

    pub fn ca_enabled(&self) -> bool {
        self.ca.is_some()
    }

    pub(crate) fn ca(&self) -> Result<&CaClient, ApiError> {
        self.ca.as_deref().ok_or_else(|| {
            ApiError::ServiceUnavailable("Puppet CA not configured".to_string())
        })
    }
}

/// Assemble the gateway router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/meta", get(handlers::meta))
        .route("/api/v1/ca/status", post(handlers::query_certificate_statuses))
        .route("/api/v1/ca/status/{name}/sign", post(handlers::sign_certificate))
        .route("/api/v1/ca/status/{name}/revoke", post(handlers::revoke_certificate))
        .route("/api/v1/ca/status/{name}", delete(handlers::clean_certificate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
