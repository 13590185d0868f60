//! Request handlers for the CA facade.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::info;

use voxgate_ca::{CertificateStatus, CertificateStatusQuery};

use crate::app::AppState;
use crate::response::{ApiData, ApiError};

#[derive(Serialize)]
pub struct CertificateStatusResponse {
    pub certificate_statuses: Vec<CertificateStatus>,
}

/// API metadata for the front-end; key casing is pinned by the UI client.
#[derive(Serialize)]
pub struct ApiMeta {
    #[serde(rename = "CaEnabled")]
    pub ca_enabled: bool,
    #[serde(rename = "Version")]
    pub version: &'static str,
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// `GET /api/v1/meta`
pub async fn meta(State(state): State<AppState>) -> ApiData<ApiMeta> {
    ApiData(ApiMeta {
        ca_enabled: state.ca_enabled(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /api/v1/ca/status` — list certificates, optionally by state and
/// free-text filter.
pub async fn query_certificate_statuses(
    State(state): State<AppState>,
    payload: Result<Json<CertificateStatusQuery>, JsonRejection>,
) -> Result<ApiData<CertificateStatusResponse>, ApiError> {
    let Json(query) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let statuses = state.ca()?.query(&query).await?;
    Ok(ApiData(CertificateStatusResponse {
        certificate_statuses: statuses,
    }))
}

/// `POST /api/v1/ca/status/{name}/sign`
pub async fn sign_certificate(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiData<()>, ApiError> {
    state.ca()?.sign(&name).await?;
    info!(certificate = %name, "Signed via API");
    Ok(ApiData(()))
}

/// `POST /api/v1/ca/status/{name}/revoke`
pub async fn revoke_certificate(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiData<()>, ApiError> {
    state.ca()?.revoke(&name).await?;
    info!(certificate = %name, "Revoked via API");
    Ok(ApiData(()))
}

/// `DELETE /api/v1/ca/status/{name}`
pub async fn clean_certificate(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiData<()>, ApiError> {
    state.ca()?.clean(&name).await?;
    info!(certificate = %name, "Cleaned via API");
    Ok(ApiData(()))
}
