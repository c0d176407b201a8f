//! Health probe endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::warn;

use crate::http::errors::ApiError;
use crate::state::ApiState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
}

/// Round-trip a warehouse liveness probe.
pub(crate) async fn health(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    match state.store.ping().await {
        Ok(()) => Ok(Json(HealthResponse { status: "ok" })),
        Err(error) => {
            warn!(error = %error, "health probe failed");
            Err(ApiError::unavailable("warehouse unreachable"))
        }
    }
}
