//! Cross-origin policy and middleware.
//!
//! The browser client runs on a different origin than the API, so every
//! response to an allowed origin carries the full CORS header set and
//! preflight `OPTIONS` requests short-circuit with `204 No Content` before
//! reaching any handler.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::ApiState;

const ALLOWED_METHODS: &str = "POST, GET, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Connect-Protocol-Version, Connect-Timeout-Ms";
const EXPOSED_HEADERS: &str = "Connect-Protocol-Version, Connect-Timeout-Ms";
const MAX_AGE_SECONDS: &str = "7200";

/// Origin allow-list for cross-origin requests.
///
/// The allowed origin is always echoed back verbatim; a configured `*` entry
/// allows any origin but never appears in a response header itself.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: Vec<String>,
}

impl CorsPolicy {
    /// Build a policy from configured origins. Entries are trimmed; a `*`
    /// entry allows any origin.
    #[must_use]
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            origins: origins
                .into_iter()
                .map(|origin| origin.trim().to_string())
                .collect(),
        }
    }

    /// Whether the given request origin is allowed.
    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        self.origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }
}

/// Middleware applying the CORS policy around every route.
pub(crate) async fn apply_cors(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Response {
    let allowed_origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .filter(|origin| state.cors.allows(origin));

    // Preflight requests never reach the handlers.
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        if let Some(origin) = allowed_origin.as_deref() {
            insert_cors_headers(response.headers_mut(), origin);
        }
        return response;
    }

    let mut response = next.run(request).await;
    if let Some(origin) = allowed_origin.as_deref() {
        insert_cors_headers(response.headers_mut(), origin);
    }
    response
}

fn insert_cors_headers(headers: &mut HeaderMap, origin: &str) {
    let Ok(origin) = HeaderValue::from_str(origin) else {
        return;
    };
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE_SECONDS),
    );
}
