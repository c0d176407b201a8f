//! Router construction and server host for the API.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Router,
    http::Request,
    middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{Span, info, warn};

use crate::http::cors::{CorsPolicy, apply_cors};
use crate::http::directory::{get_matching_schools, get_school};
use crate::http::health::health;
use crate::http::membership::{get_membership, get_membership_summary};
use crate::state::ApiState;
use crate::store::SharedStore;

/// Free-text school search route.
pub const ROUTE_GET_MATCHING_SCHOOLS: &str = "/directory.v1.DirectoryService/GetMatchingSchools";
/// Single-school directory lookup route.
pub const ROUTE_GET_SCHOOL: &str = "/directory.v1.DirectoryService/GetSchool";
/// Enrollment history route.
pub const ROUTE_GET_MEMBERSHIP: &str = "/membership.v1.MembershipService/GetMembership";
/// Single-year enrollment summary route.
pub const ROUTE_GET_MEMBERSHIP_SUMMARY: &str =
    "/membership.v1.MembershipService/GetMembershipSummary";
/// Health probe route.
pub const ROUTE_HEALTH: &str = "/health";

/// Axum router wrapper that hosts the directory and membership services.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Construct the server with its store and cross-origin policy.
    #[must_use]
    pub fn new(store: SharedStore, cors: CorsPolicy) -> Self {
        let state = Arc::new(ApiState { store, cors });
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );

        // CORS sits outermost so preflights short-circuit before routing.
        let router = Self::build_router()
            .layer(trace_layer)
            .layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                apply_cors,
            ))
            .with_state(state);

        Self { router }
    }

    fn build_router() -> Router<Arc<ApiState>> {
        Router::new()
            .route(ROUTE_HEALTH, get(health))
            .route(ROUTE_GET_MATCHING_SCHOOLS, post(get_matching_schools))
            .route(ROUTE_GET_SCHOOL, post(get_school))
            .route(ROUTE_GET_MEMBERSHIP, post(get_membership))
            .route(ROUTE_GET_MEMBERSHIP_SUMMARY, post(get_membership_summary))
    }

    /// Consume the server, yielding the underlying router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until a shutdown signal arrives, then drain in-flight requests
    /// for at most `grace` before aborting what remains.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn serve(self, addr: SocketAddr, grace: Duration) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "api server listening");

        let (drain_tx, drain_rx) = oneshot::channel();
        let server = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = drain_tx.send(());
            })
            .into_future();
        tokio::pin!(server);

        tokio::select! {
            result = &mut server => {
                info!("api server stopped");
                result.map_err(Into::into)
            }
            () = grace_elapsed(drain_rx, grace) => {
                warn!(grace_secs = grace.as_secs(), "drain grace elapsed, aborting open connections");
                Ok(())
            }
        }
    }
}

/// Resolves once the drain window after a shutdown signal has elapsed; stays
/// pending until a signal actually arrives.
async fn grace_elapsed(drain_rx: oneshot::Receiver<()>, grace: Duration) {
    if drain_rx.await.is_ok() {
        tokio::time::sleep(grace).await;
    } else {
        std::future::pending::<()>().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use schoolscope_data::{
        DataError, DataResult, Enrollment, School, SchoolSearch, SearchTerm,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::store::SchoolStore;

    #[derive(Default)]
    struct StubStore {
        search_results: Vec<SchoolSearch>,
        school: Option<School>,
        history: Vec<Enrollment>,
        summary: Option<Enrollment>,
        fail_search: bool,
        unhealthy: bool,
        search_calls: AtomicUsize,
    }

    #[async_trait]
    impl SchoolStore for StubStore {
        async fn search_schools(&self, _term: &SearchTerm) -> DataResult<Vec<SchoolSearch>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_search {
                return Err(DataError::query_failed(
                    "search_schools",
                    sqlx::Error::PoolClosed,
                ));
            }
            Ok(self.search_results.clone())
        }

        async fn get_school(
            &self,
            _ncessch: &str,
            _school_year: &str,
        ) -> DataResult<Option<School>> {
            Ok(self.school.clone())
        }

        async fn enrollment_history(&self, _ncessch: &str) -> DataResult<Vec<Enrollment>> {
            Ok(self.history.clone())
        }

        async fn enrollment_summary(
            &self,
            _ncessch: &str,
            _school_year: &str,
        ) -> DataResult<Option<Enrollment>> {
            Ok(self.summary.clone())
        }

        async fn ping(&self) -> DataResult<()> {
            if self.unhealthy {
                return Err(DataError::Ping {
                    source: sqlx::Error::PoolClosed,
                });
            }
            Ok(())
        }
    }

    fn sample_hit() -> SchoolSearch {
        SchoolSearch {
            ncessch: "010000500871".to_string(),
            sch_name: "Lincoln Elementary".to_string(),
            school_year: "2023-2024".to_string(),
        }
    }

    fn sample_enrollment() -> Enrollment {
        Enrollment {
            ncessch: "010000500871".to_string(),
            school_year: "2023-2024".to_string(),
            total_enrollment: 412,
            white: 120,
            black: 95,
            hispanic: 130,
            asian: 25,
            native_american: 4,
            pacific_islander: 2,
            multiracial: 36,
            male: 210,
            female: 202,
            grade_pk: 30,
            grade_k: 55,
            grade_01: 60,
            grade_02: 58,
            grade_03: 54,
            grade_04: 52,
            grade_05: 50,
            grade_06: 53,
            grade_07: 0,
            grade_08: 0,
            grade_09: 0,
            grade_10: 0,
            grade_11: 0,
            grade_12: 0,
            grade_13: 0,
            ungraded: 0,
            adult_education: 0,
        }
    }

    fn router_with(stub: Arc<StubStore>) -> Router {
        ApiServer::new(
            stub,
            CorsPolicy::new(vec!["http://localhost:5173".to_string()]),
        )
        .into_router()
    }

    async fn post_json(router: Router, route: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(route)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn empty_search_term_is_rejected_without_touching_the_store() {
        let stub = Arc::new(StubStore::default());
        let router = router_with(Arc::clone(&stub));

        let (status, body) = post_json(
            router,
            ROUTE_GET_MATCHING_SCHOOLS,
            json!({"searchTerm": "!!! ---"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_argument");
        assert_eq!(body["message"], "search term cannot be empty");
        assert_eq!(stub.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_returns_matching_rows_verbatim() {
        let stub = Arc::new(StubStore {
            search_results: vec![sample_hit()],
            ..StubStore::default()
        });
        let router = router_with(Arc::clone(&stub));

        let (status, body) = post_json(
            router,
            ROUTE_GET_MATCHING_SCHOOLS,
            json!({"searchTerm": "Lincoln Elementary"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"][0]["ncessch"], "010000500871");
        assert_eq!(body["results"][0]["schName"], "Lincoln Elementary");
        assert_eq!(body["results"][0]["schoolYear"], "2023-2024");
        assert_eq!(stub.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_with_no_hits_is_not_found() {
        let router = router_with(Arc::new(StubStore::default()));

        let (status, body) = post_json(
            router,
            ROUTE_GET_MATCHING_SCHOOLS,
            json!({"searchTerm": "Atlantis Academy"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["message"], "no results found");
    }

    #[tokio::test]
    async fn search_store_failure_maps_to_internal() {
        let stub = Arc::new(StubStore {
            fail_search: true,
            ..StubStore::default()
        });
        let router = router_with(stub);

        let (status, body) = post_json(
            router,
            ROUTE_GET_MATCHING_SCHOOLS,
            json!({"searchTerm": "Lincoln"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "internal");
        assert_eq!(body["message"], "internal server error");
    }

    #[tokio::test]
    async fn unknown_school_is_not_found() {
        let router = router_with(Arc::new(StubStore::default()));

        let (status, body) = post_json(
            router,
            ROUTE_GET_SCHOOL,
            json!({"ncessch": "999999999999", "schoolYear": "2023-2024"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No school found for this school and year");
    }

    #[tokio::test]
    async fn membership_history_echoes_the_identifier() {
        let stub = Arc::new(StubStore {
            history: vec![sample_enrollment()],
            ..StubStore::default()
        });
        let router = router_with(stub);

        let (status, body) = post_json(
            router,
            ROUTE_GET_MEMBERSHIP,
            json!({"ncessch": "010000500871"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ncessch"], "010000500871");
        assert_eq!(body["byYear"][0]["totalEnrollment"], 412);
        assert_eq!(body["byYear"][0]["gradeK"], 55);
        assert_eq!(body["byYear"][0]["adultEducation"], 0);
    }

    #[tokio::test]
    async fn empty_membership_history_is_not_found() {
        let router = router_with(Arc::new(StubStore::default()));

        let (status, body) = post_json(
            router,
            ROUTE_GET_MEMBERSHIP,
            json!({"ncessch": "010000500871"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            "no enrollment data available for this school"
        );
    }

    #[tokio::test]
    async fn membership_summary_returns_the_yearly_counts() {
        let stub = Arc::new(StubStore {
            summary: Some(sample_enrollment()),
            ..StubStore::default()
        });
        let router = router_with(stub);

        let (status, body) = post_json(
            router,
            ROUTE_GET_MEMBERSHIP_SUMMARY,
            json!({"ncessch": "010000500871", "schoolYear": "2023-2024"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["totalEnrollment"], 412);
        assert_eq!(body["summary"]["nativeAmerican"], 4);
    }

    #[tokio::test]
    async fn missing_summary_is_not_found() {
        let router = router_with(Arc::new(StubStore::default()));

        let (status, body) = post_json(
            router,
            ROUTE_GET_MEMBERSHIP_SUMMARY,
            json!({"ncessch": "010000500871", "schoolYear": "1999-2000"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            "no enrollment data available for this school and year"
        );
    }

    #[tokio::test]
    async fn health_reflects_warehouse_reachability() {
        let router = router_with(Arc::new(StubStore::default()));
        let request = Request::builder()
            .method(Method::GET)
            .uri(ROUTE_HEALTH)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let router = router_with(Arc::new(StubStore {
            unhealthy: true,
            ..StubStore::default()
        }));
        let request = Request::builder()
            .method(Method::GET)
            .uri(ROUTE_HEALTH)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn allowed_origins_are_echoed_back() {
        let router = router_with(Arc::new(StubStore::default()));
        let request = Request::builder()
            .method(Method::GET)
            .uri(ROUTE_HEALTH)
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_MAX_AGE)
                .unwrap(),
            "7200"
        );
    }

    #[tokio::test]
    async fn disallowed_origins_get_no_cors_headers() {
        let router = router_with(Arc::new(StubStore::default()));
        let request = Request::builder()
            .method(Method::GET)
            .uri(ROUTE_HEALTH)
            .header(header::ORIGIN, "https://evil.example.com")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn preflight_short_circuits_with_no_content() {
        let router = router_with(Arc::new(StubStore::default()));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(ROUTE_GET_MATCHING_SCHOOLS)
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                .unwrap(),
            "POST, GET, OPTIONS"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
