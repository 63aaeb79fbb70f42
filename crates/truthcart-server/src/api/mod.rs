mod analyze;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use truthcart_core::EngineConfig;
use truthcart_source::SignalSource;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

#[derive(Clone)]
pub struct AppState {
    pub engine_config: Arc<EngineConfig>,
    pub source: Arc<SignalSource>,
    pub source_timeout: Duration,
}

/// Error body for the analyze surface: `{"error": ...}` with an optional
/// `detail` only on internal failures.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    pub fn missing_fields() -> Self {
        Self {
            error: "Missing product_name or product_url".to_string(),
            detail: None,
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            error: "Method not allowed".to_string(),
            detail: None,
            status: StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            error: "Analysis failed".to_string(),
            detail: Some(detail.into()),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    signal_source: &'static str,
}

fn build_cors() -> CorsLayer {
    // The widget posts from arbitrary product pages.
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    // Non-POST on the analyze route must produce the contract's 405 body,
    // not axum's empty default.
    let limited_routes = Router::new()
        .route(
            "/api/v1/analyze",
            post(analyze::analyze).fallback(method_not_allowed),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ));

    Router::new()
        .merge(public_routes)
        .merge(limited_routes)
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let signal_source = if state.source.is_enabled() {
        "configured"
    } else {
        "disabled"
    };
    (
        StatusCode::OK,
        Json(HealthData {
            status: "ok",
            signal_source,
        }),
    )
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}
