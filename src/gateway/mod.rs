//! HTTP gateway (Axum) around the analysis pipeline.
//!
//! Thin plumbing: decodes uploads out of multipart bodies, hands them to the
//! scorer and serializes the report. This module is primarily used by the
//! `notifcheck` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::analyze_handler;
pub use state::HandlerState;

/// Upper bound for uploaded screenshot payloads.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub reference_dir: &'static str,
    pub embedding: &'static str,
    pub embedder_mode: &'static str,
}

pub async fn root_handler() -> Response {
    Json(WelcomeResponse {
        message: "NotifCheck API. POST an image to /analyze to score a notification screenshot.",
    })
    .into_response()
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let reference_status = if state.default_reference_dir.is_dir() {
        "ready"
    } else {
        "pending"
    };

    let embedder_mode = if state.scorer.embedder().is_stub() {
        "stub"
    } else {
        "real"
    };

    let components = ComponentStatus {
        http: "ready",
        reference_dir: reference_status,
        embedding: "ready",
        embedder_mode,
    };

    let is_ready = components.reference_dir == "ready" && components.embedding == "ready";

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    (
        status_code,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
