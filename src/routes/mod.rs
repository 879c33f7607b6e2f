//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The front-end is a thin map page: it draws base tiles from a public
//! provider, overlays the mask tiles served here, and forwards clicks to
//! `/api/points/click`. All editor state lives in the server's core.

pub mod map;
pub mod points;
pub mod tiles;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API and tile routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tiles/{z}/{x}/{y}", get(tiles::get_tile))
        .route("/api/boundary", get(map::get_boundary))
        .route("/api/viewport", get(map::get_viewport))
        .route("/api/points", get(points::list_points))
        .route("/api/points/click", post(points::click))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application: API routes plus the static front-end, if configured.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = api_routes(state);
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    };
    router.layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
