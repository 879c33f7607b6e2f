//! Boundary outline and viewport routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use mapcore::viewport::ViewportView;

use crate::state::AppState;

/// `GET /api/boundary`: boundary as a GeoJSON MultiPolygon, for the outline layer.
pub async fn get_boundary(State(state): State<AppState>) -> Result<Json<geojson::Geometry>, StatusCode> {
    let core = state.core.read().await;
    let boundary = core.boundary().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(boundary.to_geojson()))
}

/// `GET /api/viewport`: current (fitted) viewport.
pub async fn get_viewport(State(state): State<AppState>) -> Json<ViewportView> {
    Json(state.core.read().await.viewport.view())
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
