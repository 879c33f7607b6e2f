//! Point listing and click routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use mapcore::engine::Action;
use mapcore::point::{GeoPoint, LatLng, Marker};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClickBody {
    pub lat: f64,
    pub lng: f64,
    /// Answer to the removal prompt. Absent means "no".
    #[serde(default)]
    pub confirm_remove: Option<bool>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    Added,
    Removed,
    Declined,
}

#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub outcome: ClickOutcome,
    pub point: GeoPoint,
    pub markers: Vec<Marker>,
}

/// `GET /api/points`: one marker per stored point.
pub async fn list_points(State(state): State<AppState>) -> Json<Vec<Marker>> {
    Json(state.core.read().await.markers())
}

/// `POST /api/points/click`: add a point, or remove the nearby one if confirmed.
///
/// 503 until both initial loads have settled.
pub async fn click(
    State(state): State<AppState>,
    Json(body): Json<ClickBody>,
) -> Result<Json<ClickResponse>, StatusCode> {
    if !body.lat.is_finite() || !body.lng.is_finite() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let accept = body.confirm_remove.unwrap_or(false);
    let mut core = state.core.write().await;
    let action = core.on_click(LatLng::new(body.lat, body.lng), &mut |_: &str| accept);
    let (outcome, point) = click_outcome(action)?;
    Ok(Json(ClickResponse { outcome, point, markers: core.markers() }))
}

/// Map a click action to the response outcome.
pub(crate) fn click_outcome(action: Action) -> Result<(ClickOutcome, GeoPoint), StatusCode> {
    match action {
        Action::PointAdded(p) => Ok((ClickOutcome::Added, p)),
        Action::PointRemoved(p) => Ok((ClickOutcome::Removed, p)),
        Action::RemovalDeclined(p) => Ok((ClickOutcome::Declined, p)),
        Action::None => Err(StatusCode::SERVICE_UNAVAILABLE),
        other => {
            tracing::warn!(?other, "unexpected action from click");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
#[path = "points_test.rs"]
mod tests;
