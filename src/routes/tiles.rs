//! Mask tile endpoint, the tile-provider hook for the boundary mask.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use mapcore::mask::{MaskLookup, render_mask_tile};
use mapcore::projection::TileCoord;

use crate::state::AppState;

/// Parse `z`, `x` and a `y` that may carry a `.png` suffix.
///
/// Returns `None` for tiles that do not exist at their zoom level.
pub(crate) fn parse_tile(z: u8, x: u32, y: &str) -> Option<TileCoord> {
    let y = y.strip_suffix(".png").unwrap_or(y);
    let y: u32 = y.parse().ok()?;
    let tile = TileCoord::new(x, y, z);
    tile.is_valid().then_some(tile)
}

/// `GET /tiles/{z}/{x}/{y}`: PNG mask tile.
///
/// 400 for a nonexistent tile, 404 while no boundary is loaded. Cache misses
/// are rendered on the blocking pool, so clicks and reads proceed meanwhile.
pub async fn get_tile(
    State(state): State<AppState>,
    Path((z, x, y)): Path<(u8, u32, String)>,
) -> Result<Response, StatusCode> {
    let coord = parse_tile(z, x, &y).ok_or(StatusCode::BAD_REQUEST)?;
    let lookup = state.core.read().await.mask_lookup(coord).ok_or(StatusCode::NOT_FOUND)?;
    let tile = match lookup {
        MaskLookup::Cached(tile) => tile,
        MaskLookup::Render { boundary, projection } => {
            // Rasterize off the executor and without holding the core lock.
            let shared = Arc::clone(&boundary);
            let rendered = tokio::task::spawn_blocking(move || render_mask_tile(coord, &shared, &projection))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, z, x, y = coord.y, "mask tile render task failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                })?;
            state.core.write().await.store_mask_tile(coord, &boundary, rendered)
        }
    };

    let png = tile.encode_png().map_err(|e| {
        tracing::error!(error = %e, z, x, y = coord.y, "mask tile encode failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(([(CONTENT_TYPE, "image/png"), (CACHE_CONTROL, "no-cache")], png).into_response())
}

#[cfg(test)]
#[path = "tiles_test.rs"]
mod tests;
