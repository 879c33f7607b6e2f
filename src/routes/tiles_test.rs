use axum::body::to_bytes;

use super::*;
use crate::state::test_helpers::{ready_app_state, test_app_state};

#[test]
fn parse_tile_accepts_png_suffix() {
    assert_eq!(parse_tile(16, 36429, "22594.png"), Some(TileCoord::new(36429, 22594, 16)));
    assert_eq!(parse_tile(16, 36429, "22594"), Some(TileCoord::new(36429, 22594, 16)));
}

#[test]
fn parse_tile_rejects_garbage_y() {
    assert_eq!(parse_tile(16, 1, "abc.png"), None);
    assert_eq!(parse_tile(16, 1, "-3"), None);
}

#[test]
fn parse_tile_rejects_tiles_outside_the_world() {
    assert_eq!(parse_tile(1, 2, "0"), None);
    assert_eq!(parse_tile(1, 0, "2"), None);
    assert_eq!(parse_tile(30, 0, "0"), None);
}

#[tokio::test]
async fn tile_without_boundary_is_not_found() {
    let state = test_app_state();
    let err = get_tile(State(state), Path((18, 0, "0.png".to_string()))).await.unwrap_err();
    assert_eq!(err, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_tile_is_bad_request() {
    let state = ready_app_state().await;
    let err = get_tile(State(state), Path((2, 9, "0.png".to_string()))).await.unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tile_is_served_as_png() {
    let state = ready_app_state().await;
    let resp = get_tile(State(state), Path((16, 36427, "22595.png".to_string()))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "image/png");
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[tokio::test]
async fn repeated_tile_requests_are_identical() {
    let state = ready_app_state().await;
    let a = get_tile(State(state.clone()), Path((16, 36427, "22595".to_string()))).await.unwrap();
    let b = get_tile(State(state), Path((16, 36427, "22595".to_string()))).await.unwrap();
    let a = to_bytes(a.into_body(), usize::MAX).await.unwrap();
    let b = to_bytes(b.into_body(), usize::MAX).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn cached_tile_is_served_while_a_reader_holds_the_core() {
    let state = ready_app_state().await;
    get_tile(State(state.clone()), Path((16, 36427, "22595.png".to_string()))).await.unwrap();

    let _reader = state.core.read().await;
    let served = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        get_tile(State(state.clone()), Path((16, 36427, "22595.png".to_string()))),
    )
    .await
    .expect("cached tile must not wait for exclusive access")
    .unwrap();
    assert_eq!(served.status(), StatusCode::OK);
}

#[tokio::test]
async fn served_tile_is_cached_in_the_core() {
    let state = ready_app_state().await;
    let coord = TileCoord::new(36427, 22595, 16);
    assert!(matches!(state.core.read().await.mask_lookup(coord), Some(MaskLookup::Render { .. })));

    get_tile(State(state.clone()), Path((16, 36427, "22595.png".to_string()))).await.unwrap();
    assert!(matches!(state.core.read().await.mask_lookup(coord), Some(MaskLookup::Cached(_))));
}
