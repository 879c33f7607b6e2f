#![allow(clippy::float_cmp)]

use geo::{LineString, MultiPolygon, Polygon, coord};

use super::*;
use crate::consts::{MASK_FILL_RGBA, REMOVE_POINT_PROMPT};

// =============================================================
// Helpers
// =============================================================

fn square() -> BoundaryPolygon {
    let ring = LineString::new(vec![
        coord! { x: 20.10, y: 48.67 },
        coord! { x: 20.13, y: 48.67 },
        coord! { x: 20.13, y: 48.69 },
        coord! { x: 20.10, y: 48.69 },
        coord! { x: 20.10, y: 48.67 },
    ]);
    BoundaryPolygon::from_polygons(MultiPolygon::new(vec![Polygon::new(ring, vec![])])).unwrap()
}

fn core() -> EditorCore {
    EditorCore::new(Viewport::new(1024.0, 500.0, WebMercator::default()))
}

fn ready_core() -> EditorCore {
    let mut core = core();
    core.load_boundary(square());
    core.load_points(Vec::new());
    core
}

fn pt(lat: f64, lng: f64, zone: u32) -> GeoPoint {
    GeoPoint::new(LatLng::new(lat, lng), zone)
}

fn accept() -> impl FnMut(&str) -> bool {
    |_: &str| true
}

fn decline() -> impl FnMut(&str) -> bool {
    |_: &str| false
}

// =============================================================
// Loads
// =============================================================

#[test]
fn new_core_is_not_interactive() {
    let core = core();
    assert!(!core.is_interactive());
    assert!(core.boundary().is_none());
    assert!(!core.has_mask());
    assert!(core.points().is_empty());
}

#[test]
fn load_boundary_fits_then_attaches() {
    let mut core = core();
    let actions = core.load_boundary(square());

    assert_eq!(actions.len(), 2);
    assert!(matches!(actions[0], Action::ViewportFitted(_)));
    assert_eq!(actions[1], Action::MaskAttached);
    assert!(core.has_mask());
    assert_eq!(core.viewport.max_bounds, Some(square().bounds()));
    assert_eq!(core.boundary_state(), LoadState::Loaded);
}

#[test]
fn reloading_boundary_detaches_previous_mask_first() {
    let mut core = core();
    core.load_boundary(square());
    let actions = core.load_boundary(square());
    assert_eq!(actions.first(), Some(&Action::MaskDetached));
    assert_eq!(actions.last(), Some(&Action::MaskAttached));
}

#[test]
fn load_points_replaces_store() {
    let mut core = core();
    let action = core.load_points(vec![pt(48.68, 20.11, 1), pt(48.681, 20.111, 2)]);
    assert_eq!(action, Action::PointsLoaded { count: 2 });
    assert_eq!(core.points().len(), 2);
    assert_eq!(core.points_state(), LoadState::Loaded);
}

#[test]
fn failed_loads_still_make_the_map_interactive() {
    let mut core = core();
    core.boundary_failed();
    assert!(!core.is_interactive());
    core.points_failed();
    assert!(core.is_interactive());
    assert!(core.boundary().is_none());
    assert!(core.points().is_empty());
}

#[test]
fn boundary_failure_after_success_keeps_boundary() {
    let mut core = core();
    core.load_boundary(square());
    core.boundary_failed();
    assert!(core.boundary().is_some());
    assert!(core.has_mask());
}

#[test]
fn load_order_does_not_change_final_state() {
    let points = vec![pt(48.68, 20.11, 1), pt(48.685, 20.12, 3)];

    let mut boundary_first = core();
    boundary_first.load_boundary(square());
    boundary_first.load_points(points.clone());

    let mut points_first = core();
    points_first.load_points(points);
    points_first.load_boundary(square());

    assert_eq!(boundary_first.points(), points_first.points());
    assert_eq!(boundary_first.markers(), points_first.markers());
    assert_eq!(boundary_first.viewport, points_first.viewport);
    assert_eq!(boundary_first.boundary(), points_first.boundary());
    assert_eq!(boundary_first.is_interactive(), points_first.is_interactive());
}

// =============================================================
// Clicks
// =============================================================

#[test]
fn click_before_ready_is_ignored() {
    let mut core = core();
    core.load_boundary(square());
    let action = core.on_click(LatLng::new(48.6824, 20.1157), &mut accept());
    assert_eq!(action, Action::None);
    assert!(core.points().is_empty());
}

#[test]
fn click_adds_point() {
    let mut core = ready_core();
    let action = core.on_click(LatLng::new(48.6824, 20.1157), &mut accept());
    assert_eq!(action, Action::PointAdded(pt(48.6824, 20.1157, 0)));
    assert_eq!(&*core.points(), &[pt(48.6824, 20.1157, 0)]);
}

#[test]
fn click_near_point_removes_after_confirm() {
    let mut core = ready_core();
    core.on_click(LatLng::new(48.6824, 20.1157), &mut accept());
    let action = core.on_click(LatLng::new(48.682_41, 20.115_71), &mut accept());
    assert_eq!(action, Action::PointRemoved(pt(48.6824, 20.1157, 0)));
    assert!(core.points().is_empty());
}

#[test]
fn declined_removal_keeps_store() {
    let mut core = ready_core();
    core.on_click(LatLng::new(48.6824, 20.1157), &mut accept());
    let before = core.points();
    let action = core.on_click(LatLng::new(48.682_41, 20.115_71), &mut decline());
    assert_eq!(action, Action::RemovalDeclined(pt(48.6824, 20.1157, 0)));
    assert!(Arc::ptr_eq(&before, &core.points()));
}

#[test]
fn confirm_sees_removal_prompt() {
    let mut core = ready_core();
    core.on_click(LatLng::new(48.6824, 20.1157), &mut accept());
    let mut seen = Vec::new();
    let mut confirm = |msg: &str| {
        seen.push(msg.to_owned());
        true
    };
    core.on_click(LatLng::new(48.6824, 20.1157), &mut confirm);
    assert_eq!(seen, vec![REMOVE_POINT_PROMPT.to_owned()]);
}

#[test]
fn retained_snapshot_survives_clicks() {
    let mut core = ready_core();
    core.on_click(LatLng::new(48.68, 20.11), &mut accept());
    let snapshot = core.points();
    core.on_click(LatLng::new(48.685, 20.12), &mut accept());
    core.on_click(LatLng::new(48.68, 20.11), &mut accept());

    assert_eq!(&*snapshot, &[pt(48.68, 20.11, 0)]);
    assert_eq!(&*core.points(), &[pt(48.685, 20.12, 0)]);
}

#[test]
fn markers_follow_store() {
    let mut core = ready_core();
    core.load_points(vec![pt(48.68, 20.11, 1), pt(48.681, 20.111, 9)]);
    let markers = core.markers();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].color, "red");
    assert_eq!(markers[1].color, "#3388ff");
}

// =============================================================
// Mask and viewport
// =============================================================

#[test]
fn mask_tile_without_boundary_is_none() {
    let mut core = core();
    assert!(core.mask_tile(TileCoord::new(0, 0, 0)).is_none());
}

#[test]
fn mask_tile_renders_after_boundary() {
    let mut core = core();
    core.load_boundary(square());
    let tile = core.mask_tile(TileCoord::new(0, 0, 18)).unwrap();
    assert_eq!(tile.pixel(0, 0), Some(MASK_FILL_RGBA));
}

#[test]
fn teardown_detaches_mask_once() {
    let mut core = ready_core();
    assert_eq!(core.teardown(), vec![Action::MaskDetached]);
    assert!(core.teardown().is_empty());
    assert!(core.mask_tile(TileCoord::new(0, 0, 18)).is_none());
    assert!(core.boundary().is_some());
}

#[test]
fn resize_without_boundary_only_updates_size() {
    let mut core = core();
    assert_eq!(core.set_viewport_size(800.0, 600.0), Action::None);
    assert_eq!(core.viewport.width, 800.0);
    assert!(core.viewport.max_bounds.is_none());
}

#[test]
fn resize_with_boundary_refits() {
    let mut core = ready_core();
    let action = core.set_viewport_size(4000.0, 4000.0);
    assert!(matches!(action, Action::ViewportFitted(ref v) if v.zoom == 17));
    assert_eq!(core.viewport.zoom, 17);
}

#[test]
fn mask_lookup_without_boundary_is_none() {
    assert!(core().mask_lookup(TileCoord::new(0, 0, 0)).is_none());
}

#[test]
fn stored_tile_is_served_from_cache() {
    let mut core = ready_core();
    let coord = TileCoord::new(0, 0, 18);
    let Some(MaskLookup::Render { boundary, projection }) = core.mask_lookup(coord) else {
        panic!("fresh mask should ask for a render");
    };
    let stored = core.store_mask_tile(coord, &boundary, crate::mask::render_mask_tile(coord, &boundary, &projection));

    let Some(MaskLookup::Cached(hit)) = core.mask_lookup(coord) else {
        panic!("stored tile should be cached");
    };
    assert!(Arc::ptr_eq(&stored, &hit));
    assert!(Arc::ptr_eq(&stored, &core.mask_tile(coord).unwrap()));
}

#[test]
fn tile_rendered_for_a_replaced_boundary_is_not_cached() {
    let mut core = ready_core();
    let coord = TileCoord::new(0, 0, 18);
    let Some(MaskLookup::Render { boundary: stale, .. }) = core.mask_lookup(coord) else {
        panic!("fresh mask should ask for a render");
    };
    core.load_boundary(square());

    let tile = MaskTile::filled(256, [0, 0, 0, 0]);
    core.store_mask_tile(coord, &stale, tile.clone());
    assert!(matches!(core.mask_lookup(coord), Some(MaskLookup::Render { .. })));
    assert_ne!(*core.mask_tile(coord).unwrap(), tile);
}
