#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-12;

// --- LatLng ---

#[test]
fn planar_distance_is_zero_for_same_point() {
    let a = LatLng::new(48.6824, 20.1157);
    assert_eq!(a.planar_distance(a), 0.0);
}

#[test]
fn planar_distance_is_euclidean_on_degrees() {
    let a = LatLng::new(0.0, 0.0);
    let b = LatLng::new(3.0, 4.0);
    assert!((a.planar_distance(b) - 5.0).abs() < EPSILON);
}

#[test]
fn planar_distance_is_symmetric() {
    let a = LatLng::new(48.6824, 20.1157);
    let b = LatLng::new(48.68241, 20.11571);
    assert_eq!(a.planar_distance(b), b.planar_distance(a));
}

#[test]
fn planar_distance_ignores_latitude_scaling() {
    // One degree of longitude counts the same at the equator and at 60N.
    let eq = LatLng::new(0.0, 0.0).planar_distance(LatLng::new(0.0, 1.0));
    let north = LatLng::new(60.0, 0.0).planar_distance(LatLng::new(60.0, 1.0));
    assert!((eq - north).abs() < EPSILON);
}

// --- GeoPoint ---

#[test]
fn geo_point_at_uses_default_zone() {
    let p = GeoPoint::at(LatLng::new(48.6824, 20.1157));
    assert_eq!(p.zone, 0);
    assert_eq!(p.coordinates, LatLng::new(48.6824, 20.1157));
}

#[test]
fn geo_point_serializes_coordinates_and_zone() {
    let p = GeoPoint::new(LatLng::new(1.5, 2.5), 3);
    let json = serde_json::to_value(p).unwrap();
    assert_eq!(json["coordinates"]["lat"], 1.5);
    assert_eq!(json["coordinates"]["lng"], 2.5);
    assert_eq!(json["zone"], 3);
}

// --- zone_color ---

#[test]
fn zone_color_indexes_palette() {
    assert_eq!(zone_color(0), "blue");
    assert_eq!(zone_color(1), "red");
    assert_eq!(zone_color(2), "goldenrod");
    assert_eq!(zone_color(3), "green");
}

#[test]
fn zone_color_out_of_palette_falls_back() {
    assert_eq!(zone_color(4), FALLBACK_ZONE_COLOR);
    assert_eq!(zone_color(u32::MAX), FALLBACK_ZONE_COLOR);
}

// --- Marker ---

#[test]
fn marker_from_point_carries_color_and_radius() {
    let p = GeoPoint::new(LatLng::new(48.68, 20.11), 1);
    let m = Marker::from(&p);
    assert_eq!(m.lat, 48.68);
    assert_eq!(m.lng, 20.11);
    assert_eq!(m.zone, 1);
    assert_eq!(m.color, "red");
    assert_eq!(m.radius_m, MARKER_RADIUS_M);
}
