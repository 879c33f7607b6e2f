#![allow(clippy::float_cmp)]

use super::*;

// --- parse_coordinates ---

#[test]
fn coordinates_parse_lat_then_lng() {
    let at = parse_coordinates("48.6824 20.1157").unwrap();
    assert_eq!(at, LatLng::new(48.6824, 20.1157));
}

#[test]
fn coordinates_tolerate_extra_whitespace() {
    let at = parse_coordinates("  48.68   20.11 ").unwrap();
    assert_eq!(at, LatLng::new(48.68, 20.11));
}

#[test]
fn coordinates_reject_garbage() {
    for raw in ["not-a-number", "", "48.68", "48.68 20.11 3", "48.68,20.11", "NaN 20.11", "inf 1"] {
        assert!(
            matches!(parse_coordinates(raw), Err(RecordError::Coordinates(_))),
            "{raw:?} should be rejected"
        );
    }
}

// --- PlaceRecord ---

#[test]
fn record_reads_backend_spelling() {
    let record: PlaceRecord =
        serde_json::from_str(r#"{"place_cordinates":"48.68 20.11","place_zona":2}"#).unwrap();
    assert_eq!(record.to_point().unwrap(), GeoPoint::new(LatLng::new(48.68, 20.11), 2));
}

#[test]
fn record_reads_corrected_spelling() {
    let record: PlaceRecord =
        serde_json::from_str(r#"{"place_coordinates":"48.68 20.11","place_zone":3}"#).unwrap();
    assert_eq!(record.to_point().unwrap().zone, 3);
}

#[test]
fn null_or_missing_zone_is_default() {
    let null: PlaceRecord =
        serde_json::from_str(r#"{"place_cordinates":"48.68 20.11","place_zona":null}"#).unwrap();
    let missing: PlaceRecord = serde_json::from_str(r#"{"place_cordinates":"48.68 20.11"}"#).unwrap();
    assert_eq!(null.to_point().unwrap().zone, DEFAULT_ZONE);
    assert_eq!(missing.to_point().unwrap().zone, DEFAULT_ZONE);
}

// --- parse_place_records ---

#[test]
fn malformed_record_is_dropped_and_siblings_load() {
    let body = r#"[
        {"place_coordinates": "48.68 20.11", "place_zone": 1},
        {"place_coordinates": "not-a-number", "place_zone": 0}
    ]"#;
    let points = parse_place_records(body).unwrap();
    assert_eq!(points, vec![GeoPoint::new(LatLng::new(48.68, 20.11), 1)]);
}

#[test]
fn records_of_the_wrong_shape_are_dropped() {
    let body = r#"[
        42,
        {"place_zona": 1},
        {"place_cordinates": 48.1, "place_zona": 1},
        {"place_cordinates": "48.2 20.2", "place_zona": 0}
    ]"#;
    let points = parse_place_records(body).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].coordinates, LatLng::new(48.2, 20.2));
}

#[test]
fn unusable_zone_keeps_the_record_with_default_zone() {
    let body = r#"[
        {"place_cordinates": "48.68 20.11", "place_zona": -1},
        {"place_cordinates": "48.69 20.12", "place_zona": 2.5},
        {"place_cordinates": "48.70 20.13", "place_zona": 99999999999}
    ]"#;
    let points = parse_place_records(body).unwrap();
    assert_eq!(
        points,
        vec![
            GeoPoint::new(LatLng::new(48.68, 20.11), DEFAULT_ZONE),
            GeoPoint::new(LatLng::new(48.69, 20.12), DEFAULT_ZONE),
            GeoPoint::new(LatLng::new(48.70, 20.13), DEFAULT_ZONE),
        ]
    );
}

#[test]
fn integral_float_zone_is_read_as_integer() {
    let body = r#"[{"place_cordinates": "48.69 20.12", "place_zona": 2.0}]"#;
    let points = parse_place_records(body).unwrap();
    assert_eq!(points, vec![GeoPoint::new(LatLng::new(48.69, 20.12), 2)]);
}

#[test]
fn order_is_preserved() {
    let body = r#"[
        {"place_cordinates": "1 1", "place_zona": 0},
        {"place_cordinates": "2 2", "place_zona": 1},
        {"place_cordinates": "3 3", "place_zona": 2}
    ]"#;
    let zones: Vec<u32> = parse_place_records(body).unwrap().iter().map(|p| p.zone).collect();
    assert_eq!(zones, vec![0, 1, 2]);
}

#[test]
fn empty_array_is_empty() {
    assert!(parse_place_records("[]").unwrap().is_empty());
}

#[test]
fn non_array_body_is_an_error() {
    assert!(matches!(parse_place_records(r#"{"error":"no fair"}"#), Err(RecordError::Json(_))));
    assert!(matches!(parse_place_records("<html>"), Err(RecordError::Json(_))));
}
