//! Value types for user-placed points and the markers drawn for them.
//!
//! `GeoPoint` is the unit the store holds and the backend lists. `Marker` is
//! the read-only view the marker layer renders: a point plus its zone colour.

#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZONE, FALLBACK_ZONE_COLOR, MARKER_RADIUS_M, ZONE_COLORS};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar distance in raw degrees. Not corrected for latitude; only
    /// meaningful over town-sized extents.
    #[must_use]
    pub fn planar_distance(self, other: LatLng) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// A stall marker placed by the user, tagged with a zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub coordinates: LatLng,
    pub zone: u32,
}

impl GeoPoint {
    #[must_use]
    pub fn new(coordinates: LatLng, zone: u32) -> Self {
        Self { coordinates, zone }
    }

    /// A point created by click: default zone.
    #[must_use]
    pub fn at(coordinates: LatLng) -> Self {
        Self::new(coordinates, DEFAULT_ZONE)
    }
}

/// Display colour for a zone.
#[must_use]
pub fn zone_color(zone: u32) -> &'static str {
    ZONE_COLORS
        .get(zone as usize)
        .copied()
        .unwrap_or(FALLBACK_ZONE_COLOR)
}

/// One circle on the marker layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub zone: u32,
    pub color: &'static str,
    pub radius_m: f64,
}

impl From<&GeoPoint> for Marker {
    fn from(point: &GeoPoint) -> Self {
        Self {
            lat: point.coordinates.lat,
            lng: point.coordinates.lng,
            zone: point.zone,
            color: zone_color(point.zone),
            radius_m: MARKER_RADIUS_M,
        }
    }
}
