//! Backend place records and their conversion into [`GeoPoint`]s.
//!
//! The backend lists a fair's places as
//! `[{ "place_cordinates": "<lat> <lng>", "place_zona": <int> }]`. The field
//! names are the backend's own spelling; the correctly spelled forms are
//! accepted as aliases. A record that cannot be read is logged and dropped.
//! Its siblings still load.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use serde::Deserialize;

use crate::consts::DEFAULT_ZONE;
use crate::point::{GeoPoint, LatLng};

/// Errors produced while reading place records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The response body is not a JSON array.
    #[error("place list is not a JSON array: {0}")]
    Json(#[from] serde_json::Error),
    /// A coordinate string is not two space-separated decimals.
    #[error("malformed coordinates: {0:?}")]
    Coordinates(String),
}

/// One place as the backend returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceRecord {
    #[serde(rename = "place_cordinates", alias = "place_coordinates")]
    pub coordinates: String,
    #[serde(default, rename = "place_zona", alias = "place_zone")]
    pub zone: Option<serde_json::Number>,
}

impl PlaceRecord {
    /// Convert to a point. A missing, null or unusable zone becomes the
    /// default zone; only the coordinates can reject a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Coordinates`] if the coordinate string is malformed.
    pub fn to_point(&self) -> Result<GeoPoint, RecordError> {
        let at = parse_coordinates(&self.coordinates)?;
        let zone = self.zone.as_ref().map_or(DEFAULT_ZONE, |raw| {
            zone_from_number(raw).unwrap_or_else(|| {
                tracing::debug!(zone = %raw, "zone out of range; using default");
                DEFAULT_ZONE
            })
        });
        Ok(GeoPoint::new(at, zone))
    }
}

/// A zone number as `u32`. Integral floats such as `2.0` count; negative,
/// fractional and oversized values do not.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn zone_from_number(raw: &serde_json::Number) -> Option<u32> {
    if let Some(n) = raw.as_u64() {
        return (n <= u64::from(u32::MAX)).then_some(n as u32);
    }
    let f = raw.as_f64()?;
    (f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f)).then_some(f as u32)
}

/// Parse `"<lat> <lng>"` into a coordinate.
///
/// # Errors
///
/// Returns [`RecordError::Coordinates`] unless the string holds exactly two
/// finite numbers.
pub fn parse_coordinates(raw: &str) -> Result<LatLng, RecordError> {
    let malformed = || RecordError::Coordinates(raw.to_owned());
    let mut parts = raw.split_whitespace();
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let lat: f64 = lat.parse().map_err(|_| malformed())?;
    let lng: f64 = lng.parse().map_err(|_| malformed())?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(malformed());
    }
    Ok(LatLng::new(lat, lng))
}

/// Parse a backend response body into points, dropping unreadable records.
///
/// # Errors
///
/// Returns [`RecordError::Json`] if the body is not a JSON array. Individual
/// bad records never fail the whole list.
pub fn parse_place_records(body: &str) -> Result<Vec<GeoPoint>, RecordError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let mut points = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        let record = match serde_json::from_value::<PlaceRecord>(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping unreadable place record");
                continue;
            }
        };
        match record.to_point() {
            Ok(point) => points.push(point),
            Err(e) => tracing::warn!(index, error = %e, "dropping place record"),
        }
    }
    Ok(points)
}
