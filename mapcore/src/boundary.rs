//! The fair boundary: an immutable multipolygon parsed from GeoJSON.
//!
//! Polygons are collected from every feature (and nested geometry
//! collections) in the document. Points and lines are ignored. The bounding
//! box is computed once at construction since both the viewport fit and the
//! mask's cheap-reject test read it on every call.

#[cfg(test)]
#[path = "boundary_test.rs"]
mod boundary_test;

use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use geojson::{GeoJson, Geometry, Value};

/// Errors produced while building a boundary.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    /// The document is not valid GeoJSON.
    #[error("geojson parse failed: {0}")]
    Parse(#[from] geojson::Error),
    /// A position had fewer than two numbers.
    #[error("invalid position: expected [lng, lat], got {0} values")]
    InvalidPosition(usize),
    /// The document contained no polygon with any vertices.
    #[error("boundary contains no polygons")]
    NoPolygons,
}

/// Read-only fair boundary shared by the viewport controller and mask renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    polygons: MultiPolygon<f64>,
    bounds: Rect<f64>,
}

impl BoundaryPolygon {
    /// Parse a GeoJSON document (FeatureCollection, Feature, or Geometry).
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if the text is not GeoJSON or holds no polygons.
    pub fn from_geojson_str(raw: &str) -> Result<Self, BoundaryError> {
        let doc: GeoJson = raw.parse()?;
        Self::from_geojson(&doc)
    }

    /// Build from a parsed GeoJSON document.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] on malformed positions or when no polygon is present.
    pub fn from_geojson(doc: &GeoJson) -> Result<Self, BoundaryError> {
        let mut polygons = Vec::new();
        match doc {
            GeoJson::FeatureCollection(fc) => {
                for feature in &fc.features {
                    if let Some(geometry) = &feature.geometry {
                        collect_polygons(geometry, &mut polygons)?;
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    collect_polygons(geometry, &mut polygons)?;
                }
            }
            GeoJson::Geometry(geometry) => collect_polygons(geometry, &mut polygons)?,
        }
        Self::from_polygons(MultiPolygon::new(polygons))
    }

    /// Wrap an existing multipolygon.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::NoPolygons`] if the multipolygon has no vertices.
    pub fn from_polygons(polygons: MultiPolygon<f64>) -> Result<Self, BoundaryError> {
        let bounds = polygons.bounding_rect().ok_or(BoundaryError::NoPolygons)?;
        Ok(Self { polygons, bounds })
    }

    /// All polygons of the boundary.
    #[must_use]
    pub fn polygons(&self) -> &MultiPolygon<f64> {
        &self.polygons
    }

    /// Bounding box (`x = lng`, `y = lat`).
    #[must_use]
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    /// Exterior ring of each polygon. Holes are not included.
    pub fn outer_rings(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.polygons.iter().map(Polygon::exterior)
    }

    /// The boundary as a GeoJSON MultiPolygon geometry.
    #[must_use]
    pub fn to_geojson(&self) -> Geometry {
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| {
                std::iter::once(polygon.exterior())
                    .chain(polygon.interiors())
                    .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Geometry::new(Value::MultiPolygon(polygons))
    }
}

fn collect_polygons(geometry: &Geometry, out: &mut Vec<Polygon<f64>>) -> Result<(), BoundaryError> {
    match &geometry.value {
        Value::Polygon(rings) => out.push(polygon_from_rings(rings)?),
        Value::MultiPolygon(members) => {
            for rings in members {
                out.push(polygon_from_rings(rings)?);
            }
        }
        Value::GeometryCollection(children) => {
            for child in children {
                collect_polygons(child, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>, BoundaryError> {
    let mut converted = rings
        .iter()
        .map(|ring| ring_from_positions(ring))
        .collect::<Result<Vec<_>, _>>()?;
    if converted.is_empty() {
        return Ok(Polygon::new(LineString::new(Vec::new()), Vec::new()));
    }
    let exterior = converted.remove(0);
    Ok(Polygon::new(exterior, converted))
}

fn ring_from_positions(positions: &[Vec<f64>]) -> Result<LineString<f64>, BoundaryError> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [lng, lat, ..] => Ok(Coord { x: *lng, y: *lat }),
            other => Err(BoundaryError::InvalidPosition(other.len())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}
