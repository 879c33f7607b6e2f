//! Spherical Web Mercator projection and slippy-map tile addressing.
//!
//! Pixel coordinates are global at a given zoom: the world is
//! `tile_size * 2^zoom` pixels wide, with `(0, 0)` at the north-west corner.
//! Geographic rectangles use `geo::Rect` with `x = lng` and `y = lat`.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use std::f64::consts::PI;

use geo::{Rect, coord};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TILE_SIZE, MAX_LATITUDE, MAX_TILE_ZOOM};
use crate::point::LatLng;

/// A point in global pixel space at some zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Address of one raster tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    #[must_use]
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Whether the tile exists at its zoom level.
    #[must_use]
    pub fn is_valid(self) -> bool {
        if self.z > MAX_TILE_ZOOM {
            return false;
        }
        let n = 1u64 << self.z;
        u64::from(self.x) < n && u64::from(self.y) < n
    }
}

/// Web Mercator projection for a fixed tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebMercator {
    tile_size: u32,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self { tile_size: DEFAULT_TILE_SIZE }
    }
}

impl WebMercator {
    #[must_use]
    pub fn new(tile_size: u32) -> Self {
        Self { tile_size: tile_size.max(1) }
    }

    #[must_use]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// World width in pixels at `zoom` (fractional zoom allowed).
    #[must_use]
    pub fn scale(&self, zoom: f64) -> f64 {
        f64::from(self.tile_size) * zoom.exp2()
    }

    /// Geographic coordinate to global pixel coordinate.
    #[must_use]
    pub fn project(&self, at: LatLng, zoom: f64) -> PixelPoint {
        let scale = self.scale(zoom);
        let lat = at.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let sin = lat.sin();
        let x = scale * (at.lng + 180.0) / 360.0;
        let y = scale * (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI));
        PixelPoint { x, y }
    }

    /// Global pixel coordinate back to a geographic coordinate.
    #[must_use]
    pub fn unproject(&self, px: PixelPoint, zoom: f64) -> LatLng {
        let scale = self.scale(zoom);
        let lng = px.x / scale * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * px.y / scale);
        let lat = (2.0 * n.exp().atan() - PI / 2.0).to_degrees();
        LatLng { lat, lng }
    }

    /// Geographic extent of a tile.
    #[must_use]
    pub fn tile_bounds(&self, tile: TileCoord) -> Rect<f64> {
        let size = f64::from(self.tile_size);
        let zoom = f64::from(tile.z);
        let nw = self.unproject(
            PixelPoint::new(f64::from(tile.x) * size, f64::from(tile.y) * size),
            zoom,
        );
        let se = self.unproject(
            PixelPoint::new((f64::from(tile.x) + 1.0) * size, (f64::from(tile.y) + 1.0) * size),
            zoom,
        );
        Rect::new(coord! { x: nw.lng, y: nw.lat }, coord! { x: se.lng, y: se.lat })
    }

    /// Pixel offset of a tile's north-west corner in global pixel space.
    #[must_use]
    pub fn tile_origin(&self, tile: TileCoord) -> PixelPoint {
        let size = f64::from(self.tile_size);
        PixelPoint::new(f64::from(tile.x) * size, f64::from(tile.y) * size)
    }

    /// Project into the pixel space of one tile (may fall outside `0..tile_size`).
    #[must_use]
    pub fn project_to_tile(&self, at: LatLng, tile: TileCoord) -> PixelPoint {
        let global = self.project(at, f64::from(tile.z));
        let origin = self.tile_origin(tile);
        PixelPoint::new(global.x - origin.x, global.y - origin.y)
    }
}
