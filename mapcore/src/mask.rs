//! Boundary mask tiles: grey everywhere except inside the fair boundary.
//!
//! ALGORITHM
//! =========
//! Each tile starts as a flat fill of [`MASK_FILL_RGBA`]. If the tile's
//! geographic extent does not touch the boundary's bounding box it is
//! returned as is. Otherwise every polygon's outer ring is projected into
//! tile-local pixels and the pixels it covers are erased to fully transparent
//! (the "destination-out" compositing rule). Coverage is decided per pixel
//! center with the nonzero winding rule, scanning one row at a time.
//!
//! Holes are not painted back to opaque; a multi-ring polygon shows the map
//! through its holes as well.
//!
//! LIFECYCLE
//! =========
//! [`MaskLayer`] is the attached overlay. It holds the boundary it was built
//! for and caches tiles by coordinate. Detaching means dropping the layer,
//! which discards every cached tile with it.

#[cfg(test)]
#[path = "mask_test.rs"]
mod mask_test;

use std::collections::HashMap;
use std::sync::Arc;

use geo::Intersects;

use crate::boundary::BoundaryPolygon;
use crate::consts::{MASK_CACHE_CAPACITY, MASK_FILL_RGBA};
use crate::point::LatLng;
use crate::projection::{PixelPoint, TileCoord, WebMercator};

/// Errors produced while encoding a mask tile.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    #[error("png encode failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// One square RGBA8 raster tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskTile {
    size: u32,
    pixels: Vec<u8>,
}

impl MaskTile {
    /// A tile filled entirely with `rgba`.
    #[must_use]
    pub fn filled(size: u32, rgba: [u8; 4]) -> Self {
        let count = size as usize * size as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self { size, pixels }
    }

    /// Edge length in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw RGBA bytes, row-major from the north-west corner.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at `(x, y)`, or `None` outside the tile.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let i = (y as usize * self.size as usize + x as usize) * 4;
        let px = self.pixels.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Number of fully transparent pixels.
    #[must_use]
    pub fn transparent_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] == 0).count()
    }

    /// Encode as PNG for a tile endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::Encode`] if the PNG encoder rejects the buffer.
    pub fn encode_png(&self) -> Result<Vec<u8>, MaskError> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, self.size, self.size);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(out)
    }

    /// Clear pixels `[x0, x1)` on row `y` to transparent.
    fn erase_span(&mut self, y: usize, x0: usize, x1: usize) {
        let row = y * self.size as usize * 4;
        if let Some(span) = self.pixels.get_mut(row + x0 * 4..row + x1 * 4) {
            span.fill(0);
        }
    }
}

/// Render the mask for one tile.
///
/// Pure: the same tile and boundary always produce identical pixels.
#[must_use]
pub fn render_mask_tile(tile: TileCoord, boundary: &BoundaryPolygon, projection: &WebMercator) -> MaskTile {
    let size = projection.tile_size();
    let mut out = MaskTile::filled(size, MASK_FILL_RGBA);

    if !projection.tile_bounds(tile).intersects(&boundary.bounds()) {
        return out;
    }

    let mut ring_px: Vec<PixelPoint> = Vec::new();
    let mut crossings: Vec<(f64, i32)> = Vec::new();
    for ring in boundary.outer_rings() {
        ring_px.clear();
        ring_px.extend(
            ring.coords()
                .map(|c| projection.project_to_tile(LatLng::new(c.y, c.x), tile)),
        );
        erase_ring(&mut out, &ring_px, &mut crossings);
    }
    out
}

/// Erase every pixel whose center lies inside `ring` (nonzero winding).
#[allow(clippy::cast_precision_loss)]
fn erase_ring(tile: &mut MaskTile, ring: &[PixelPoint], crossings: &mut Vec<(f64, i32)>) {
    if ring.len() < 3 {
        return;
    }
    let size = f64::from(tile.size);
    let (min_y, max_y) = ring
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    if max_y < 0.0 || min_y >= size {
        return;
    }

    let first_row = row_index(min_y, size);
    let last_row = row_index(max_y, size);
    for row in first_row..=last_row {
        let cy = row as f64 + 0.5;
        collect_crossings(ring, cy, crossings);
        if crossings.is_empty() {
            continue;
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        let mut span_start = 0.0;
        for &(x, dir) in crossings.iter() {
            let was_inside = winding != 0;
            winding += dir;
            let is_inside = winding != 0;
            if !was_inside && is_inside {
                span_start = x;
            } else if was_inside && !is_inside {
                let x0 = first_covered_column(span_start, size);
                let x1 = first_covered_column(x, size);
                if x0 < x1 {
                    tile.erase_span(row, x0, x1);
                }
            }
        }
    }
}

/// Where each edge of the closed `ring` crosses the horizontal line `y`,
/// tagged +1 for downward edges and -1 for upward ones.
fn collect_crossings(ring: &[PixelPoint], y: f64, out: &mut Vec<(f64, i32)>) {
    out.clear();
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let dir = if a.y <= y && b.y > y {
            1
        } else if b.y <= y && a.y > y {
            -1
        } else {
            continue;
        };
        let t = (y - a.y) / (b.y - a.y);
        out.push((a.x + t * (b.x - a.x), dir));
    }
}

/// Row whose center band contains `y`, clamped into the tile.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn row_index(y: f64, size: f64) -> usize {
    (y - 0.5).ceil().clamp(0.0, size - 1.0) as usize
}

/// First column whose center is at or right of `x`, clamped to `0..=size`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn first_covered_column(x: f64, size: f64) -> usize {
    (x - 0.5).ceil().clamp(0.0, size) as usize
}

/// Result of [`MaskLayer::lookup`].
#[derive(Debug, Clone)]
pub enum MaskLookup {
    Cached(Arc<MaskTile>),
    Render { boundary: Arc<BoundaryPolygon>, projection: WebMercator },
}

/// The mask overlay attached to a map for one boundary.
#[derive(Debug)]
pub struct MaskLayer {
    boundary: Arc<BoundaryPolygon>,
    projection: WebMercator,
    tiles: HashMap<TileCoord, Arc<MaskTile>>,
}

impl MaskLayer {
    #[must_use]
    pub fn new(boundary: Arc<BoundaryPolygon>, projection: WebMercator) -> Self {
        Self { boundary, projection, tiles: HashMap::new() }
    }

    /// The boundary this layer masks.
    #[must_use]
    pub fn boundary(&self) -> &Arc<BoundaryPolygon> {
        &self.boundary
    }

    #[must_use]
    pub fn projection(&self) -> WebMercator {
        self.projection
    }

    /// Tile for `coord`, rendered on first request and cached afterwards.
    pub fn tile(&mut self, coord: TileCoord) -> Arc<MaskTile> {
        match self.lookup(coord) {
            MaskLookup::Cached(tile) => tile,
            MaskLookup::Render { boundary, projection } => {
                self.insert(coord, render_mask_tile(coord, &boundary, &projection))
            }
        }
    }

    /// The cached tile for `coord`, or what is needed to render it elsewhere.
    ///
    /// Lets a host rasterize without holding a lock on the layer, then hand
    /// the result back through [`MaskLayer::insert`].
    #[must_use]
    pub fn lookup(&self, coord: TileCoord) -> MaskLookup {
        match self.tiles.get(&coord) {
            Some(tile) => MaskLookup::Cached(Arc::clone(tile)),
            None => MaskLookup::Render { boundary: Arc::clone(&self.boundary), projection: self.projection },
        }
    }

    /// Cache a rendered tile. An existing entry for `coord` wins so every
    /// caller shares one allocation.
    pub fn insert(&mut self, coord: TileCoord, tile: MaskTile) -> Arc<MaskTile> {
        if let Some(existing) = self.tiles.get(&coord) {
            return Arc::clone(existing);
        }
        if self.tiles.len() >= MASK_CACHE_CAPACITY {
            self.tiles.clear();
        }
        let tile = Arc::new(tile);
        self.tiles.insert(coord, Arc::clone(&tile));
        tile
    }

    /// Number of tiles currently cached.
    #[must_use]
    pub fn cached_tiles(&self) -> usize {
        self.tiles.len()
    }
}
