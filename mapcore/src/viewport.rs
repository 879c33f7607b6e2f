//! Viewport state and the controller that fits it to the fair boundary.
//!
//! The viewport is a map-surface camera: a center, an integer zoom and a size
//! in CSS pixels. All geometry runs in the global pixel space of
//! [`WebMercator`] at the current zoom.
//!
//! Max bounds keep the view inside a geographic rectangle. Panning that
//! overshoots is pulled back by `max_bounds_viscosity` (1.0 stops the view
//! dead at the edge, 0.0 lets it run free until [`Viewport::settle`]).

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use geo::{Rect, coord};
use serde::Serialize;

use crate::boundary::BoundaryPolygon;
use crate::consts::{
    BOUNDARY_VISCOSITY, FIT_PADDING_PX, INITIAL_CENTER_LAT, INITIAL_CENTER_LNG, MAX_ZOOM, MIN_ZOOM,
};
use crate::point::LatLng;
use crate::projection::{PixelPoint, TileCoord, WebMercator};

/// Camera over the map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub max_bounds: Option<Rect<f64>>,
    pub max_bounds_viscosity: f64,
    projection: WebMercator,
}

/// Serializable view of a [`Viewport`] for the HTTP surface and CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportView {
    pub width: f64,
    pub height: f64,
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// `[south_west, north_east]`.
    pub max_bounds: Option<[LatLng; 2]>,
    pub max_bounds_viscosity: f64,
}

impl Viewport {
    /// A viewport at the initial map center, zoomed out as far as allowed.
    #[must_use]
    pub fn new(width: f64, height: f64, projection: WebMercator) -> Self {
        Self {
            width,
            height,
            center: LatLng::new(INITIAL_CENTER_LAT, INITIAL_CENTER_LNG),
            zoom: MIN_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            max_bounds: None,
            max_bounds_viscosity: 0.0,
            projection,
        }
    }

    #[must_use]
    pub fn projection(&self) -> &WebMercator {
        &self.projection
    }

    /// Largest zoom at which `bounds` plus `padding` on every side fits the view.
    #[must_use]
    pub fn bounds_zoom(&self, bounds: Rect<f64>, padding: f64) -> u8 {
        let (nw, se) = self.project_rect(bounds, 0.0);
        let bw = se.x - nw.x;
        let bh = se.y - nw.y;
        let avail_w = self.width - 2.0 * padding;
        let avail_h = self.height - 2.0 * padding;

        let scale = (avail_w / bw).min(avail_h / bh);
        // Round to 1/100 first so 15.9999999 floors to 16, not 15.
        let zoom = ((scale.log2() * 100.0).round() / 100.0).floor();
        self.clamp_zoom(zoom)
    }

    /// Center and zoom the view on `bounds` with `padding` pixels on each side.
    pub fn fit_bounds(&mut self, bounds: Rect<f64>, padding: f64) {
        let zoom = self.bounds_zoom(bounds, padding);
        let (nw, se) = self.project_rect(bounds, f64::from(zoom));
        let mid = PixelPoint::new((nw.x + se.x) / 2.0, (nw.y + se.y) / 2.0);
        let center = self.projection.unproject(mid, f64::from(zoom));
        self.set_view(center, zoom);
    }

    /// Move to `center` at `zoom`, clamped to zoom limits and max bounds.
    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.zoom = zoom;
        self.center = self.limit_center(center, zoom);
    }

    /// Change zoom around the current center.
    pub fn set_zoom(&mut self, zoom: u8) {
        self.set_view(self.center, zoom);
    }

    /// Install (or clear) max bounds and pull the view inside them.
    pub fn set_max_bounds(&mut self, bounds: Option<Rect<f64>>) {
        self.max_bounds = bounds;
        self.settle();
    }

    /// The center closest to `center` whose view at `zoom` lies inside max bounds.
    ///
    /// On an axis where the view is larger than the bounds, the view is
    /// centered on the bounds instead. Offsets of one pixel or less are ignored.
    #[must_use]
    pub fn limit_center(&self, center: LatLng, zoom: u8) -> LatLng {
        let Some(bounds) = self.max_bounds else {
            return center;
        };
        let z = f64::from(zoom);
        let c = self.projection.project(center, z);
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let view_min = PixelPoint::new(c.x - half_w, c.y - half_h);
        let view_max = PixelPoint::new(c.x + half_w, c.y + half_h);

        let (b_min, b_max) = self.project_rect(bounds, z);
        let dx = rebound(b_min.x - view_min.x, view_max.x - b_max.x);
        let dy = rebound(b_min.y - view_min.y, view_max.y - b_max.y);
        if dx.abs() <= 1.0 && dy.abs() <= 1.0 {
            return center;
        }
        self.projection.unproject(PixelPoint::new(c.x + dx, c.y + dy), z)
    }

    /// Drag the view by a pixel offset. Positive `dx` moves the view east.
    ///
    /// Any part of the move that would leave max bounds is scaled back by
    /// the viscosity.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let z = f64::from(self.zoom);
        let c = self.projection.project(self.center, z);
        let proposed = PixelPoint::new(c.x + dx, c.y + dy);
        let proposed_ll = self.projection.unproject(proposed, z);
        if self.max_bounds.is_none() {
            self.center = proposed_ll;
            return;
        }

        let limited = self.projection.project(self.limit_center(proposed_ll, self.zoom), z);
        let v = self.max_bounds_viscosity;
        let x = proposed.x - (proposed.x - limited.x) * v;
        let y = proposed.y - (proposed.y - limited.y) * v;
        self.center = self.projection.unproject(PixelPoint::new(x, y), z);
    }

    /// End of a drag: snap fully inside max bounds.
    pub fn settle(&mut self) {
        self.center = self.limit_center(self.center, self.zoom);
    }

    /// Geographic extent of the current view (`x = lng`, `y = lat`).
    #[must_use]
    pub fn bounds(&self) -> Rect<f64> {
        let (min, max) = self.pixel_bounds();
        let z = f64::from(self.zoom);
        let nw = self.projection.unproject(min, z);
        let se = self.projection.unproject(max, z);
        Rect::new(coord! { x: nw.lng, y: nw.lat }, coord! { x: se.lng, y: se.lat })
    }

    /// Tiles covering the current view, row by row from the north-west.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        let (min, max) = self.pixel_bounds();
        let size = f64::from(self.projection.tile_size());
        let last = f64::from((1u32 << self.zoom.min(31)) - 1);
        let clamp = |v: f64| v.clamp(0.0, last) as u32;

        let x0 = clamp((min.x / size).floor());
        let y0 = clamp((min.y / size).floor());
        let x1 = clamp((max.x / size).ceil() - 1.0);
        let y1 = clamp((max.y / size).ceil() - 1.0);

        let mut tiles = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                tiles.push(TileCoord::new(x, y, self.zoom));
            }
        }
        tiles
    }

    #[must_use]
    pub fn view(&self) -> ViewportView {
        ViewportView {
            width: self.width,
            height: self.height,
            center: self.center,
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            max_bounds: self.max_bounds.map(|b| {
                [LatLng::new(b.min().y, b.min().x), LatLng::new(b.max().y, b.max().x)]
            }),
            max_bounds_viscosity: self.max_bounds_viscosity,
        }
    }

    fn pixel_bounds(&self) -> (PixelPoint, PixelPoint) {
        let c = self.projection.project(self.center, f64::from(self.zoom));
        (
            PixelPoint::new(c.x - self.width / 2.0, c.y - self.height / 2.0),
            PixelPoint::new(c.x + self.width / 2.0, c.y + self.height / 2.0),
        )
    }

    /// Project a geographic rect to its `(north_west, south_east)` pixel corners.
    fn project_rect(&self, bounds: Rect<f64>, zoom: f64) -> (PixelPoint, PixelPoint) {
        let nw = self
            .projection
            .project(LatLng::new(bounds.max().y, bounds.min().x), zoom);
        let se = self
            .projection
            .project(LatLng::new(bounds.min().y, bounds.max().x), zoom);
        (nw, se)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn clamp_zoom(&self, zoom: f64) -> u8 {
        let lo = f64::from(self.min_zoom);
        let hi = f64::from(self.max_zoom);
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.clamp(lo, hi) as u8
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, WebMercator::default())
    }
}

/// Offset that moves a view back inside bounds on one axis.
///
/// `left` is how far the view sticks out past the low edge, `right` past the
/// high edge. Both positive means the view is wider than the bounds.
fn rebound(left: f64, right: f64) -> f64 {
    if left + right > 0.0 {
        (left - right).round() / 2.0
    } else {
        left.ceil().max(0.0) - right.floor().max(0.0)
    }
}

/// Fit the viewport to the boundary and lock panning to its bounding box.
///
/// Does nothing when no boundary is available.
pub fn fit_to_boundary(viewport: &mut Viewport, boundary: Option<&BoundaryPolygon>) {
    let Some(boundary) = boundary else {
        return;
    };
    let bounds = boundary.bounds();
    viewport.set_max_bounds(Some(bounds));
    viewport.fit_bounds(bounds, FIT_PADDING_PX);
    viewport.max_bounds_viscosity = BOUNDARY_VISCOSITY;
    tracing::debug!(zoom = viewport.zoom, lat = viewport.center.lat, lng = viewport.center.lng, "viewport fitted to boundary");
}
