use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::boundary::BoundaryPolygon;
use crate::input::{ClickOutcome, Confirm, handle_click};
use crate::mask::{MaskLayer, MaskLookup, MaskTile};
use crate::point::{GeoPoint, LatLng, Marker};
use crate::projection::{TileCoord, WebMercator};
use crate::store::PointStore;
use crate::viewport::{Viewport, ViewportView, fit_to_boundary};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from editor operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    PointAdded(GeoPoint),
    PointRemoved(GeoPoint),
    RemovalDeclined(GeoPoint),
    PointsLoaded { count: usize },
    ViewportFitted(ViewportView),
    MaskAttached,
    MaskDetached,
}

/// Progress of one of the two initial loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl LoadState {
    #[must_use]
    pub fn is_settled(self) -> bool {
        self != LoadState::Pending
    }
}

/// Editor state for one map session, independent of any I/O.
///
/// Loads are applied in whatever order they resolve. The boundary drives the
/// viewport fit and the mask layer; the point list drives the store. Clicks
/// are ignored until both loads have settled, successfully or not.
#[derive(Debug)]
pub struct EditorCore {
    pub store: PointStore,
    pub viewport: Viewport,
    boundary: Option<Arc<BoundaryPolygon>>,
    mask: Option<MaskLayer>,
    boundary_state: LoadState,
    points_state: LoadState,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            store: PointStore::new(),
            viewport,
            boundary: None,
            mask: None,
            boundary_state: LoadState::Pending,
            points_state: LoadState::Pending,
        }
    }

    // --- Data inputs ---

    /// Install a boundary: drop the old mask, fit the viewport, attach a new mask.
    pub fn load_boundary(&mut self, boundary: BoundaryPolygon) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.mask.take().is_some() {
            actions.push(Action::MaskDetached);
        }

        let polygons = boundary.polygons().0.len();
        let boundary = Arc::new(boundary);
        self.boundary = Some(Arc::clone(&boundary));
        self.boundary_state = LoadState::Loaded;

        fit_to_boundary(&mut self.viewport, Some(&boundary));
        actions.push(Action::ViewportFitted(self.viewport.view()));

        self.mask = Some(MaskLayer::new(boundary, *self.viewport.projection()));
        actions.push(Action::MaskAttached);

        info!(polygons, zoom = self.viewport.zoom, "boundary loaded");
        actions
    }

    /// The boundary load failed. Any boundary already present is kept.
    pub fn boundary_failed(&mut self) {
        warn!("boundary unavailable; map stays unmasked");
        self.boundary_state = LoadState::Failed;
    }

    /// Replace the store with the initial point list.
    pub fn load_points(&mut self, points: Vec<GeoPoint>) -> Action {
        let count = points.len();
        self.store.replace_all(points);
        self.points_state = LoadState::Loaded;
        info!(count, "points loaded");
        Action::PointsLoaded { count }
    }

    /// The points load failed. The store keeps its current contents.
    pub fn points_failed(&mut self) {
        warn!("points unavailable; starting from the current set");
        self.points_state = LoadState::Failed;
    }

    // --- Interaction ---

    /// Resolve a map click. Returns [`Action::None`] until the map is interactive.
    pub fn on_click<C: Confirm + ?Sized>(&mut self, at: LatLng, confirm: &mut C) -> Action {
        if !self.is_interactive() {
            debug!(lat = at.lat, lng = at.lng, "click ignored; loads still pending");
            return Action::None;
        }
        let current = self.store.snapshot();
        let outcome = handle_click(&current, at, confirm, |next| self.store.replace_all(next));
        debug!(?outcome, "click resolved");
        match outcome {
            ClickOutcome::Added(p) => Action::PointAdded(p),
            ClickOutcome::Removed(p) => Action::PointRemoved(p),
            ClickOutcome::Declined(p) => Action::RemovalDeclined(p),
        }
    }

    /// Resize the map surface and refit to the boundary, if any.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Action {
        self.viewport.width = width;
        self.viewport.height = height;
        match self.boundary.as_deref() {
            Some(boundary) => {
                fit_to_boundary(&mut self.viewport, Some(boundary));
                Action::ViewportFitted(self.viewport.view())
            }
            None => Action::None,
        }
    }

    /// Mask tile for `coord`, or `None` while no boundary is attached.
    pub fn mask_tile(&mut self, coord: TileCoord) -> Option<Arc<MaskTile>> {
        self.mask.as_mut().map(|layer| layer.tile(coord))
    }

    /// Cached mask tile for `coord`, or the inputs to render it off-lock.
    /// `None` while no mask is attached.
    #[must_use]
    pub fn mask_lookup(&self, coord: TileCoord) -> Option<MaskLookup> {
        self.mask.as_ref().map(|layer| layer.lookup(coord))
    }

    /// Hand back a tile rendered from a [`MaskLookup::Render`].
    ///
    /// The tile is cached only if the mask it was rendered for is still
    /// attached; a tile for a replaced or detached boundary is returned
    /// uncached.
    pub fn store_mask_tile(&mut self, coord: TileCoord, rendered_for: &Arc<BoundaryPolygon>, tile: MaskTile) -> Arc<MaskTile> {
        match self.mask.as_mut() {
            Some(layer) if Arc::ptr_eq(layer.boundary(), rendered_for) => layer.insert(coord, tile),
            _ => {
                debug!(z = coord.z, x = coord.x, y = coord.y, "mask changed during render; tile not cached");
                Arc::new(tile)
            }
        }
    }

    /// Detach the mask. The boundary and points are kept.
    pub fn teardown(&mut self) -> Vec<Action> {
        match self.mask.take() {
            Some(_) => vec![Action::MaskDetached],
            None => Vec::new(),
        }
    }

    // --- Queries ---

    /// Both initial loads have settled.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.boundary_state.is_settled() && self.points_state.is_settled()
    }

    #[must_use]
    pub fn boundary_state(&self) -> LoadState {
        self.boundary_state
    }

    #[must_use]
    pub fn points_state(&self) -> LoadState {
        self.points_state
    }

    #[must_use]
    pub fn boundary(&self) -> Option<&Arc<BoundaryPolygon>> {
        self.boundary.as_ref()
    }

    #[must_use]
    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    /// Current point sequence, for an external save.
    #[must_use]
    pub fn points(&self) -> Arc<[GeoPoint]> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.store.markers()
    }

    #[must_use]
    pub fn projection(&self) -> WebMercator {
        *self.viewport.projection()
    }
}
