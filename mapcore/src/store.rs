//! Point store: the ordered sequence of points for the current session.
//!
//! The store never mutates in place. Every change is a whole new sequence
//! handed to [`PointStore::replace_all`], and readers that kept a
//! [`PointStore::snapshot`] continue to see the sequence they took.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use crate::point::{GeoPoint, LatLng, Marker};

/// Ordered, replace-only collection of [`GeoPoint`]s.
#[derive(Debug, Clone)]
pub struct PointStore {
    points: Arc<[GeoPoint]>,
}

impl PointStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { points: Arc::from(Vec::new()) }
    }

    /// Swap in a complete new sequence.
    pub fn replace_all(&mut self, points: Vec<GeoPoint>) {
        self.points = Arc::from(points);
    }

    /// Borrow the current sequence.
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Shared handle to the current sequence. Unaffected by later replacements.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[GeoPoint]> {
        Arc::clone(&self.points)
    }

    /// Index of the first point strictly closer than `epsilon` to `at`.
    #[must_use]
    pub fn find_near(&self, at: LatLng, epsilon: f64) -> Option<usize> {
        find_near(&self.points, at, epsilon)
    }

    /// Markers for every point, in store order.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.points.iter().map(Marker::from).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for PointStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Proximity search over any point slice. Distance `>= epsilon` never matches.
#[must_use]
pub fn find_near(points: &[GeoPoint], at: LatLng, epsilon: f64) -> Option<usize> {
    points
        .iter()
        .position(|p| p.coordinates.planar_distance(at) < epsilon)
}
