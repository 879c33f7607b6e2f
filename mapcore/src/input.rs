//! Click handling: turns a map click into a point-store replacement.
//!
//! A click within [`PROXIMITY_EPSILON`] of an existing point asks the injected
//! [`Confirm`] capability whether to remove that point; any other click
//! appends a new point in the default zone. The handler never touches the
//! store directly. It computes the next sequence and hands it to the caller's
//! replace callback.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{PROXIMITY_EPSILON, REMOVE_POINT_PROMPT};
use crate::point::{GeoPoint, LatLng};
use crate::store::find_near;

/// Yes/no prompt supplied by the host (dialog, request flag, test stub).
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// What a single click resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// No point nearby; a new one was appended.
    Added(GeoPoint),
    /// A nearby point was removed after confirmation.
    Removed(GeoPoint),
    /// A nearby point was found but removal was declined.
    Declined(GeoPoint),
}

/// Resolve a click at `at` against `current`.
///
/// `replace` is called with the complete next sequence when the click
/// changes anything, and not at all when removal is declined.
pub fn handle_click<C, R>(current: &[GeoPoint], at: LatLng, confirm: &mut C, replace: R) -> ClickOutcome
where
    C: Confirm + ?Sized,
    R: FnOnce(Vec<GeoPoint>),
{
    if let Some(index) = find_near(current, at, PROXIMITY_EPSILON) {
        let target = current[index];
        if !confirm.confirm(REMOVE_POINT_PROMPT) {
            return ClickOutcome::Declined(target);
        }
        replace(without(current, index));
        return ClickOutcome::Removed(target);
    }

    let added = GeoPoint::at(at);
    replace(with_appended(current, added));
    ClickOutcome::Added(added)
}

fn with_appended(current: &[GeoPoint], point: GeoPoint) -> Vec<GeoPoint> {
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.push(point);
    next
}

fn without(current: &[GeoPoint], index: usize) -> Vec<GeoPoint> {
    current
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, p)| *p)
        .collect()
}
