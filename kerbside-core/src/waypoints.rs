//! Rank parking candidates and compose the waypoint sequence.
//!
//! Candidates are ordered by estimated capacity only. The middle of the
//! sequence follows that ranking rather than any spatial order; the
//! directions provider visits waypoints exactly as given.

use crate::{KerbFeature, LatLon};

/// Maximum number of parking stops in one directions request.
///
/// The provider accepts 23 coordinates, two of which are the fixed start and
/// destination.
pub const MAX_PARKING_WAYPOINTS: usize = 21;

/// Sort candidates by estimated capacity, largest first, and keep at most
/// [`MAX_PARKING_WAYPOINTS`].
///
/// The sort is stable, so equal capacities keep provider order.
#[must_use]
pub fn rank_candidates(mut candidates: Vec<KerbFeature>) -> Vec<KerbFeature> {
    candidates.sort_by(|a, b| b.estimated_capacity.cmp(&a.estimated_capacity));
    candidates.truncate(MAX_PARKING_WAYPOINTS);
    candidates
}

/// Compose `[start, ranked parking entry points..., end]`.
///
/// # Examples
/// ```
/// use kerbside_core::LatLon;
/// use kerbside_core::waypoints::build_waypoints;
///
/// let start = LatLon::new(51.50, -0.12);
/// let end = LatLon::new(51.55, -0.18);
/// let waypoints = build_waypoints(start, end, Vec::new());
/// assert_eq!(waypoints, vec![start, end]);
/// ```
#[must_use]
pub fn build_waypoints(start: LatLon, end: LatLon, candidates: Vec<KerbFeature>) -> Vec<LatLon> {
    let ranked = rank_candidates(candidates);
    let mut waypoints = Vec::with_capacity(ranked.len() + 2);
    waypoints.push(start);
    waypoints.extend(ranked.iter().map(KerbFeature::entry_point));
    waypoints.push(end);
    waypoints
}
