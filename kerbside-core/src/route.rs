//! Drivable paths returned by a directions provider.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::LatLon;

/// An ordered drivable path in internal `(lat, lon)` order.
///
/// Serialises as a JSON array of `[lat, lon]` pairs.
///
/// # Examples
/// ```
/// use kerbside_core::{LatLon, RoutePolyline};
///
/// let polyline = RoutePolyline::new(vec![LatLon::new(51.5, -0.1), LatLon::new(51.6, -0.2)]);
/// assert_eq!(polyline.len(), 2);
/// assert_eq!(polyline.points()[0], LatLon::new(51.5, -0.1));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct RoutePolyline {
    points: Vec<LatLon>,
}

impl RoutePolyline {
    /// Wrap an ordered sequence of points.
    #[must_use]
    pub const fn new(points: Vec<LatLon>) -> Self {
        Self { points }
    }

    /// Points in visiting order.
    #[must_use]
    pub fn points(&self) -> &[LatLon] {
        &self.points
    }

    /// Number of points in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Report whether the path has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consume the polyline and return its points.
    #[must_use]
    pub fn into_points(self) -> Vec<LatLon> {
        self.points
    }
}

impl FromIterator<LatLon> for RoutePolyline {
    fn from_iter<I: IntoIterator<Item = LatLon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
