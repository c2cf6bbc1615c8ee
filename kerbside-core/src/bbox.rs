//! Geographic search boxes.

use geo::{Contains, Coord, Rect};

use crate::LatLon;
use crate::geo_math::expand_bounding_box;

/// A rectangular query region defined by its south-west and north-east
/// corners in internal `(lat, lon)` order.
///
/// # Examples
/// ```
/// use kerbside_core::{BoundingBox, LatLon};
///
/// let centre = LatLon::new(51.5581, -0.1798);
/// let bbox = BoundingBox::around(centre, 0.25);
/// assert!(bbox.contains(centre));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum latitude and longitude corner.
    pub south_west: LatLon,
    /// Maximum latitude and longitude corner.
    pub north_east: LatLon,
}

impl BoundingBox {
    /// Build the box extending `radius_km` in every direction from `centre`.
    #[must_use]
    pub fn around(centre: LatLon, radius_km: f64) -> Self {
        expand_bounding_box(centre, radius_km)
    }

    /// Return the box as a `geo` rectangle with `x = lon` and `y = lat`.
    #[must_use]
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord::from(self.south_west),
            Coord::from(self.north_east),
        )
    }

    /// Report whether `point` lies strictly inside the box.
    #[must_use]
    pub fn contains(&self, point: LatLon) -> bool {
        self.to_rect().contains(&Coord::from(point))
    }

    /// Format the box as the kerb provider's `viewport` query value:
    /// `sw.lat,sw.lon,ne.lat,ne.lon` with six decimal places.
    #[must_use]
    pub fn viewport(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            self.south_west.lat, self.south_west.lon, self.north_east.lat, self.north_east.lon
        )
    }
}
