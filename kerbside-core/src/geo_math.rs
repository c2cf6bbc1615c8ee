//! Spherical helpers for kerb segment lengths and search boxes.
//!
//! Distances use the haversine formula over a spherical Earth of radius
//! [`EARTH_RADIUS_KM`]. The formula is kept in its textbook form (half-angle
//! sine products and `atan2` of the square-root ratio) so capacity estimates
//! are reproducible across implementations.
//!
//! Bounding boxes use an equirectangular approximation and are not valid near
//! the poles or across the antimeridian; no clamping is performed.

use std::f64::consts::PI;

use crate::{BoundingBox, LatLon};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average car length in kilometres (five metres).
pub const AVERAGE_CAR_LENGTH_KM: f64 = 0.005;

/// Convert degrees to radians.
///
/// # Examples
/// ```
/// use kerbside_core::geo_math::to_radians;
///
/// assert!((to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
/// ```
#[expect(clippy::float_arithmetic, reason = "angle conversion")]
#[must_use]
pub fn to_radians(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// Convert radians to degrees.
#[expect(clippy::float_arithmetic, reason = "angle conversion")]
#[must_use]
pub fn to_degrees(rad: f64) -> f64 {
    rad * (180.0 / PI)
}

/// Great-circle distance between two points in kilometres.
///
/// # Examples
/// ```
/// use kerbside_core::LatLon;
/// use kerbside_core::geo_math::great_circle_distance_km;
///
/// let a = LatLon::new(51.5581, -0.1798);
/// assert_eq!(great_circle_distance_km(a, a), 0.0);
/// ```
#[expect(clippy::float_arithmetic, reason = "haversine formula")]
#[must_use]
pub fn great_circle_distance_km(a: LatLon, b: LatLon) -> f64 {
    let d_lat = to_radians(b.lat - a.lat);
    let d_lon = to_radians(b.lon - a.lon);
    let h = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + to_radians(a.lat).cos()
            * to_radians(b.lat).cos()
            * (d_lon / 2.0).sin()
            * (d_lon / 2.0).sin();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Shift `point` by `north_km` kilometres along the meridian and `east_km`
/// kilometres along the parallel.
///
/// The longitude shift is divided by `cos(lat)` to account for meridian
/// convergence. Negative offsets move south and west respectively.
#[expect(clippy::float_arithmetic, reason = "equirectangular offset")]
#[must_use]
pub fn offset_km(point: LatLon, north_km: f64, east_km: f64) -> LatLon {
    let lat = point.lat + to_degrees(north_km / EARTH_RADIUS_KM);
    let lon = point.lon + to_degrees(east_km / EARTH_RADIUS_KM) / to_radians(point.lat).cos();
    LatLon::new(lat, lon)
}

/// Expand a centre point into a square search box of half-width `radius_km`.
///
/// # Examples
/// ```
/// use kerbside_core::LatLon;
/// use kerbside_core::geo_math::expand_bounding_box;
///
/// let centre = LatLon::new(51.5581, -0.1798);
/// let bbox = expand_bounding_box(centre, 0.05);
/// assert!(bbox.south_west.lat < centre.lat && centre.lat < bbox.north_east.lat);
/// ```
#[expect(clippy::float_arithmetic, reason = "negating the search radius")]
#[must_use]
pub fn expand_bounding_box(centre: LatLon, radius_km: f64) -> BoundingBox {
    BoundingBox {
        south_west: offset_km(centre, -radius_km, -radius_km),
        north_east: offset_km(centre, radius_km, radius_km),
    }
}
