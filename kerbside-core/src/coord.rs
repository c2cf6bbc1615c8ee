//! Typed coordinate pairs.
//!
//! Two axis orderings meet at the service boundaries:
//!
//! - [`LatLon`] is the internal ordering and the ordering returned to callers.
//! - [`LonLat`] is the provider ordering used by GeoJSON geometries and by the
//!   directions service's request path.
//!
//! The types are deliberately not interchangeable. Crossing from one ordering
//! to the other requires an explicit axis swap via [`LatLon::swap`],
//! [`LonLat::swap`] or the matching `From` conversions.

use geo::Coord;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A WGS84 position in internal `(latitude, longitude)` order.
///
/// Serialises as a two-element `[lat, lon]` array.
///
/// # Examples
/// ```
/// use kerbside_core::{LatLon, LonLat};
///
/// let point = LatLon::new(51.5581, -0.1798);
/// let provider: LonLat = point.swap();
/// assert_eq!(provider.lon, -0.1798);
/// assert_eq!(provider.swap(), point);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<f64>", into = "[f64; 2]")
)]
pub struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// A WGS84 position in provider `(longitude, latitude)` order.
///
/// Serialises as a two-element `[lon, lat]` array. Extra trailing elements
/// such as altitude are ignored when decoding.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<f64>", into = "[f64; 2]")
)]
pub struct LonLat {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

/// Raised when a coordinate array carries fewer than two values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("coordinate must contain at least two values, found {found}")]
pub struct CoordinateArityError {
    /// Number of values present in the array.
    pub found: usize,
}

impl LatLon {
    /// Construct a position from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Swap to provider `(lon, lat)` order.
    #[must_use]
    pub const fn swap(self) -> LonLat {
        LonLat {
            lon: self.lon,
            lat: self.lat,
        }
    }

    /// Report whether both axes are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_latitude(self.lat) && is_valid_longitude(self.lon)
    }
}

impl LonLat {
    /// Construct a position from longitude and latitude.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Swap to internal `(lat, lon)` order.
    #[must_use]
    pub const fn swap(self) -> LatLon {
        LatLon {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Report whether `lat` is finite and within `[-90, 90]`.
#[must_use]
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

/// Report whether `lon` is finite and within `[-180, 180]`.
#[must_use]
pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (-180.0..=180.0).contains(&lon)
}

impl From<LonLat> for LatLon {
    fn from(value: LonLat) -> Self {
        value.swap()
    }
}

impl From<LatLon> for LonLat {
    fn from(value: LatLon) -> Self {
        value.swap()
    }
}

impl From<LonLat> for Coord<f64> {
    fn from(value: LonLat) -> Self {
        Self {
            x: value.lon,
            y: value.lat,
        }
    }
}

impl From<LatLon> for Coord<f64> {
    fn from(value: LatLon) -> Self {
        value.swap().into()
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(value: LatLon) -> Self {
        [value.lat, value.lon]
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(value: LonLat) -> Self {
        [value.lon, value.lat]
    }
}

impl TryFrom<Vec<f64>> for LatLon {
    type Error = CoordinateArityError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [lat, lon, ..] => Ok(Self::new(*lat, *lon)),
            _ => Err(CoordinateArityError {
                found: values.len(),
            }),
        }
    }
}

impl TryFrom<Vec<f64>> for LonLat {
    type Error = CoordinateArityError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [lon, lat, ..] => Ok(Self::new(*lon, *lat)),
            _ => Err(CoordinateArityError {
                found: values.len(),
            }),
        }
    }
}
