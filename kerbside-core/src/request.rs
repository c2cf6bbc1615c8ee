//! Caller requests for parking searches and parking-aware routes.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::LatLon;
use crate::coord::{is_valid_latitude, is_valid_longitude};
use crate::filter::reason_filter;

/// Search radius applied when a request leaves it unset or zero.
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 0.25;

/// Validation failures for caller-supplied coordinates and radii.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestValidationError {
    /// A latitude was non-finite or outside `[-90, 90]`.
    #[error("{field} latitude {value} is outside [-90, 90]")]
    InvalidLatitude {
        /// Which coordinate was rejected.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A longitude was non-finite or outside `[-180, 180]`.
    #[error("{field} longitude {value} is outside [-180, 180]")]
    InvalidLongitude {
        /// Which coordinate was rejected.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The search radius was negative or non-finite.
    #[error("search radius {value} km must be a finite, non-negative number")]
    InvalidRadius {
        /// The rejected value.
        value: f64,
    },
}

fn validate_point(field: &'static str, point: LatLon) -> Result<(), RequestValidationError> {
    if !is_valid_latitude(point.lat) {
        return Err(RequestValidationError::InvalidLatitude {
            field,
            value: point.lat,
        });
    }
    if !is_valid_longitude(point.lon) {
        return Err(RequestValidationError::InvalidLongitude {
            field,
            value: point.lon,
        });
    }
    Ok(())
}

fn validate_radius(radius_km: Option<f64>) -> Result<(), RequestValidationError> {
    match radius_km {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(RequestValidationError::InvalidRadius { value })
        }
        _ => Ok(()),
    }
}

fn effective_radius(radius_km: Option<f64>) -> f64 {
    radius_km
        .filter(|value| *value > 0.0)
        .unwrap_or(DEFAULT_SEARCH_RADIUS_KM)
}

/// Find parking spots around a point.
///
/// # Examples
/// ```
/// use kerbside_core::{LatLon, ParkingSpotsRequest};
///
/// let request = ParkingSpotsRequest::new(LatLon::new(51.5581, -0.1798));
/// assert_eq!(request.radius_km(), 0.25);
/// assert_eq!(request.reason(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParkingSpotsRequest {
    /// Centre of the search.
    pub centre: LatLon,
    /// Half-width of the search box in kilometres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius_km: Option<f64>,
    /// Regulation reason to match; empty or absent means no filter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reason: Option<String>,
}

impl ParkingSpotsRequest {
    /// Build a request with the default radius and no reason filter.
    #[must_use]
    pub const fn new(centre: LatLon) -> Self {
        Self {
            centre,
            radius_km: None,
            reason: None,
        }
    }

    /// Set the search radius.
    #[must_use]
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Set the regulation reason filter.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Radius to search, falling back to [`DEFAULT_SEARCH_RADIUS_KM`].
    #[must_use]
    pub fn radius_km(&self) -> f64 {
        effective_radius(self.radius_km)
    }

    /// Reason filter, with empty strings treated as absent.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        reason_filter(self.reason.as_deref())
    }

    /// Check coordinates and radius.
    ///
    /// # Errors
    /// Returns [`RequestValidationError`] for out-of-range input.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        validate_point("centre", self.centre)?;
        validate_radius(self.radius_km)
    }
}

/// Plan a route from `start` to `end` that detours through parking near the
/// destination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteRequest {
    /// Journey origin.
    pub start: LatLon,
    /// Destination; parking is searched around this point.
    pub end: LatLon,
    /// Half-width of the parking search box in kilometres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius_km: Option<f64>,
    /// Regulation reason to match; empty or absent means no filter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reason: Option<String>,
}

impl RouteRequest {
    /// Build a request with the default radius and no reason filter.
    #[must_use]
    pub const fn new(start: LatLon, end: LatLon) -> Self {
        Self {
            start,
            end,
            radius_km: None,
            reason: None,
        }
    }

    /// Set the search radius.
    #[must_use]
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Set the regulation reason filter.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Radius to search, falling back to [`DEFAULT_SEARCH_RADIUS_KM`].
    #[must_use]
    pub fn radius_km(&self) -> f64 {
        effective_radius(self.radius_km)
    }

    /// Reason filter, with empty strings treated as absent.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        reason_filter(self.reason.as_deref())
    }

    /// The parking search around the destination.
    #[must_use]
    pub fn parking_search(&self) -> ParkingSpotsRequest {
        ParkingSpotsRequest {
            centre: self.end,
            radius_km: self.radius_km,
            reason: self.reason.clone(),
        }
    }

    /// Check coordinates and radius.
    ///
    /// # Errors
    /// Returns [`RequestValidationError`] for out-of-range input.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        validate_point("start", self.start)?;
        validate_point("end", self.end)?;
        validate_radius(self.radius_km)
    }
}
