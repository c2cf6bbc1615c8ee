//! Deterministic gateway doubles used by unit, behaviour and CLI tests.
//!
//! Compiled for this crate's own tests and, elsewhere, only with the
//! `test-support` feature.

use std::cell::RefCell;

use geo::{Coord, Intersects};

use crate::{
    BoundingBox, DirectionsProvider, GatewayError, KerbFeatureSource, LatLon, RawKerbFeature,
    RoutePolyline,
};

/// In-memory [`KerbFeatureSource`] returning features whose first point lies
/// inside the requested box.
///
/// The source performs a linear scan and is intended only for small datasets.
#[derive(Default, Debug, Clone)]
pub struct MemoryKerbSource {
    features: Vec<RawKerbFeature>,
}

impl MemoryKerbSource {
    /// Create a source from a collection of kerb features.
    pub fn with_features<I>(features: I) -> Self
    where
        I: IntoIterator<Item = RawKerbFeature>,
    {
        Self {
            features: features.into_iter().collect(),
        }
    }
}

impl KerbFeatureSource for MemoryKerbSource {
    fn fetch_features(&self, bbox: &BoundingBox) -> Result<Vec<RawKerbFeature>, GatewayError> {
        let rect = bbox.to_rect();
        Ok(self
            .features
            .iter()
            // `Intersects` treats boundary points as inside the rectangle.
            .filter(|feature| rect.intersects(&Coord::from(feature.segment[0])))
            .cloned()
            .collect())
    }
}

/// [`KerbFeatureSource`] that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingKerbSource {
    error: GatewayError,
}

impl FailingKerbSource {
    /// Fail every lookup with `error`.
    pub const fn new(error: GatewayError) -> Self {
        Self { error }
    }
}

impl KerbFeatureSource for FailingKerbSource {
    fn fetch_features(&self, _bbox: &BoundingBox) -> Result<Vec<RawKerbFeature>, GatewayError> {
        Err(self.error.clone())
    }
}

/// [`DirectionsProvider`] whose route is the waypoints themselves.
#[derive(Default, Debug, Copy, Clone)]
pub struct EchoDirectionsProvider;

impl DirectionsProvider for EchoDirectionsProvider {
    fn fetch_route(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError> {
        if waypoints.len() < 2 {
            return Err(GatewayError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        Ok(RoutePolyline::new(waypoints.to_vec()))
    }
}

/// [`DirectionsProvider`] that echoes waypoints and remembers every request.
#[derive(Default, Debug)]
pub struct RecordingDirectionsProvider {
    requests: RefCell<Vec<Vec<LatLon>>>,
}

impl RecordingDirectionsProvider {
    /// Waypoint lists received so far, oldest first.
    pub fn requests(&self) -> Vec<Vec<LatLon>> {
        self.requests.borrow().clone()
    }
}

impl DirectionsProvider for RecordingDirectionsProvider {
    fn fetch_route(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError> {
        self.requests.borrow_mut().push(waypoints.to_vec());
        EchoDirectionsProvider.fetch_route(waypoints)
    }
}

/// [`DirectionsProvider`] that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingDirectionsProvider {
    error: GatewayError,
}

impl FailingDirectionsProvider {
    /// Fail every lookup with `error`.
    pub const fn new(error: GatewayError) -> Self {
        Self { error }
    }
}

impl DirectionsProvider for FailingDirectionsProvider {
    fn fetch_route(&self, _waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError> {
        Err(self.error.clone())
    }
}
