//! Core domain types and pipeline for the Kerbside engine.
//!
//! The crate turns a destination into a driving route that visits the
//! largest nearby kerb parking segments. Geometry, filtering and ranking are
//! pure; the two external services sit behind [`KerbFeatureSource`] and
//! [`DirectionsProvider`].
//!
//! Coordinates are held as [`LatLon`] internally. Provider payloads use
//! `(lon, lat)` and are represented by [`LonLat`] until normalised.

pub mod bbox;
pub mod coord;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod geo_math;
pub mod kerb;
pub mod planner;
pub mod request;
pub mod route;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod waypoints;

pub use bbox::BoundingBox;
pub use coord::{CoordinateArityError, LatLon, LonLat};
pub use error::{ErrorKind, PlanError};
pub use gateway::{DirectionsProvider, GatewayError, KerbFeatureSource};
pub use kerb::{KerbFeature, MalformedFeature, RawKerbFeature, Regulated, RegulationRule};
pub use planner::ParkingPlanner;
pub use request::{
    DEFAULT_SEARCH_RADIUS_KM, ParkingSpotsRequest, RequestValidationError, RouteRequest,
};
pub use route::RoutePolyline;
pub use waypoints::MAX_PARKING_WAYPOINTS;
