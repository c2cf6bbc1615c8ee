//! Facade crate for the Kerbside parking-aware route planner.
//!
//! This crate re-exports the core domain types and planner, and exposes the
//! HTTP gateways behind the `http` feature.
//!
//! ```
//! use kerbside_core::test_support::{EchoDirectionsProvider, MemoryKerbSource};
//! use kerbside_engine::{LatLon, ParkingPlanner, RouteRequest};
//!
//! let planner = ParkingPlanner::new(MemoryKerbSource::default(), EchoDirectionsProvider);
//! let request = RouteRequest::new(LatLon::new(51.5074, -0.1278), LatLon::new(51.5581, -0.1798));
//! let route = planner.route_with_parking(&request)?;
//! assert_eq!(route.len(), 2);
//! # Ok::<(), kerbside_engine::PlanError>(())
//! ```

#![forbid(unsafe_code)]

pub use kerbside_core::{
    BoundingBox, DEFAULT_SEARCH_RADIUS_KM, DirectionsProvider, ErrorKind, GatewayError,
    KerbFeature, KerbFeatureSource, LatLon, LonLat, MAX_PARKING_WAYPOINTS, MalformedFeature,
    ParkingPlanner, ParkingSpotsRequest, PlanError, RawKerbFeature, RegulationRule,
    RequestValidationError, RoutePolyline, RouteRequest,
};

#[cfg(feature = "test-support")]
pub use kerbside_core::test_support;

#[cfg(feature = "http")]
pub use kerbside_data::directions::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
#[cfg(feature = "http")]
pub use kerbside_data::kerbspace::{HttpKerbFeatureSource, HttpKerbFeatureSourceConfig};
#[cfg(feature = "http")]
pub use kerbside_data::ProviderBuildError;
