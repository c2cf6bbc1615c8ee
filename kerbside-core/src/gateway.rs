//! Boundaries to the external kerb-regulation and directions services.
//!
//! Both traits are synchronous so the core stays embeddable outside an async
//! runtime. Implementations perform exactly one upstream request per call and
//! never retry.

use thiserror::Error;

use crate::error::ErrorKind;
use crate::{BoundingBox, LatLon, RawKerbFeature, RoutePolyline};

/// Failures raised by gateway implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The provider could not be reached or answered with a non-success
    /// HTTP status.
    #[error("upstream {url} unavailable: {message}")]
    UpstreamUnavailable {
        /// Requested URL, without credentials.
        url: String,
        /// Transport or status description.
        message: String,
    },
    /// The provider did not answer within the configured timeout.
    #[error("upstream {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL, without credentials.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The response body did not match the expected schema.
    #[error("failed to decode response from {url}: {message}")]
    UpstreamDecode {
        /// Requested URL, without credentials.
        url: String,
        /// Decoder message.
        message: String,
    },
    /// The provider reported a failure code in an otherwise valid body.
    #[error("upstream service returned {code}: {message}")]
    Service {
        /// Provider status code, e.g. `"NoRoute"`.
        code: String,
        /// Provider message, possibly empty.
        message: String,
    },
    /// A route needs at least a start and an end.
    #[error("a route needs at least two waypoints, got {count}")]
    InsufficientWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },
}

impl GatewayError {
    /// Classify the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UpstreamUnavailable { .. } | Self::Timeout { .. } | Self::Service { .. } => {
                ErrorKind::UpstreamUnavailable
            }
            Self::UpstreamDecode { .. } => ErrorKind::UpstreamDecodeError,
            Self::InsufficientWaypoints { .. } => ErrorKind::InvalidRequest,
        }
    }
}

/// Fetch kerb segments inside a bounding box.
///
/// Features come back in provider order and provider `(lon, lat)` axis order.
/// Implementations drop features without a two-point geometry rather than
/// failing the whole response.
pub trait KerbFeatureSource {
    /// Return every kerb feature inside `bbox`.
    ///
    /// # Errors
    /// Returns [`GatewayError`] when the provider is unreachable or its
    /// response cannot be decoded.
    fn fetch_features(&self, bbox: &BoundingBox) -> Result<Vec<RawKerbFeature>, GatewayError>;
}

/// Compute a drivable route through an ordered list of waypoints.
///
/// # Examples
///
/// ```rust
/// use kerbside_core::{DirectionsProvider, GatewayError, LatLon, RoutePolyline};
///
/// struct StraightLine;
///
/// impl DirectionsProvider for StraightLine {
///     fn fetch_route(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError> {
///         if waypoints.len() < 2 {
///             return Err(GatewayError::InsufficientWaypoints { count: waypoints.len() });
///         }
///         Ok(RoutePolyline::new(waypoints.to_vec()))
///     }
/// }
///
/// let route = StraightLine.fetch_route(&[LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0)])?;
/// assert_eq!(route.len(), 2);
/// # Ok::<(), GatewayError>(())
/// ```
pub trait DirectionsProvider {
    /// Return the path visiting `waypoints` in the given order.
    ///
    /// Implementations must return
    /// `Err(GatewayError::InsufficientWaypoints { .. })` for fewer than two
    /// waypoints. Only the provider's first route is used; alternatives are
    /// ignored.
    ///
    /// # Errors
    /// Returns [`GatewayError`] when the provider is unreachable, reports a
    /// failure, or its response cannot be decoded.
    fn fetch_route(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError>;
}

impl<T: KerbFeatureSource + ?Sized> KerbFeatureSource for &T {
    fn fetch_features(&self, bbox: &BoundingBox) -> Result<Vec<RawKerbFeature>, GatewayError> {
        (**self).fetch_features(bbox)
    }
}

impl<T: KerbFeatureSource + ?Sized> KerbFeatureSource for Box<T> {
    fn fetch_features(&self, bbox: &BoundingBox) -> Result<Vec<RawKerbFeature>, GatewayError> {
        (**self).fetch_features(bbox)
    }
}

impl<T: DirectionsProvider + ?Sized> DirectionsProvider for &T {
    fn fetch_route(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError> {
        (**self).fetch_route(waypoints)
    }
}

impl<T: DirectionsProvider + ?Sized> DirectionsProvider for Box<T> {
    fn fetch_route(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError> {
        (**self).fetch_route(waypoints)
    }
}
