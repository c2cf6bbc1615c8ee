//! The parking-aware route planning pipeline.
//!
//! ```text
//! request -> bounding box -> kerb features -> filter/score -> rank/compose
//!         -> directions -> polyline
//! ```
//!
//! The two gateway calls run sequentially: waypoints are unknown until the
//! kerb features have been ranked.

use log::{debug, info, warn};

use crate::filter::filter_and_score;
use crate::waypoints::build_waypoints;
use crate::{
    BoundingBox, DirectionsProvider, KerbFeature, KerbFeatureSource, LatLon, ParkingSpotsRequest,
    PlanError, RequestValidationError, RoutePolyline, RouteRequest,
};

/// Plans routes that detour through the best kerb parking near a destination.
///
/// The planner is generic over its two gateways so tests can substitute
/// deterministic doubles.
///
/// # Examples
/// ```
/// use kerbside_core::test_support::{EchoDirectionsProvider, MemoryKerbSource};
/// use kerbside_core::{LatLon, ParkingPlanner, RouteRequest};
///
/// let planner = ParkingPlanner::new(MemoryKerbSource::default(), EchoDirectionsProvider);
/// let request = RouteRequest::new(LatLon::new(51.50, -0.12), LatLon::new(51.5581, -0.1798));
/// let route = planner.route_with_parking(&request)?;
/// assert_eq!(route.len(), 2);
/// # Ok::<(), kerbside_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ParkingPlanner<K, D>
where
    K: KerbFeatureSource,
    D: DirectionsProvider,
{
    kerb_source: K,
    directions: D,
}

impl<K, D> ParkingPlanner<K, D>
where
    K: KerbFeatureSource,
    D: DirectionsProvider,
{
    /// Construct a planner from its gateways.
    pub const fn new(kerb_source: K, directions: D) -> Self {
        Self {
            kerb_source,
            directions,
        }
    }

    /// Find filtered, capacity-annotated kerb features around a point.
    ///
    /// Features keep provider order.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidRequest`] for out-of-range input and
    /// [`PlanError::KerbFeatures`] when the kerb provider fails.
    pub fn parking_spots(&self, request: &ParkingSpotsRequest) -> Result<Vec<KerbFeature>, PlanError> {
        request.validate()?;
        let bbox = BoundingBox::around(request.centre, request.radius_km());
        debug!("searching kerb features in viewport {}", bbox.viewport());

        let raw = self.kerb_source.fetch_features(&bbox).map_err(|err| {
            warn!("kerb feature lookup failed: {err}");
            PlanError::KerbFeatures(err)
        })?;
        let fetched = raw.len();
        let features = filter_and_score(raw, request.reason());
        info!(
            "kept {} of {fetched} kerb features for reason {:?}",
            features.len(),
            request.reason()
        );
        Ok(features)
    }

    /// Plan a route from `request.start` to `request.end` that first visits
    /// up to 21 parking segments near the destination, largest first.
    ///
    /// # Errors
    /// Returns [`PlanError`] when validation or either gateway fails. A kerb
    /// lookup failure is never replaced by a route without parking.
    pub fn route_with_parking(&self, request: &RouteRequest) -> Result<RoutePolyline, PlanError> {
        request.validate()?;
        let candidates = self.parking_spots(&request.parking_search())?;
        let waypoints = build_waypoints(request.start, request.end, candidates);
        debug!("requesting directions through {} waypoints", waypoints.len());
        self.fetch_route(&waypoints)
    }

    /// Plan a direct route from `start` to `end` without a parking detour.
    ///
    /// # Errors
    /// Returns [`PlanError`] when validation or the directions provider fails.
    pub fn route(&self, start: LatLon, end: LatLon) -> Result<RoutePolyline, PlanError> {
        validate_endpoints(start, end)?;
        self.fetch_route(&[start, end])
    }

    fn fetch_route(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, PlanError> {
        self.directions.fetch_route(waypoints).map_err(|err| {
            warn!("directions lookup failed: {err}");
            PlanError::Directions(err)
        })
    }
}

fn validate_endpoints(start: LatLon, end: LatLon) -> Result<(), RequestValidationError> {
    RouteRequest::new(start, end).validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_math::offset_km;
    use crate::test_support::{EchoDirectionsProvider, FailingKerbSource, MemoryKerbSource};
    use crate::{ErrorKind, GatewayError, LonLat, RawKerbFeature, RegulationRule};
    use rstest::{fixture, rstest};

    const START: LatLon = LatLon::new(51.5074, -0.1278);
    const DESTINATION: LatLon = LatLon::new(51.5581, -0.1798);

    fn kerb(id: &str, length_km: f64, reason: &str) -> RawKerbFeature {
        let from = offset_km(DESTINATION, 0.01, 0.01);
        let to = offset_km(from, length_km, 0.0);
        RawKerbFeature::try_new(
            id,
            &[LonLat::from(from), LonLat::from(to)],
            vec![RegulationRule::with_reason(reason)],
        )
        .expect("two-point geometry")
    }

    #[fixture]
    fn source() -> MemoryKerbSource {
        MemoryKerbSource::with_features([
            kerb("short", 0.0102, "resident"),
            kerb("long", 0.0202, "resident"),
            kerb("visitor-only", 0.05, "visitor"),
        ])
    }

    #[rstest]
    fn parking_spots_filters_and_scores(source: MemoryKerbSource) {
        let planner = ParkingPlanner::new(source, EchoDirectionsProvider);
        let request = ParkingSpotsRequest::new(DESTINATION).with_reason("resident");

        let spots = planner.parking_spots(&request).expect("lookup succeeds");

        let summary: Vec<(&str, u32)> = spots
            .iter()
            .map(|spot| (spot.id.as_str(), spot.estimated_capacity))
            .collect();
        assert_eq!(summary, [("short", 2), ("long", 4)]);
    }

    #[rstest]
    fn route_visits_largest_parking_first(source: MemoryKerbSource) {
        let planner = ParkingPlanner::new(source, EchoDirectionsProvider);
        let request = RouteRequest::new(START, DESTINATION);

        let route = planner.route_with_parking(&request).expect("route succeeds");

        let points = route.points();
        assert_eq!(points.len(), 5);
        assert_eq!(points.first(), Some(&START));
        assert_eq!(points.last(), Some(&DESTINATION));
    }

    #[rstest]
    fn kerb_failure_aborts_route() {
        let planner = ParkingPlanner::new(
            FailingKerbSource::new(GatewayError::UpstreamUnavailable {
                url: "http://kerb.test/features".into(),
                message: "connection refused".into(),
            }),
            EchoDirectionsProvider,
        );

        let err = planner
            .route_with_parking(&RouteRequest::new(START, DESTINATION))
            .expect_err("kerb failure propagates");

        assert!(matches!(err, PlanError::KerbFeatures(_)));
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    }

    #[rstest]
    fn invalid_request_skips_gateways() {
        let planner = ParkingPlanner::new(
            FailingKerbSource::new(GatewayError::UpstreamUnavailable {
                url: "unused".into(),
                message: "unused".into(),
            }),
            EchoDirectionsProvider,
        );

        let err = planner
            .route(LatLon::new(120.0, 0.0), DESTINATION)
            .expect_err("invalid latitude");

        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[rstest]
    fn direct_route_has_two_waypoints(source: MemoryKerbSource) {
        let planner = ParkingPlanner::new(source, EchoDirectionsProvider);
        let route = planner.route(START, DESTINATION).expect("route succeeds");
        assert_eq!(route.points(), [START, DESTINATION]);
    }
}
