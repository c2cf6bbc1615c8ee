//! Property-based tests for the pure geometry, filtering and ranking stages.

use kerbside_core::filter::filter_by_reason;
use kerbside_core::geo_math::great_circle_distance_km;
use kerbside_core::kerb::capacity_for_length_km;
use kerbside_core::waypoints::{build_waypoints, rank_candidates};
use kerbside_core::{BoundingBox, KerbFeature, LatLon, MAX_PARKING_WAYPOINTS, RegulationRule};
use proptest::prelude::*;

fn latlon() -> impl Strategy<Value = LatLon> {
    (-80.0_f64..80.0, -179.0_f64..179.0).prop_map(|(lat, lon)| LatLon::new(lat, lon))
}

fn reason() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::from("resident")),
        Just(String::from("visitor")),
        Just(String::from("unrestricted")),
        Just(String::from("loading")),
    ]
}

fn feature() -> impl Strategy<Value = KerbFeature> {
    (latlon(), 0.0_f64..0.001, prop::collection::vec(reason(), 0..3)).prop_map(
        |(entry, delta, reasons)| {
            KerbFeature::new(
                "feature",
                [entry, LatLon::new(entry.lat + delta, entry.lon)],
                reasons.into_iter().map(RegulationRule::with_reason).collect(),
            )
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the box corners are ordered and the centre lies inside.
    #[test]
    fn bounding_box_contains_centre(centre in latlon(), radius_km in 0.001_f64..5.0) {
        let bbox = BoundingBox::around(centre, radius_km);
        prop_assert!(bbox.south_west.lat < bbox.north_east.lat);
        prop_assert!(bbox.south_west.lon < bbox.north_east.lon);
        prop_assert!(bbox.contains(centre));
    }

    /// Property: distance is zero to itself and symmetric.
    #[test]
    fn distance_is_symmetric(a in latlon(), b in latlon()) {
        prop_assert_eq!(great_circle_distance_km(a, a), 0.0);
        let forward = great_circle_distance_km(a, b);
        let backward = great_circle_distance_km(b, a);
        prop_assert!((forward - backward).abs() < 1e-9);
        prop_assert!(forward >= 0.0);
    }

    /// Property: longer kerbs never hold fewer cars.
    #[test]
    fn capacity_is_monotonic(a in 0.0_f64..1.0, b in 0.0_f64..1.0) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(capacity_for_length_km(short) <= capacity_for_length_km(long));
    }

    /// Property: filtering twice by the same reason changes nothing.
    #[test]
    fn filtering_is_idempotent(
        features in prop::collection::vec(feature(), 0..20),
        wanted in prop::option::of(reason()),
    ) {
        let once = filter_by_reason(features, wanted.as_deref());
        let twice = filter_by_reason(once.clone(), wanted.as_deref());
        prop_assert_eq!(once, twice);
    }

    /// Property: waypoints are bounded and anchored at both ends.
    #[test]
    fn waypoints_are_bounded(
        start in latlon(),
        end in latlon(),
        features in prop::collection::vec(feature(), 0..40),
    ) {
        let count = features.len();
        let ranked = rank_candidates(features.clone());
        prop_assert!(
            ranked
                .windows(2)
                .all(|pair| pair[0].estimated_capacity >= pair[1].estimated_capacity)
        );

        let waypoints = build_waypoints(start, end, features);
        prop_assert_eq!(waypoints.len(), count.min(MAX_PARKING_WAYPOINTS) + 2);
        prop_assert_eq!(waypoints.first(), Some(&start));
        prop_assert_eq!(waypoints.last(), Some(&end));
    }

    /// Property: swapping axes twice restores the coordinate exactly.
    #[test]
    fn swapping_axes_round_trips(point in latlon()) {
        prop_assert_eq!(point.swap().swap(), point);
    }
}
