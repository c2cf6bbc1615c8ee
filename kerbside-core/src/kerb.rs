//! Kerb segments and the regulations attached to them.
//!
//! Providers emit segments in `(lon, lat)` order. [`RawKerbFeature`] holds
//! that provider form and is the only way into the pipeline; converting it
//! into a [`KerbFeature`] swaps the axes and derives the capacity estimate.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geo_math::{AVERAGE_CAR_LENGTH_KM, great_circle_distance_km};
use crate::{LatLon, LonLat};

/// A condition governing how a kerb segment may be used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegulationRule {
    /// Permitted activity, e.g. `"parking"` or `"loading"`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub activity: Option<String>,
    /// Why the regulation applies, e.g. `"resident"` or `"unrestricted"`.
    pub reason: String,
    /// Maximum stay in minutes.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub max_stay: Option<u32>,
    /// Whether payment is required.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub payment: Option<bool>,
}

impl RegulationRule {
    /// Construct a rule carrying only a reason.
    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            ..Self::default()
        }
    }
}

/// A feature arrived without the two-point line geometry every kerb segment
/// must have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("kerb feature {id} has {points} geometry point(s); two are required")]
pub struct MalformedFeature {
    /// Provider identifier of the rejected feature.
    pub id: String,
    /// Number of points the geometry carried.
    pub points: usize,
}

/// A kerb segment as emitted by a provider, still in `(lon, lat)` order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawKerbFeature {
    /// Provider identifier.
    pub id: String,
    /// Segment end points in provider order.
    pub segment: [LonLat; 2],
    /// Regulation rules attached to the segment.
    pub rules: Vec<RegulationRule>,
    /// Street the segment belongs to, when known.
    pub street_name: Option<String>,
}

impl RawKerbFeature {
    /// Validate a provider geometry and build the raw feature.
    ///
    /// Only the first two points are used when a provider sends more.
    ///
    /// # Errors
    /// Returns [`MalformedFeature`] when fewer than two points are present.
    pub fn try_new(
        id: impl Into<String>,
        points: &[LonLat],
        rules: Vec<RegulationRule>,
    ) -> Result<Self, MalformedFeature> {
        let id = id.into();
        match points {
            [first, second, ..] => Ok(Self {
                id,
                segment: [*first, *second],
                rules,
                street_name: None,
            }),
            _ => Err(MalformedFeature {
                id,
                points: points.len(),
            }),
        }
    }

    /// Attach a street name.
    #[must_use]
    pub fn with_street_name(mut self, street_name: impl Into<String>) -> Self {
        self.street_name = Some(street_name.into());
        self
    }

    /// Swap the segment into `(lat, lon)` order and estimate its capacity.
    #[must_use]
    pub fn normalise(self) -> KerbFeature {
        let [first, second] = self.segment;
        let segment = [first.swap(), second.swap()];
        KerbFeature {
            id: self.id,
            estimated_capacity: estimate_capacity(&segment),
            segment,
            rules: self.rules,
            street_name: self.street_name,
        }
    }
}

/// A kerb segment in internal `(lat, lon)` order with its derived capacity.
///
/// The capacity is recomputed whenever a feature is loaded and never stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct KerbFeature {
    /// Provider identifier.
    pub id: String,
    /// Segment end points.
    pub segment: [LatLon; 2],
    /// Regulation rules attached to the segment.
    pub rules: Vec<RegulationRule>,
    /// Street the segment belongs to, when known.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub street_name: Option<String>,
    /// Number of cars the segment is estimated to hold.
    pub estimated_capacity: u32,
}

impl KerbFeature {
    /// Build a feature from a segment already in `(lat, lon)` order.
    #[must_use]
    pub fn new(id: impl Into<String>, segment: [LatLon; 2], rules: Vec<RegulationRule>) -> Self {
        Self {
            id: id.into(),
            estimated_capacity: estimate_capacity(&segment),
            segment,
            rules,
            street_name: None,
        }
    }

    /// First point of the segment, used as the parking waypoint.
    #[must_use]
    pub const fn entry_point(&self) -> LatLon {
        self.segment[0]
    }

    /// Segment length in kilometres.
    #[must_use]
    pub fn length_km(&self) -> f64 {
        let [first, second] = self.segment;
        great_circle_distance_km(first, second)
    }
}

/// Access to the regulation rules of a feature in either ordering.
pub trait Regulated {
    /// Rules attached to the segment.
    fn rules(&self) -> &[RegulationRule];
}

impl Regulated for RawKerbFeature {
    fn rules(&self) -> &[RegulationRule] {
        &self.rules
    }
}

impl Regulated for KerbFeature {
    fn rules(&self) -> &[RegulationRule] {
        &self.rules
    }
}

/// Estimate how many cars fit along `segment`.
#[must_use]
pub fn estimate_capacity(segment: &[LatLon; 2]) -> u32 {
    let [first, second] = *segment;
    capacity_for_length_km(great_circle_distance_km(first, second))
}

/// Convert a kerb length into a whole number of average car lengths,
/// truncating towards zero. Non-finite or negative lengths hold no cars.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "capacity is the truncated ratio of two positive lengths"
)]
#[must_use]
pub fn capacity_for_length_km(length_km: f64) -> u32 {
    if !length_km.is_finite() || length_km <= 0.0 {
        return 0;
    }
    (length_km / AVERAGE_CAR_LENGTH_KM).trunc() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_math::offset_km;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.004_9, 0)]
    #[case(0.005, 1)]
    #[case(0.01, 2)]
    #[case(0.02, 4)]
    #[case(0.024_9, 4)]
    #[case(-1.0, 0)]
    #[case(f64::NAN, 0)]
    fn capacity_truncates_towards_zero(#[case] length_km: f64, #[case] expected: u32) {
        assert_eq!(capacity_for_length_km(length_km), expected);
    }

    #[rstest]
    #[case::ten_metres(0.010_2, 2)]
    #[case::twenty_metres(0.020_2, 4)]
    fn laid_out_segments_keep_their_capacity_band(#[case] length_km: f64, #[case] expected: u32) {
        let origin = LatLon::new(51.5581, -0.1798);
        let segment = [origin, offset_km(origin, 0.0, length_km)];

        assert_eq!(estimate_capacity(&segment), expected);
    }

    #[rstest]
    fn normalise_swaps_axes_and_scores() {
        let origin = LatLon::new(51.5581, -0.1798);
        let far = offset_km(origin, 0.0202, 0.0);
        let raw = RawKerbFeature::try_new(
            "kerb-1",
            &[origin.swap(), far.swap()],
            vec![RegulationRule::with_reason("resident")],
        )
        .expect("two points are valid");

        let feature = raw.normalise();

        assert_eq!(feature.segment, [origin, far]);
        assert_eq!(feature.entry_point(), origin);
        assert_eq!(feature.estimated_capacity, 4);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn short_geometries_are_malformed(#[case] count: usize) {
        let points: Vec<LonLat> = std::iter::repeat_n(LonLat::new(0.0, 0.0), count).collect();
        let err = RawKerbFeature::try_new("kerb-9", &points, Vec::new())
            .expect_err("short geometry should fail");
        assert_eq!(
            err,
            MalformedFeature {
                id: "kerb-9".to_owned(),
                points: count,
            }
        );
    }

    #[rstest]
    fn extra_points_are_ignored() {
        let points = [
            LonLat::new(0.0, 0.0),
            LonLat::new(0.0, 0.001),
            LonLat::new(0.0, 0.002),
        ];
        let raw = RawKerbFeature::try_new("kerb-3", &points, Vec::new()).expect("valid");
        assert_eq!(raw.segment, [points[0], points[1]]);
    }
}
