//! Select kerb segments by regulation reason.
//!
//! A segment is accepted when no reason filter is requested, when any of its
//! rules is [`UNRESTRICTED_REASON`], or when any rule's reason equals the
//! requested one exactly (case-sensitive). Unrestricted kerb always matches,
//! whatever reason was asked for.

use crate::kerb::{KerbFeature, RawKerbFeature, Regulated};

/// Reason string marking kerb that anyone may park on.
pub const UNRESTRICTED_REASON: &str = "unrestricted";

/// Normalise an optional reason so that an empty string means "no filter".
#[must_use]
pub fn reason_filter(reason: Option<&str>) -> Option<&str> {
    reason.filter(|value| !value.is_empty())
}

/// Report whether `feature` satisfies `reason`.
///
/// # Examples
/// ```
/// use kerbside_core::{KerbFeature, LatLon, RegulationRule};
/// use kerbside_core::filter::matches_reason;
///
/// let segment = [LatLon::new(0.0, 0.0), LatLon::new(0.0, 0.0001)];
/// let feature = KerbFeature::new("k", segment, vec![RegulationRule::with_reason("visitor")]);
/// assert!(matches_reason(&feature, None));
/// assert!(matches_reason(&feature, Some("visitor")));
/// assert!(!matches_reason(&feature, Some("resident")));
/// ```
#[must_use]
pub fn matches_reason<F: Regulated + ?Sized>(feature: &F, reason: Option<&str>) -> bool {
    let Some(wanted) = reason_filter(reason) else {
        return true;
    };
    feature
        .rules()
        .iter()
        .any(|rule| rule.reason == UNRESTRICTED_REASON || rule.reason == wanted)
}

/// Keep the features matching `reason`, preserving their order.
#[must_use]
pub fn filter_by_reason<F: Regulated>(features: Vec<F>, reason: Option<&str>) -> Vec<F> {
    features
        .into_iter()
        .filter(|feature| matches_reason(feature, reason))
        .collect()
}

/// Filter provider features by `reason`, then swap each accepted segment into
/// `(lat, lon)` order and estimate its capacity.
#[must_use]
pub fn filter_and_score(features: Vec<RawKerbFeature>, reason: Option<&str>) -> Vec<KerbFeature> {
    filter_by_reason(features, reason)
        .into_iter()
        .map(RawKerbFeature::normalise)
        .collect()
}
