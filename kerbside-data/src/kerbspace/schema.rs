//! Kerb-regulation API response types.
//!
//! The provider answers with a GeoJSON-like feature collection. Only the
//! fields the pipeline reads are modelled; everything else is ignored.
//! Features are kept as raw JSON at the collection level so that one bad
//! feature can be dropped without rejecting the whole response. Within a
//! feature only the geometry is strict: metadata of an unexpected shape
//! decodes as absent.

use kerbside_core::{LonLat, MalformedFeature, RawKerbFeature, RegulationRule};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an optional field, treating `null` or a value of the wrong shape
/// as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Feature collection envelope.
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    /// Undecoded features in provider order.
    pub features: Vec<Value>,
}

/// One kerb feature.
#[derive(Debug, Deserialize)]
pub struct Feature {
    /// Optional top-level GeoJSON identifier, string or number.
    #[serde(default)]
    pub id: Option<Value>,
    /// Line geometry.
    pub geometry: Geometry,
    /// Regulations and location metadata.
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<Properties>,
}

/// Line geometry in `[lon, lat]` order.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// Coordinate pairs; extra values such as altitude are ignored.
    pub coordinates: Vec<Vec<f64>>,
}

/// Feature properties.
#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    /// Regulations attached to the kerb.
    #[serde(default, deserialize_with = "lenient")]
    pub regulations: Option<Vec<Regulation>>,
    /// Where the kerb lies.
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<Location>,
}

/// One regulation entry.
#[derive(Debug, Default, Deserialize)]
pub struct Regulation {
    /// The rule the regulation imposes.
    #[serde(default, deserialize_with = "lenient")]
    pub rule: Option<Rule>,
}

/// Regulation rule as sent by the provider.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Permitted activity.
    #[serde(default, deserialize_with = "lenient")]
    pub activity: Option<String>,
    /// Reason the rule applies.
    #[serde(default, deserialize_with = "lenient")]
    pub reason: Option<String>,
    /// Maximum stay in minutes.
    #[serde(default, deserialize_with = "lenient")]
    pub max_stay: Option<u32>,
    /// Whether payment is required.
    #[serde(default, deserialize_with = "lenient")]
    pub payment: Option<bool>,
}

/// Location metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Provider object identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub object_id: Option<String>,
    /// Street name.
    #[serde(default, deserialize_with = "lenient")]
    pub street_name: Option<String>,
}

impl From<Rule> for RegulationRule {
    fn from(rule: Rule) -> Self {
        Self {
            activity: rule.activity,
            reason: rule.reason.unwrap_or_default(),
            max_stay: rule.max_stay,
            payment: rule.payment,
        }
    }
}

/// Fallback identifier for a feature without one.
pub fn fallback_id(index: usize) -> String {
    format!("feature-{index}")
}

impl Feature {
    /// Identifier from `properties.location.objectId`, then the top-level `id`.
    fn identifier(&self, index: usize) -> String {
        let object_id = self
            .properties
            .as_ref()
            .and_then(|properties| properties.location.as_ref())
            .and_then(|location| location.object_id.clone());
        let top_level = self.id.as_ref().and_then(|id| match id {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        });
        object_id
            .or(top_level)
            .unwrap_or_else(|| fallback_id(index))
    }

    /// Convert into the core provider-order feature.
    ///
    /// # Errors
    /// Returns [`MalformedFeature`] when fewer than two well-formed points
    /// are present.
    pub fn into_raw(self, index: usize) -> Result<RawKerbFeature, MalformedFeature> {
        let id = self.identifier(index);
        let points: Vec<LonLat> = self
            .geometry
            .coordinates
            .into_iter()
            .map_while(|pair| LonLat::try_from(pair).ok())
            .collect();
        let properties = self.properties.unwrap_or_default();
        let street_name = properties
            .location
            .and_then(|location| location.street_name);
        let rules = properties
            .regulations
            .unwrap_or_default()
            .into_iter()
            .map(|regulation| RegulationRule::from(regulation.rule.unwrap_or_default()))
            .collect();

        let feature = RawKerbFeature::try_new(id, &points, rules)?;
        Ok(match street_name {
            Some(name) => feature.with_street_name(name),
            None => feature,
        })
    }
}
