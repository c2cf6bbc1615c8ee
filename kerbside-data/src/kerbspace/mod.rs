//! Kerb-regulation provider.
//!
//! [`HttpKerbFeatureSource`] implements [`kerbside_core::KerbFeatureSource`]
//! against the kerb-regulation HTTP API. The bounding box is sent as the
//! `viewport` query parameter, formatted `sw.lat,sw.lon,ne.lat,ne.lon` with
//! six decimal places, and the subscription key travels in a header.

mod provider;
mod schema;

pub use provider::{
    DEFAULT_KERB_BASE_URL, HttpKerbFeatureSource, HttpKerbFeatureSourceConfig,
    SUBSCRIPTION_KEY_HEADER,
};
