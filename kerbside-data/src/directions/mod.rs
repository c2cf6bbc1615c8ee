//! Directions provider.
//!
//! [`HttpDirectionsProvider`] implements [`kerbside_core::DirectionsProvider`]
//! against a Mapbox-compatible directions API, requesting GeoJSON geometry
//! and swapping the returned `[lon, lat]` vertices into internal order.

mod provider;
mod schema;

pub use provider::{
    DEFAULT_DIRECTIONS_BASE_URL, DEFAULT_PROFILE, HttpDirectionsProvider,
    HttpDirectionsProviderConfig,
};
