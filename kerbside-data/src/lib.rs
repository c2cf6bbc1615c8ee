//! HTTP gateways for the Kerbside engine.
//!
//! Provides blocking implementations of the `kerbside-core` gateway traits:
//! [`kerbspace::HttpKerbFeatureSource`] for kerb regulations and
//! [`directions::HttpDirectionsProvider`] for routing.

pub mod directions;
mod http;
pub mod kerbspace;

pub use http::{
    DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError,
};
