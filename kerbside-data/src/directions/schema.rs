//! Directions API response types.
//!
//! Only the status code and the first route's GeoJSON geometry are read.

use kerbside_core::LonLat;
use serde::Deserialize;

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code; `"Ok"` on success, e.g. `"NoRoute"` otherwise.
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    #[serde(default)]
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Full route geometry.
    pub geometry: RouteGeometry,
}

/// GeoJSON line geometry in `[lon, lat]` order.
#[derive(Debug, Deserialize)]
pub struct RouteGeometry {
    /// Path vertices.
    pub coordinates: Vec<LonLat>,
}
