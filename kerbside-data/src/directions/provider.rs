//! HTTP-based `DirectionsProvider` for a Mapbox-compatible directions API.

use std::time::Duration;

use kerbside_core::{DirectionsProvider, GatewayError, LatLon, RoutePolyline};

use super::schema::DirectionsResponse;
use crate::http::{
    DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpGateway,
    ProviderBuildError, join_url,
};

/// Default directions API endpoint.
pub const DEFAULT_DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com";

/// Default routing profile.
pub const DEFAULT_PROFILE: &str = "mapbox/driving";

/// Configuration for [`HttpDirectionsProvider`].
#[derive(Debug, Clone)]
pub struct HttpDirectionsProviderConfig {
    /// Base URL of the directions API.
    pub base_url: String,
    /// Routing profile path segment, e.g. `"mapbox/driving"`.
    pub profile: String,
    /// Access token sent as the `access_token` query parameter, when set.
    pub access_token: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Upper bound on in-flight requests.
    pub max_concurrent_requests: usize,
}

impl Default for HttpDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIRECTIONS_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl HttpDirectionsProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the access token.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the bound on in-flight requests.
    #[must_use]
    pub const fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }
}

/// Directions provider backed by a Mapbox-compatible HTTP API.
///
/// Waypoints are sent as `lon,lat` pairs separated by `;`. Only the first
/// route in the response is used.
///
/// # Examples
///
/// ```no_run
/// use kerbside_core::{DirectionsProvider, LatLon};
/// use kerbside_data::directions::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
///
/// let config = HttpDirectionsProviderConfig::default().with_access_token("pk.secret");
/// let provider = HttpDirectionsProvider::with_config(config)?;
/// let route = provider.fetch_route(&[
///     LatLon::new(51.5074, -0.1278),
///     LatLon::new(51.5581, -0.1798),
/// ])?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpDirectionsProvider {
    gateway: HttpGateway,
    config: HttpDirectionsProviderConfig,
}

impl HttpDirectionsProvider {
    /// Create a new provider with default configuration and the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
        let gateway = HttpGateway::new(
            &config.user_agent,
            config.timeout,
            config.max_concurrent_requests,
        )?;
        Ok(Self { gateway, config })
    }

    /// Build the route URL: `{base_url}/directions/v5/{profile}/{coordinates}`.
    fn build_route_url(&self, waypoints: &[LatLon]) -> String {
        let coords = waypoints
            .iter()
            .map(|point| format!("{:.6},{:.6}", point.lon, point.lat))
            .collect::<Vec<_>>()
            .join(";");
        join_url(
            &self.config.base_url,
            &format!("directions/v5/{}/{coords}", self.config.profile.trim_matches('/')),
        )
    }

    async fn fetch_route_async(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError> {
        let url = self.build_route_url(waypoints);
        let mut request = self
            .gateway
            .client()
            .get(&url)
            .query(&[("steps", "true"), ("geometries", "geojson")]);
        if let Some(token) = &self.config.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let response: DirectionsResponse = self.gateway.get_json(request, &url).await?;
        convert_response(&url, response)
    }
}

/// Take the first route and swap it into `(lat, lon)` order.
fn convert_response(url: &str, response: DirectionsResponse) -> Result<RoutePolyline, GatewayError> {
    if !response.is_ok() {
        return Err(GatewayError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::UpstreamDecode {
            url: url.to_owned(),
            message: "response contained no routes".to_owned(),
        })?;

    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|point| point.swap())
        .collect())
}

impl DirectionsProvider for HttpDirectionsProvider {
    fn fetch_route(&self, waypoints: &[LatLon]) -> Result<RoutePolyline, GatewayError> {
        if waypoints.len() < 2 {
            return Err(GatewayError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }
        self.gateway
            .block_on(&self.config.base_url, self.fetch_route_async(waypoints))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::schema::{Route, RouteGeometry};
    use kerbside_core::LonLat;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> HttpDirectionsProvider {
        HttpDirectionsProvider::new("http://directions.test/").expect("provider should build")
    }

    #[rstest]
    fn build_route_url_orders_lon_first(provider: HttpDirectionsProvider) {
        let url = provider.build_route_url(&[
            LatLon::new(51.5074, -0.1278),
            LatLon::new(51.5581, -0.1798),
        ]);

        assert_eq!(
            url,
            "http://directions.test/directions/v5/mapbox/driving/-0.127800,51.507400;-0.179800,51.558100"
        );
    }

    #[rstest]
    fn convert_response_uses_first_route() {
        let response = DirectionsResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: vec![
                Route {
                    geometry: RouteGeometry {
                        coordinates: vec![LonLat::new(-0.1, 51.5), LonLat::new(-0.2, 51.6)],
                    },
                },
                Route {
                    geometry: RouteGeometry {
                        coordinates: vec![LonLat::new(9.0, 9.0)],
                    },
                },
            ],
        };

        let polyline = convert_response("u", response).expect("should convert");

        assert_eq!(
            polyline.points(),
            [LatLon::new(51.5, -0.1), LatLon::new(51.6, -0.2)]
        );
    }

    #[rstest]
    fn convert_response_handles_service_error() {
        let response = DirectionsResponse {
            code: "NoRoute".to_owned(),
            message: Some("No route found".to_owned()),
            routes: Vec::new(),
        };

        let err = convert_response("u", response).expect_err("should fail");

        assert_eq!(
            err,
            GatewayError::Service {
                code: "NoRoute".to_owned(),
                message: "No route found".to_owned(),
            }
        );
    }

    #[rstest]
    fn convert_response_requires_a_route() {
        let response = DirectionsResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: Vec::new(),
        };

        let err = convert_response("u", response).expect_err("should fail");

        assert!(matches!(err, GatewayError::UpstreamDecode { .. }));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn too_few_waypoints_skip_the_request(provider: HttpDirectionsProvider, #[case] count: usize) {
        let waypoints = vec![LatLon::new(51.5, -0.1); count];

        let err = provider.fetch_route(&waypoints).expect_err("should fail");

        assert_eq!(err, GatewayError::InsufficientWaypoints { count });
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpDirectionsProviderConfig::new("http://directions.test")
            .with_profile("mapbox/walking")
            .with_access_token("pk.test")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent/1.0")
            .with_max_concurrent_requests(3);

        assert_eq!(config.profile, "mapbox/walking");
        assert_eq!(config.access_token.as_deref(), Some("pk.test"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.max_concurrent_requests, 3);
    }
}
