//! HTTP-based `KerbFeatureSource` for the kerb-regulation API.

use std::time::Duration;

use kerbside_core::{BoundingBox, GatewayError, KerbFeatureSource, RawKerbFeature};
use log::{debug, warn};

use super::schema::{Feature, FeatureCollection, fallback_id};
use crate::http::{
    DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpGateway,
    ProviderBuildError, join_url,
};

/// Default kerb-regulation API endpoint.
pub const DEFAULT_KERB_BASE_URL: &str = "https://fordkerbhack.azure-api.net";

/// Header carrying the API subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Configuration for [`HttpKerbFeatureSource`].
#[derive(Debug, Clone)]
pub struct HttpKerbFeatureSourceConfig {
    /// Base URL of the kerb-regulation API.
    pub base_url: String,
    /// Subscription key sent with every request, when set.
    pub api_key: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Upper bound on in-flight requests.
    pub max_concurrent_requests: usize,
}

impl Default for HttpKerbFeatureSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_KERB_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl HttpKerbFeatureSourceConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the subscription key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
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

/// Kerb feature source backed by the kerb-regulation HTTP API.
///
/// Each call issues exactly one `GET {base_url}/features?viewport=...`.
/// Features without a two-point geometry are logged and dropped.
///
/// # Examples
///
/// ```no_run
/// use kerbside_core::{BoundingBox, KerbFeatureSource, LatLon};
/// use kerbside_data::kerbspace::{HttpKerbFeatureSource, HttpKerbFeatureSourceConfig};
///
/// let config = HttpKerbFeatureSourceConfig::default().with_api_key("secret");
/// let source = HttpKerbFeatureSource::with_config(config)?;
/// let bbox = BoundingBox::around(LatLon::new(51.5581, -0.1798), 0.25);
/// let features = source.fetch_features(&bbox)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpKerbFeatureSource {
    gateway: HttpGateway,
    config: HttpKerbFeatureSourceConfig,
}

impl HttpKerbFeatureSource {
    /// Create a new source with default configuration and the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpKerbFeatureSourceConfig::new(base_url))
    }

    /// Create a new source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpKerbFeatureSourceConfig) -> Result<Self, ProviderBuildError> {
        let gateway = HttpGateway::new(
            &config.user_agent,
            config.timeout,
            config.max_concurrent_requests,
        )?;
        Ok(Self { gateway, config })
    }

    fn features_url(&self) -> String {
        join_url(&self.config.base_url, "features")
    }

    async fn fetch_features_async(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<RawKerbFeature>, GatewayError> {
        let url = self.features_url();
        let viewport = bbox.viewport();
        let mut request = self
            .gateway
            .client()
            .get(&url)
            .query(&[("viewport", viewport.as_str())]);
        if let Some(key) = &self.config.api_key {
            request = request.header(SUBSCRIPTION_KEY_HEADER, key);
        }

        let collection: FeatureCollection = self
            .gateway
            .get_json(request, &format!("{url}?viewport={viewport}"))
            .await?;
        Ok(convert_collection(collection))
    }
}

/// Decode each feature, dropping the malformed ones.
fn convert_collection(collection: FeatureCollection) -> Vec<RawKerbFeature> {
    let total = collection.features.len();
    let features: Vec<RawKerbFeature> = collection
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let decoded = serde_json::from_value::<Feature>(value)
                .map_err(|err| {
                    warn!("dropping kerb feature {}: {err}", fallback_id(index));
                })
                .ok()?;
            decoded
                .into_raw(index)
                .map_err(|err| warn!("dropping malformed kerb feature: {err}"))
                .ok()
        })
        .collect();
    debug!("decoded {} of {total} kerb features", features.len());
    features
}

impl KerbFeatureSource for HttpKerbFeatureSource {
    fn fetch_features(&self, bbox: &BoundingBox) -> Result<Vec<RawKerbFeature>, GatewayError> {
        self.gateway
            .block_on(&self.features_url(), self.fetch_features_async(bbox))
    }
}
