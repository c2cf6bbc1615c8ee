//! Upstream gateway settings shared by every planning command.

use std::time::Duration;

use kerbside_core::{DirectionsProvider, KerbFeatureSource, ParkingPlanner};
use kerbside_data::DEFAULT_TIMEOUT_SECS;
use kerbside_data::directions::{
    DEFAULT_DIRECTIONS_BASE_URL, HttpDirectionsProvider, HttpDirectionsProviderConfig,
};
use kerbside_data::kerbspace::{
    DEFAULT_KERB_BASE_URL, HttpKerbFeatureSource, HttpKerbFeatureSourceConfig,
};
use log::debug;

use crate::CliError;

/// Planner over boxed gateways so commands can swap in test doubles.
pub(crate) type CliPlanner =
    ParkingPlanner<Box<dyn KerbFeatureSource>, Box<dyn DirectionsProvider>>;

/// Resolved endpoints and credentials for both upstream providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GatewayConfig {
    pub(crate) kerb_base_url: String,
    pub(crate) kerb_api_key: Option<String>,
    pub(crate) directions_base_url: String,
    pub(crate) directions_access_token: Option<String>,
    pub(crate) timeout: Duration,
}

impl GatewayConfig {
    /// Fill unset options with the provider defaults.
    pub(crate) fn resolve(
        kerb_base_url: Option<String>,
        kerb_api_key: Option<String>,
        directions_base_url: Option<String>,
        directions_access_token: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        Self {
            kerb_base_url: kerb_base_url.unwrap_or_else(|| DEFAULT_KERB_BASE_URL.to_owned()),
            kerb_api_key,
            directions_base_url: directions_base_url
                .unwrap_or_else(|| DEFAULT_DIRECTIONS_BASE_URL.to_owned()),
            directions_access_token,
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// Builds the planner for the current invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &GatewayConfig) -> Result<CliPlanner, CliError>;
}

/// Wires the HTTP gateways from `kerbside-data`.
pub(crate) struct HttpPlannerBuilder;

impl PlannerBuilder for HttpPlannerBuilder {
    fn build(&self, config: &GatewayConfig) -> Result<CliPlanner, CliError> {
        debug!(
            "building gateways for {} and {}",
            config.kerb_base_url, config.directions_base_url
        );

        let mut kerb_config =
            HttpKerbFeatureSourceConfig::new(config.kerb_base_url.clone()).with_timeout(config.timeout);
        if let Some(key) = &config.kerb_api_key {
            kerb_config = kerb_config.with_api_key(key.clone());
        }
        let kerb_source =
            HttpKerbFeatureSource::with_config(kerb_config).map_err(|source| {
                CliError::BuildKerbSource {
                    base_url: config.kerb_base_url.clone(),
                    source,
                }
            })?;

        let mut directions_config =
            HttpDirectionsProviderConfig::new(config.directions_base_url.clone())
                .with_timeout(config.timeout);
        if let Some(token) = &config.directions_access_token {
            directions_config = directions_config.with_access_token(token.clone());
        }
        let directions =
            HttpDirectionsProvider::with_config(directions_config).map_err(|source| {
                CliError::BuildDirectionsProvider {
                    base_url: config.directions_base_url.clone(),
                    source,
                }
            })?;

        let kerb_source: Box<dyn KerbFeatureSource> = Box::new(kerb_source);
        let directions: Box<dyn DirectionsProvider> = Box::new(directions);
        Ok(ParkingPlanner::new(kerb_source, directions))
    }
}
