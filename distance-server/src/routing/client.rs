//! OSRM HTTP client.

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{Coordinate, RouteResult};
use crate::orchestrator::RouteProvider;

use super::error::RoutingError;
use super::types::OsrmRouteResponse;

/// Default base URL for the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL for the OSRM server
    pub base_url: String,
    /// Routing profile (`driving` on the public server)
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutingConfig {
    /// Create a config pointing at the public OSRM server.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: "driving".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the OSRM `route` service.
///
/// Each request is a single GET with no retry.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: Url,
    profile: String,
}

impl OsrmClient {
    /// Create a new routing client.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| RoutingError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RoutingError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            profile: config.profile,
        })
    }

    /// Build the route URL. OSRM takes coordinates as `lon,lat` pairs
    /// separated by `;`.
    pub fn route_url(&self, from: Coordinate, to: Coordinate) -> Result<Url, RoutingError> {
        let coordinates = format!(
            "{},{};{},{}",
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude()
        );

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RoutingError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["route", "v1", self.profile.as_str(), coordinates.as_str()]);
        url.query_pairs_mut().append_pair("overview", "false");
        Ok(url)
    }

    /// Request the fastest route between two coordinates.
    pub async fn route(&self, from: Coordinate, to: Coordinate) -> Result<RouteResult, RoutingError> {
        let url = self.route_url(from, to)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // OSRM reports routing failures as 400 with a JSON code
            if let Ok(parsed) = serde_json::from_str::<OsrmRouteResponse>(&body) {
                return Err(RoutingError::NoRoute {
                    code: parsed.code,
                    message: parsed.message.unwrap_or_default(),
                });
            }
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: OsrmRouteResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        parsed.into_route()
    }
}

impl RouteProvider for OsrmClient {
    async fn resolve(&self, from: Coordinate, to: Coordinate) -> Option<RouteResult> {
        match self.route(from, to).await {
            Ok(route) => Some(route),
            Err(e @ RoutingError::Http(_)) => {
                warn!(%from, %to, error = %e, "routing request failed");
                None
            }
            Err(e) => {
                debug!(%from, %to, error = %e, "routing failed");
                None
            }
        }
    }
}
