//! postcodes.io HTTP client.

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{Coordinate, PostalCode};
use crate::orchestrator::Geocoder;

use super::error::GeocodeError;
use super::types::PostcodeResponse;

/// Default base URL for the postcodes.io API.
const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocodeConfig {
    /// Create a config pointing at the public postcodes.io service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
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

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the postcodes.io lookup endpoint.
///
/// Each lookup is a single GET with no retry.
#[derive(Debug, Clone)]
pub struct PostcodesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PostcodesClient {
    /// Create a new geocoding client.
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GeocodeError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GeocodeError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Build the lookup URL, percent-encoding the postcode as one path segment.
    pub fn lookup_url(&self, postcode: &PostalCode) -> Result<Url, GeocodeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GeocodeError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("postcodes")
            .push(postcode.as_str());
        Ok(url)
    }

    /// Look up the coordinate of a postcode.
    pub async fn lookup(&self, postcode: &PostalCode) -> Result<Coordinate, GeocodeError> {
        let url = self.lookup_url(postcode)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GeocodeError::NotFound {
                postcode: postcode.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: PostcodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        parsed.into_coordinate(postcode.as_str())
    }
}

impl Geocoder for PostcodesClient {
    async fn resolve(&self, postcode: &PostalCode) -> Option<Coordinate> {
        match self.lookup(postcode).await {
            Ok(coordinate) => Some(coordinate),
            Err(e @ GeocodeError::Http(_)) => {
                warn!(%postcode, error = %e, "geocoding request failed");
                None
            }
            Err(e) => {
                debug!(%postcode, error = %e, "geocoding failed");
                None
            }
        }
    }
}
