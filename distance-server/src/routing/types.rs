//! Response schema for the OSRM `route` service.

use serde::Deserialize;

use crate::domain::RouteResult;

use super::error::RoutingError;

/// Top-level `route` response.
///
/// `code` is `"Ok"` on success; error responses carry a different code and
/// usually a `message` and no routes.
#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// A single route. Distance is in meters, duration in seconds.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub distance: f64,
    pub duration: f64,
}

impl OsrmRouteResponse {
    /// Take the first (fastest) route.
    pub fn into_route(self) -> Result<RouteResult, RoutingError> {
        if self.code != "Ok" {
            return Err(RoutingError::NoRoute {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }

        let Some(route) = self.routes.into_iter().next() else {
            return Err(RoutingError::NoRoute {
                code: self.code,
                message: "empty route list".to_string(),
            });
        };

        Ok(RouteResult::from_meters_seconds(
            route.distance,
            route.duration,
        )?)
    }
}
