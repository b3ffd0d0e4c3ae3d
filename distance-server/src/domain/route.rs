//! Route results and the rows built from them.

use serde::Serialize;

use super::{DestinationMetadata, PostalCode};

/// Error returned when a routing response carries unusable numbers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid route: {0}")]
pub struct InvalidRoute(&'static str);

/// Driving distance and duration for one ordered (origin, destination) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteResult {
    distance_km: f64,
    duration_min: f64,
}

impl RouteResult {
    /// Build a route result from the routing service's native units.
    ///
    /// Distance is converted from meters to kilometers and duration from
    /// seconds to minutes.
    pub fn from_meters_seconds(distance_m: f64, duration_s: f64) -> Result<Self, InvalidRoute> {
        if !distance_m.is_finite() || !duration_s.is_finite() {
            return Err(InvalidRoute("distance and duration must be finite"));
        }
        if distance_m < 0.0 || duration_s < 0.0 {
            return Err(InvalidRoute("distance and duration must not be negative"));
        }

        Ok(Self {
            distance_km: distance_m / 1000.0,
            duration_min: duration_s / 60.0,
        })
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }
}

/// Format a value with exactly one decimal place.
///
/// Ties round away from zero: `12.35` becomes `"12.4"`, `12.34` becomes
/// `"12.3"`. The value is scaled by ten and rounded with [`f64::round`]
/// before formatting, so the result never depends on the float formatter's
/// own tie-breaking.
pub fn format_one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{:.1}", rounded)
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub origin: PostalCode,
    pub destination: PostalCode,
    pub agency_name: String,
    pub city: String,
    /// Distance in kilometers, one decimal place.
    pub distance_km: String,
    /// Duration in minutes, one decimal place.
    pub duration_min: String,
}

impl ResultRow {
    /// Join a route with the destination's catalog metadata.
    pub fn new(
        origin: &PostalCode,
        destination: &PostalCode,
        metadata: DestinationMetadata<'_>,
        route: RouteResult,
    ) -> Self {
        Self {
            origin: origin.clone(),
            destination: destination.clone(),
            agency_name: metadata.agency_name.to_string(),
            city: metadata.city.to_string(),
            distance_km: format_one_decimal(route.distance_km()),
            duration_min: format_one_decimal(route.duration_min()),
        }
    }
}
