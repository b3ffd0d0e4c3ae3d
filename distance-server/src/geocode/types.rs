//! Response schema for the postcodes.io lookup endpoint.
//!
//! Only the fields we use are modelled. Everything is optional except
//! `status`, so an unexpected payload is reported as a typed failure
//! rather than a parse panic further down.

use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::GeocodeError;

/// Top-level response envelope.
///
/// On success: `{"status": 200, "result": {...}}`.
/// On failure: `{"status": 404, "error": "Postcode not found"}`.
#[derive(Debug, Deserialize)]
pub struct PostcodeResponse {
    pub status: u16,
    #[serde(default)]
    pub result: Option<PostcodeResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Lookup result. Terminated postcodes can have null coordinates.
#[derive(Debug, Deserialize)]
pub struct PostcodeResult {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl PostcodeResponse {
    /// Extract the coordinate, treating any non-200 status as a failure.
    pub fn into_coordinate(self, postcode: &str) -> Result<Coordinate, GeocodeError> {
        if self.status == 404 {
            return Err(GeocodeError::NotFound {
                postcode: postcode.to_string(),
            });
        }

        if self.status != 200 {
            return Err(GeocodeError::Api {
                status: self.status,
                message: self.error.unwrap_or_default(),
            });
        }

        let missing = || GeocodeError::MissingCoordinates {
            postcode: postcode.to_string(),
        };
        let result = self.result.ok_or_else(missing)?;
        let (Some(latitude), Some(longitude)) = (result.latitude, result.longitude) else {
            return Err(missing());
        };

        Ok(Coordinate::new(latitude, longitude)?)
    }
}
