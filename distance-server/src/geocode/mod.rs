//! Postcode geocoding via postcodes.io.
//!
//! Resolves a postal code to a latitude/longitude pair. The client exposes a
//! typed `lookup` for diagnostics; through the [`Geocoder`] trait every
//! failure collapses to `None`.
//!
//! [`Geocoder`]: crate::orchestrator::Geocoder

mod client;
mod error;
mod types;

pub use client::{GeocodeConfig, PostcodesClient};
pub use error::GeocodeError;
pub use types::{PostcodeResponse, PostcodeResult};
