//! Driving routes via an OSRM server.
//!
//! Queries the `route` service for the fastest driving route between two
//! coordinates and reports its distance and duration.

mod client;
mod error;
mod types;

pub use client::{OsrmClient, RoutingConfig};
pub use error::RoutingError;
pub use types::{OsrmRoute, OsrmRouteResponse};
