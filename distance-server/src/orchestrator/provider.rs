//! Upstream seams used by the orchestrator.
//!
//! These abstractions let the orchestrator be tested with in-memory fakes.
//! Implementations must swallow their own errors: absence is the only
//! failure signal the orchestrator sees.

use std::future::Future;

use crate::domain::{Coordinate, PostalCode, RouteResult};

/// Resolves postcodes to coordinates.
pub trait Geocoder: Send + Sync {
    /// Resolve a postcode, returning `None` on any failure.
    fn resolve(&self, postcode: &PostalCode) -> impl Future<Output = Option<Coordinate>> + Send;
}

/// Resolves driving routes between coordinates.
pub trait RouteProvider: Send + Sync {
    /// Resolve the route from `from` to `to`, returning `None` on any failure.
    fn resolve(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Option<RouteResult>> + Send;
}
