//! Route table orchestration.
//!
//! Pairs every origin postcode with every catalog destination and collects
//! one result row per pair that could be geocoded and routed. Upstream
//! services sit behind the [`Geocoder`] and [`RouteProvider`] traits.

mod compute;
mod provider;

pub use compute::{RouteOrchestrator, RouteReport};
pub use provider::{Geocoder, RouteProvider};
