//! Destination coordinate cache.
//!
//! Destinations are fixed for the life of the process, so their coordinates
//! are resolved once and reused across requests. The cache is monotonic:
//! entries are only ever added. A failed lookup is not cached, so the next
//! request tries again.
//!
//! Concurrent requests may race to resolve the same destination. The first
//! insert wins and later ones are dropped.

use futures::StreamExt;
use moka::future::Cache as MokaCache;
use tracing::{info, warn};

use crate::catalog::DestinationCatalog;
use crate::domain::{Coordinate, PostalCode};
use crate::orchestrator::Geocoder;

/// Default number of destinations geocoded in parallel during warm-up.
pub const DEFAULT_WARM_UP_CONCURRENCY: usize = 4;

/// Outcome of eagerly resolving every catalog destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarmUpReport {
    /// Number of destinations now cached.
    pub resolved: usize,

    /// Destinations that could not be geocoded, in catalog order.
    pub unresolved: Vec<PostalCode>,
}

/// Process-wide postcode → coordinate cache for destinations.
///
/// Cloning is cheap and clones share the same storage.
#[derive(Clone)]
pub struct DestinationCoordinateCache {
    /// No TTL and no capacity bound: entries are never evicted.
    coordinates: MokaCache<PostalCode, Coordinate>,
}

impl DestinationCoordinateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            coordinates: MokaCache::builder().build(),
        }
    }

    /// Get a cached coordinate.
    pub async fn get(&self, postcode: &PostalCode) -> Option<Coordinate> {
        self.coordinates.get(postcode).await
    }

    /// Record a coordinate unless one is already cached.
    pub async fn insert(&self, postcode: PostalCode, coordinate: Coordinate) {
        self.coordinates
            .entry(postcode)
            .or_insert(coordinate)
            .await;
    }

    /// Whether a coordinate is cached for this postcode.
    pub fn contains(&self, postcode: &PostalCode) -> bool {
        self.coordinates.contains_key(postcode)
    }

    /// Geocode every catalog destination and cache the ones that resolve.
    ///
    /// Destinations that fail are left out of the cache; requests will
    /// retry them on demand. At most `concurrency` lookups are in flight.
    pub async fn warm_up<G: Geocoder>(
        &self,
        catalog: &DestinationCatalog,
        geocoder: &G,
        concurrency: usize,
    ) -> WarmUpReport {
        let results: Vec<(PostalCode, Option<Coordinate>)> =
            futures::stream::iter(catalog.destinations())
                .map(|destination| async move {
                    let coordinate = geocoder.resolve(&destination.postcode).await;
                    (destination.postcode.clone(), coordinate)
                })
                .buffered(concurrency.max(1))
                .collect()
                .await;

        let mut report = WarmUpReport::default();
        for (postcode, coordinate) in results {
            match coordinate {
                Some(coordinate) => {
                    self.insert(postcode, coordinate).await;
                    report.resolved += 1;
                }
                None => {
                    warn!(%postcode, "destination could not be geocoded during warm-up");
                    report.unresolved.push(postcode);
                }
            }
        }

        info!(
            resolved = report.resolved,
            total = catalog.len(),
            "destination coordinates warmed up"
        );

        report
    }
}

impl Default for DestinationCoordinateCache {
    fn default() -> Self {
        Self::new()
    }
}
