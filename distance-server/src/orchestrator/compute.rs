//! Origin × destination route table.
//!
//! For every origin, in input order, the orchestrator geocodes the origin
//! once and then walks the catalog in order, routing to each destination.
//! Any failure along the way skips only the affected origin or pair; the
//! batch as a whole never fails.

use tracing::{debug, info};

use crate::cache::DestinationCoordinateCache;
use crate::catalog::DestinationCatalog;
use crate::domain::{Coordinate, Destination, PostalCode, ResultRow};

use super::provider::{Geocoder, RouteProvider};

/// Everything a single run of the orchestrator produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteReport {
    /// Result rows, grouped by origin in input order, then catalog order.
    pub rows: Vec<ResultRow>,

    /// Origins that could not be geocoded, in input order.
    pub unresolved_origins: Vec<PostalCode>,

    /// Number of inputs skipped for being blank after trimming.
    pub blank_origins: usize,

    /// Number of (origin, destination) pairs skipped because the destination
    /// could not be geocoded or no route was found.
    pub skipped_pairs: usize,
}

/// Pairs origins with catalog destinations and collects route rows.
///
/// Calls are issued one at a time, each awaited before the next.
pub struct RouteOrchestrator<G, R> {
    geocoder: G,
    router: R,
    cache: DestinationCoordinateCache,
}

impl<G: Geocoder, R: RouteProvider> RouteOrchestrator<G, R> {
    /// Create an orchestrator.
    ///
    /// `cache` holds destination coordinates and may be shared with other
    /// orchestrators or pre-filled by [`DestinationCoordinateCache::warm_up`].
    pub fn new(geocoder: G, router: R, cache: DestinationCoordinateCache) -> Self {
        Self {
            geocoder,
            router,
            cache,
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn cache(&self) -> &DestinationCoordinateCache {
        &self.cache
    }

    /// Compute result rows for every origin against every destination.
    pub async fn compute_rows<S: AsRef<str>>(
        &self,
        origins: &[S],
        catalog: &DestinationCatalog,
    ) -> Vec<ResultRow> {
        self.compute_report(origins, catalog).await.rows
    }

    /// Compute result rows along with what was skipped.
    pub async fn compute_report<S: AsRef<str>>(
        &self,
        origins: &[S],
        catalog: &DestinationCatalog,
    ) -> RouteReport {
        let mut report = RouteReport::default();

        for raw in origins {
            let Ok(origin) = PostalCode::parse(raw.as_ref()) else {
                report.blank_origins += 1;
                continue;
            };

            let Some(origin_coord) = self.geocoder.resolve(&origin).await else {
                debug!(%origin, "skipping origin: geocoding failed");
                report.unresolved_origins.push(origin);
                continue;
            };

            for destination in catalog.destinations() {
                let Some(dest_coord) = self.destination_coordinate(destination).await else {
                    debug!(%origin, destination = %destination.postcode, "skipping pair: destination not geocoded");
                    report.skipped_pairs += 1;
                    continue;
                };

                let Some(route) = self.router.resolve(origin_coord, dest_coord).await else {
                    debug!(%origin, destination = %destination.postcode, "skipping pair: no route");
                    report.skipped_pairs += 1;
                    continue;
                };

                let metadata = catalog.lookup_metadata(&destination.postcode);
                report
                    .rows
                    .push(ResultRow::new(&origin, &destination.postcode, metadata, route));
            }
        }

        info!(
            origins = origins.len(),
            rows = report.rows.len(),
            unresolved_origins = report.unresolved_origins.len(),
            skipped_pairs = report.skipped_pairs,
            "route table computed"
        );

        report
    }

    /// Cached destination coordinate, geocoding and caching it on a miss.
    async fn destination_coordinate(&self, destination: &Destination) -> Option<Coordinate> {
        if let Some(coordinate) = self.cache.get(&destination.postcode).await {
            return Some(coordinate);
        }

        let coordinate = self.geocoder.resolve(&destination.postcode).await?;
        self.cache
            .insert(destination.postcode.clone(), coordinate)
            .await;
        Some(coordinate)
    }
}

#[cfg(test)]
#[path = "compute_tests.rs"]
mod tests;
