//! Destination catalog.
//!
//! The fixed list of destinations every origin is routed to, with the
//! agency name and city shown next to each result. Loaded once at startup
//! from a JSON document:
//!
//! ```json
//! [{"postcode": "E1 2PS", "agency": "Kushiara BRAC", "city": "London"}]
//! ```

mod error;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Destination, DestinationMetadata, PostalCode};

pub use error::CatalogError;

/// One entry of the catalog source document.
#[derive(Debug, Deserialize)]
struct DestinationDto {
    postcode: String,
    agency: String,
    city: String,
}

/// Immutable, ordered destination table.
#[derive(Debug, Clone)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
    /// Postcode → index into `destinations`.
    index: HashMap<PostalCode, usize>,
}

impl DestinationCatalog {
    /// Build a catalog from destinations, keeping their order.
    ///
    /// Fails if the list is empty or a postcode appears twice.
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        if destinations.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(destinations.len());
        for (i, destination) in destinations.iter().enumerate() {
            if index.insert(destination.postcode.clone(), i).is_some() {
                return Err(CatalogError::DuplicatePostcode {
                    postcode: destination.postcode.to_string(),
                });
            }
        }

        Ok(Self {
            destinations,
            index,
        })
    }

    /// Parse a catalog from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let dtos: Vec<DestinationDto> = serde_json::from_str(json)?;

        let destinations = dtos
            .into_iter()
            .enumerate()
            .map(|(i, dto)| {
                let postcode = PostalCode::parse(&dto.postcode)
                    .map_err(|_| CatalogError::BlankPostcode { index: i })?;
                Ok(Destination::new(postcode, dto.agency, dto.city))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Self::new(destinations)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Destinations in source order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Look up a destination by postcode.
    pub fn get(&self, postcode: &PostalCode) -> Option<&Destination> {
        self.index.get(postcode).map(|&i| &self.destinations[i])
    }

    /// Agency name and city for a postcode.
    ///
    /// Never fails: unknown postcodes get [`DestinationMetadata::UNKNOWN`].
    pub fn lookup_metadata(&self, postcode: &PostalCode) -> DestinationMetadata<'_> {
        self.get(postcode)
            .map(DestinationMetadata::from)
            .unwrap_or(DestinationMetadata::UNKNOWN)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
