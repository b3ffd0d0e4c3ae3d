//! Destination records.

use super::PostalCode;

/// A fixed destination that every origin is routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub postcode: PostalCode,
    pub agency_name: String,
    pub city: String,
}

impl Destination {
    pub fn new(
        postcode: PostalCode,
        agency_name: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            postcode,
            agency_name: agency_name.into(),
            city: city.into(),
        }
    }
}

/// Descriptive metadata joined onto each result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationMetadata<'a> {
    pub agency_name: &'a str,
    pub city: &'a str,
}

impl DestinationMetadata<'static> {
    /// Placeholder used when a postcode has no catalog entry.
    pub const UNKNOWN: Self = Self {
        agency_name: "Unknown",
        city: "Unknown",
    };
}

impl<'a> From<&'a Destination> for DestinationMetadata<'a> {
    fn from(destination: &'a Destination) -> Self {
        Self {
            agency_name: &destination.agency_name,
            city: &destination.city,
        }
    }
}
