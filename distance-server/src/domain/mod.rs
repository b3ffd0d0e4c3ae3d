//! Domain types for the distance server.
//!
//! Value types are validated at construction time, so code that receives
//! them can trust their contents.

mod coordinate;
mod destination;
mod postcode;
mod route;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use destination::{Destination, DestinationMetadata};
pub use postcode::{EmptyPostcode, PostalCode};
pub use route::{InvalidRoute, ResultRow, RouteResult, format_one_decimal};
