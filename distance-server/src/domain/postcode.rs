//! Postal code type.

use std::fmt;

use serde::Serialize;

/// Error returned when a postal code is empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("postal code is empty")]
pub struct EmptyPostcode;

/// A postal code as entered by the user or listed in the catalog.
///
/// The only normalisation applied is trimming surrounding whitespace. Case
/// and inner spacing are kept verbatim and passed through to the geocoding
/// service.
///
/// # Examples
///
/// ```
/// use distance_server::domain::PostalCode;
///
/// let pc = PostalCode::parse("  E1 2PS ").unwrap();
/// assert_eq!(pc.as_str(), "E1 2PS");
///
/// // Blank input is rejected
/// assert!(PostalCode::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse a postal code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, EmptyPostcode> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyPostcode);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the postal code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostalCode({})", self.0)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Parsing is idempotent: re-parsing a parsed code changes nothing
        #[test]
        fn parse_idempotent(s in "[ \t]{0,3}[A-Za-z0-9 ]{1,8}[ \t]{0,3}") {
            if let Ok(pc) = PostalCode::parse(&s) {
                let again = PostalCode::parse(pc.as_str()).unwrap();
                prop_assert_eq!(pc, again);
            }
        }

        /// A parsed code never has surrounding whitespace
        #[test]
        fn never_padded(s in "\\PC{0,12}") {
            if let Ok(pc) = PostalCode::parse(&s) {
                prop_assert_eq!(pc.as_str(), pc.as_str().trim());
                prop_assert!(!pc.as_str().is_empty());
            }
        }
    }
}
