//! Identifier newtypes.
//!
//! Station and route identifiers arrive from outside the core (HTTP
//! requests, seed data) and are validated once at the boundary. Any
//! `StationId` or `RouteId` value is valid by construction.

use std::fmt;

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {reason}")]
pub struct InvalidId {
    reason: &'static str,
}

fn validate(s: &str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId {
            reason: "must not be empty",
        });
    }
    if s.len() > 64 {
        return Err(InvalidId {
            reason: "must be at most 64 characters",
        });
    }
    if !s
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(InvalidId {
            reason: "must be ASCII letters, digits, '-' or '_'",
        });
    }
    Ok(())
}

/// A validated station identifier (e.g. `ST001`).
///
/// # Examples
///
/// ```
/// use transit_server::domain::StationId;
///
/// let id = StationId::parse("ST001").unwrap();
/// assert_eq!(id.as_str(), "ST001");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("ST 001").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier.
    ///
    /// The input must be 1–64 ASCII letters, digits, `-` or `_`.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        validate(s)?;
        Ok(StationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated route identifier (e.g. `R001`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route identifier.
    ///
    /// Same rules as [`StationId::parse`].
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        validate(s)?;
        Ok(RouteId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_ids_roundtrip(s in "[A-Za-z0-9_-]{1,64}") {
            let id = StationId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        #[test]
        fn ids_with_spaces_rejected(s in "[A-Za-z0-9]{0,10} [A-Za-z0-9]{0,10}") {
            prop_assert!(StationId::parse(&s).is_err());
        }
    }
}
