//! # Lane Value Object
//!
//! An (origin, destination) country pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An (origin, destination) country pair.
///
/// Country names are free-form and matched exactly against rate-table keys;
/// no normalisation (case folding, trimming) is applied.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::value_objects::Lane;
///
/// let lane = Lane::new("China", "USA");
/// assert_eq!(lane.origin(), "China");
/// assert_eq!(lane.to_string(), "China -> USA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane {
    origin: String,
    destination: String,
}

impl Lane {
    /// Creates a lane.
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Returns the starting country.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the destination country.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_sensitive() {
        assert_ne!(Lane::new("China", "USA"), Lane::new("china", "USA"));
    }
}
