//! # Identifiers
//!
//! Identity types for rate-table records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored channel rate record.
///
/// Assigned by the rate store when a record is saved; maps directly onto the
/// `shipping_rates.id` column.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::value_objects::ChannelRateId;
///
/// let id = ChannelRateId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelRateId(i64);

impl ChannelRateId {
    /// Creates an identifier from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChannelRateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChannelRateId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
