//! # Service Fee Schedule
//!
//! Flat per-shipment fees keyed by origin country.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default service fee for shipments leaving China.
pub const DEFAULT_CHINA_SERVICE_FEE: i64 = 300;

/// Per-origin flat service fees.
///
/// Origins without an entry pay nothing. The fee is charged once per
/// shipment, never per box or per channel.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::services::ServiceFeeSchedule;
/// use rust_decimal::Decimal;
///
/// let schedule = ServiceFeeSchedule::default();
/// assert_eq!(schedule.fee_for("China"), Decimal::from(300));
/// assert_eq!(schedule.fee_for("India"), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceFeeSchedule {
    fees: HashMap<String, Decimal>,
}

impl ServiceFeeSchedule {
    /// Creates a schedule with no fees.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fees: HashMap::new(),
        }
    }

    /// Adds or replaces the fee for an origin.
    #[must_use]
    pub fn with_fee(mut self, origin: impl Into<String>, fee: Decimal) -> Self {
        self.fees.insert(origin.into(), fee);
        self
    }

    /// Returns the fee for an origin, zero if none is configured.
    #[must_use]
    pub fn fee_for(&self, origin: &str) -> Decimal {
        self.fees.get(origin).copied().unwrap_or(Decimal::ZERO)
    }

    /// Number of origins with a fee.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fees.len()
    }

    /// Returns true if no origin has a fee.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }
}

impl Default for ServiceFeeSchedule {
    fn default() -> Self {
        Self::empty().with_fee("China", Decimal::from(DEFAULT_CHINA_SERVICE_FEE))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn origin_match_is_exact() {
        let schedule = ServiceFeeSchedule::default();
        assert_eq!(schedule.fee_for("china"), Decimal::ZERO);
    }

    #[test]
    fn with_fee_replaces_existing() {
        let schedule = ServiceFeeSchedule::default().with_fee("China", Decimal::from(150));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.fee_for("China"), Decimal::from(150));
    }

    #[test]
    fn deserializes_from_map() {
        let schedule: ServiceFeeSchedule =
            serde_json::from_str(r#"{"China": 300, "Vietnam": "45.50"}"#).unwrap();
        assert_eq!(schedule.fee_for("Vietnam"), Decimal::new(4550, 2));
    }
}
