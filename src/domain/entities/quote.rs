//! # Quote Entity
//!
//! A priced shipping offer for one channel.
//!
//! This module provides the [`Quote`] entity along with its
//! [`CostBreakdown`] and [`ShippingTimeRange`]. Quotes are derived per
//! request and never stored.
//!
//! # Examples
//!
//! ```
//! use shipping_quote::domain::entities::quote::{CostBreakdown, Quote, ShippingTimeRange};
//! use shipping_quote::domain::value_objects::ShippingChannel;
//! use rust_decimal::Decimal;
//!
//! let breakdown = CostBreakdown::new(
//!     Decimal::from(1050),
//!     Decimal::from(300),
//!     Decimal::ZERO,
//!     Decimal::from(240),
//! );
//! let quote = Quote::new(ShippingChannel::Air, breakdown, ShippingTimeRange::new(15, 20)).unwrap();
//!
//! assert_eq!(quote.total_cost(), Decimal::from(1590));
//! ```

use crate::domain::value_objects::ShippingChannel;
use crate::domain::value_objects::arithmetic::{ArithmeticResult, checked_sum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery-time bounds in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShippingTimeRange {
    min_days: u32,
    max_days: u32,
}

impl ShippingTimeRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min_days: u32, max_days: u32) -> Self {
        Self { min_days, max_days }
    }

    /// Fastest expected delivery.
    #[inline]
    #[must_use]
    pub const fn min_days(&self) -> u32 {
        self.min_days
    }

    /// Slowest expected delivery.
    #[inline]
    #[must_use]
    pub const fn max_days(&self) -> u32 {
        self.max_days
    }
}

impl fmt::Display for ShippingTimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} days", self.min_days, self.max_days)
    }
}

/// Additive components of a quote's total cost.
///
/// # Invariants
///
/// - Every component is non-negative
/// - `total()` is the exact sum of the four components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    shipping_cost: Decimal,
    service_fee: Decimal,
    oversized_fee: Decimal,
    overweight_fee: Decimal,
}

impl CostBreakdown {
    /// Creates a breakdown.
    #[must_use]
    pub const fn new(
        shipping_cost: Decimal,
        service_fee: Decimal,
        oversized_fee: Decimal,
        overweight_fee: Decimal,
    ) -> Self {
        Self {
            shipping_cost,
            service_fee,
            oversized_fee,
            overweight_fee,
        }
    }

    /// Chargeable weight times the bracket's per-kilogram rate.
    #[inline]
    #[must_use]
    pub fn shipping_cost(&self) -> Decimal {
        self.shipping_cost
    }

    /// Per-shipment origin fee.
    #[inline]
    #[must_use]
    pub fn service_fee(&self) -> Decimal {
        self.service_fee
    }

    /// Sum of oversize surcharges over all boxes.
    #[inline]
    #[must_use]
    pub fn oversized_fee(&self) -> Decimal {
        self.oversized_fee
    }

    /// Sum of overweight surcharges over all boxes.
    #[inline]
    #[must_use]
    pub fn overweight_fee(&self) -> Decimal {
        self.overweight_fee
    }

    /// Sum of all components.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the sum overflows.
    pub fn total(&self) -> ArithmeticResult<Decimal> {
        checked_sum([
            self.shipping_cost,
            self.service_fee,
            self.overweight_fee,
            self.oversized_fee,
        ])
    }
}

/// A shipping offer for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    shipping_channel: ShippingChannel,
    total_cost: Decimal,
    cost_breakdown: CostBreakdown,
    shipping_time_range: ShippingTimeRange,
}

impl Quote {
    /// Creates a quote whose total is the sum of the breakdown.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the total overflows.
    pub fn new(
        shipping_channel: ShippingChannel,
        cost_breakdown: CostBreakdown,
        shipping_time_range: ShippingTimeRange,
    ) -> ArithmeticResult<Self> {
        Ok(Self {
            shipping_channel,
            total_cost: cost_breakdown.total()?,
            cost_breakdown,
            shipping_time_range,
        })
    }

    /// The channel this quote is for.
    #[inline]
    #[must_use]
    pub fn shipping_channel(&self) -> ShippingChannel {
        self.shipping_channel
    }

    /// Total price.
    #[inline]
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Price components.
    #[inline]
    #[must_use]
    pub fn cost_breakdown(&self) -> &CostBreakdown {
        &self.cost_breakdown
    }

    /// Delivery-time estimate.
    #[inline]
    #[must_use]
    pub fn shipping_time_range(&self) -> ShippingTimeRange {
        self.shipping_time_range
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({} {} in {})",
            self.shipping_channel, self.total_cost, self.shipping_time_range
        )
    }
}
