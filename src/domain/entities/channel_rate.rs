//! # Channel Rate Entities
//!
//! Read-only rate reference data for one (origin, destination, channel).
//!
//! A [`ChannelRate`] declares the delivery-time range of a channel on a lane
//! and owns an ordered list of [`RateBracket`]s. Brackets cover the weight
//! interval `(min_weight_kg, max_weight_kg]`: the lower bound is exclusive and
//! the upper bound inclusive, so a weight exactly equal to a bracket's maximum
//! belongs to that bracket rather than the next one up.
//!
//! # Examples
//!
//! ```
//! use shipping_quote::domain::entities::RateBracket;
//! use rust_decimal::Decimal;
//!
//! let bracket = RateBracket::new(Decimal::from(100), Decimal::from(500), Decimal::new(35, 1));
//! assert!(!bracket.contains(Decimal::from(100)));
//! assert!(bracket.contains(Decimal::from(500)));
//! ```

use crate::domain::entities::quote::ShippingTimeRange;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{ChannelRateId, Lane, ShippingChannel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A per-kilogram price for a weight interval `(min, max]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBracket {
    min_weight_kg: Decimal,
    max_weight_kg: Decimal,
    per_kg_rate: Decimal,
}

impl RateBracket {
    /// Creates a bracket without validation.
    #[must_use]
    pub fn new(min_weight_kg: Decimal, max_weight_kg: Decimal, per_kg_rate: Decimal) -> Self {
        Self {
            min_weight_kg,
            max_weight_kg,
            per_kg_rate,
        }
    }

    /// Exclusive lower bound.
    #[inline]
    #[must_use]
    pub fn min_weight_kg(&self) -> Decimal {
        self.min_weight_kg
    }

    /// Inclusive upper bound.
    #[inline]
    #[must_use]
    pub fn max_weight_kg(&self) -> Decimal {
        self.max_weight_kg
    }

    /// Price per chargeable kilogram.
    #[inline]
    #[must_use]
    pub fn per_kg_rate(&self) -> Decimal {
        self.per_kg_rate
    }

    /// Returns true if `min < weight <= max`.
    #[inline]
    #[must_use]
    pub fn contains(&self, weight: Decimal) -> bool {
        self.min_weight_kg < weight && weight <= self.max_weight_kg
    }

    /// Returns true if the two half-open intervals share any weight.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_weight_kg < other.max_weight_kg && other.min_weight_kg < self.max_weight_kg
    }

    fn validate(&self) -> DomainResult<()> {
        if self.min_weight_kg < Decimal::ZERO {
            return Err(DomainError::invalid_rate(format!(
                "bracket min_weight_kg {} is negative",
                self.min_weight_kg
            )));
        }
        if self.min_weight_kg >= self.max_weight_kg {
            return Err(DomainError::invalid_rate(format!(
                "bracket ({}, {}] is empty",
                self.min_weight_kg, self.max_weight_kg
            )));
        }
        if self.per_kg_rate < Decimal::ZERO {
            return Err(DomainError::invalid_rate(format!(
                "per_kg_rate {} is negative",
                self.per_kg_rate
            )));
        }
        Ok(())
    }
}

/// A channel rate that has not been stored yet.
///
/// The store assigns the identifier on save; see
/// [`NewChannelRate::into_channel_rate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChannelRate {
    lane: Lane,
    channel: ShippingChannel,
    shipping_time_range: ShippingTimeRange,
    brackets: Vec<RateBracket>,
}

impl NewChannelRate {
    /// Creates an unsaved channel rate.
    #[must_use]
    pub fn new(
        lane: Lane,
        channel: ShippingChannel,
        shipping_time_range: ShippingTimeRange,
        brackets: Vec<RateBracket>,
    ) -> Self {
        Self {
            lane,
            channel,
            shipping_time_range,
            brackets,
        }
    }

    /// The lane this rate applies to.
    #[must_use]
    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    /// The channel this rate applies to.
    #[must_use]
    pub fn channel(&self) -> ShippingChannel {
        self.channel
    }

    /// Delivery-time bounds.
    #[must_use]
    pub fn shipping_time_range(&self) -> ShippingTimeRange {
        self.shipping_time_range
    }

    /// Brackets in stored order.
    #[must_use]
    pub fn brackets(&self) -> &[RateBracket] {
        &self.brackets
    }

    /// Checks the record before it is written to a store.
    ///
    /// Gaps between brackets are allowed (a weight in a gap simply has no
    /// offer); overlapping brackets are not, since bracket lookup must be
    /// unambiguous.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRate` for an inverted time range, an empty
    /// or negative bracket, or two overlapping brackets.
    pub fn validate(&self) -> DomainResult<()> {
        if self.shipping_time_range.min_days() > self.shipping_time_range.max_days() {
            return Err(DomainError::invalid_rate(format!(
                "{} {}: min_days {} exceeds max_days {}",
                self.lane,
                self.channel,
                self.shipping_time_range.min_days(),
                self.shipping_time_range.max_days()
            )));
        }
        for (i, bracket) in self.brackets.iter().enumerate() {
            bracket.validate()?;
            if self.brackets.iter().skip(i + 1).any(|b| b.overlaps(bracket)) {
                return Err(DomainError::invalid_rate(format!(
                    "{} {}: bracket ({}, {}] overlaps another bracket",
                    self.lane,
                    self.channel,
                    bracket.min_weight_kg(),
                    bracket.max_weight_kg()
                )));
            }
        }
        Ok(())
    }

    /// Attaches a store-assigned identifier.
    #[must_use]
    pub fn into_channel_rate(self, id: ChannelRateId) -> ChannelRate {
        ChannelRate {
            id,
            lane: self.lane,
            channel: self.channel,
            shipping_time_range: self.shipping_time_range,
            brackets: self.brackets,
        }
    }
}

/// Stored rate record for one (origin, destination, channel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRate {
    id: ChannelRateId,
    lane: Lane,
    channel: ShippingChannel,
    shipping_time_range: ShippingTimeRange,
    brackets: Vec<RateBracket>,
}

impl ChannelRate {
    /// Reconstructs a stored record.
    #[must_use]
    pub fn from_parts(
        id: ChannelRateId,
        lane: Lane,
        channel: ShippingChannel,
        shipping_time_range: ShippingTimeRange,
        brackets: Vec<RateBracket>,
    ) -> Self {
        Self {
            id,
            lane,
            channel,
            shipping_time_range,
            brackets,
        }
    }

    /// Store identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ChannelRateId {
        self.id
    }

    /// The lane this rate applies to.
    #[inline]
    #[must_use]
    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    /// The channel this rate applies to.
    #[inline]
    #[must_use]
    pub fn channel(&self) -> ShippingChannel {
        self.channel
    }

    /// Delivery-time bounds.
    #[inline]
    #[must_use]
    pub fn shipping_time_range(&self) -> ShippingTimeRange {
        self.shipping_time_range
    }

    /// Brackets in stored order.
    #[inline]
    #[must_use]
    pub fn brackets(&self) -> &[RateBracket] {
        &self.brackets
    }

    /// Returns true if this record serves the given lane and channel.
    #[must_use]
    pub fn serves(&self, lane: &Lane, channel: ShippingChannel) -> bool {
        self.channel == channel && &self.lane == lane
    }

    /// Returns every bracket containing `weight`, in stored order.
    ///
    /// More than one match means the rate data is inconsistent.
    pub fn matching_brackets(&self, weight: Decimal) -> impl Iterator<Item = &RateBracket> {
        self.brackets.iter().filter(move |b| b.contains(weight))
    }

    /// Returns the first bracket, by stored order, containing `weight`.
    #[must_use]
    pub fn find_bracket(&self, weight: Decimal) -> Option<&RateBracket> {
        self.matching_brackets(weight).next()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bracket(min: i64, max: i64, rate: Decimal) -> RateBracket {
        RateBracket::new(Decimal::from(min), Decimal::from(max), rate)
    }

    fn air_rate(brackets: Vec<RateBracket>) -> NewChannelRate {
        NewChannelRate::new(
            Lane::new("China", "USA"),
            ShippingChannel::Air,
            ShippingTimeRange::new(15, 20),
            brackets,
        )
    }

    #[test]
    fn bracket_lower_bound_is_exclusive() {
        let b = bracket(100, 500, Decimal::ONE);
        assert!(!b.contains(Decimal::from(100)));
        assert!(b.contains(Decimal::new(10001, 2)));
    }

    #[test]
    fn bracket_upper_bound_is_inclusive() {
        let b = bracket(100, 500, Decimal::ONE);
        assert!(b.contains(Decimal::from(500)));
        assert!(!b.contains(Decimal::new(50001, 2)));
    }

    #[test]
    fn find_bracket_at_boundary_picks_lower_bracket() {
        let rate = air_rate(vec![
            bracket(0, 100, Decimal::from(4)),
            bracket(100, 500, Decimal::new(35, 1)),
        ])
        .into_channel_rate(ChannelRateId::new(1));

        let found = rate.find_bracket(Decimal::from(100)).unwrap();
        assert_eq!(found.per_kg_rate(), Decimal::from(4));
    }

    #[test]
    fn find_bracket_beyond_last_is_none() {
        let rate = air_rate(vec![bracket(0, 100, Decimal::from(4))])
            .into_channel_rate(ChannelRateId::new(1));
        assert!(rate.find_bracket(Decimal::from(100_000)).is_none());
    }

    #[test]
    fn find_bracket_prefers_stored_order() {
        let rate = ChannelRate::from_parts(
            ChannelRateId::new(1),
            Lane::new("China", "USA"),
            ShippingChannel::Air,
            ShippingTimeRange::new(1, 2),
            vec![
                bracket(0, 200, Decimal::from(9)),
                bracket(100, 300, Decimal::from(1)),
            ],
        );
        assert_eq!(rate.matching_brackets(Decimal::from(150)).count(), 2);
        assert_eq!(
            rate.find_bracket(Decimal::from(150)).unwrap().per_kg_rate(),
            Decimal::from(9)
        );
    }

    #[test]
    fn validate_accepts_adjacent_brackets() {
        let rate = air_rate(vec![
            bracket(0, 100, Decimal::from(4)),
            bracket(100, 500, Decimal::new(35, 1)),
        ]);
        assert!(rate.validate().is_ok());
    }

    #[test]
    fn validate_rejects_overlap() {
        let rate = air_rate(vec![
            bracket(0, 200, Decimal::from(4)),
            bracket(100, 500, Decimal::new(35, 1)),
        ]);
        assert!(rate.validate().unwrap_err().to_string().contains("overlaps"));
    }

    #[test]
    fn validate_rejects_empty_bracket() {
        let rate = air_rate(vec![bracket(100, 100, Decimal::from(4))]);
        assert!(rate.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_time_range() {
        let rate = NewChannelRate::new(
            Lane::new("China", "USA"),
            ShippingChannel::Ocean,
            ShippingTimeRange::new(50, 45),
            vec![],
        );
        assert!(rate.validate().unwrap_err().to_string().contains("min_days"));
    }

    #[test]
    fn serves_matches_lane_and_channel() {
        let rate = air_rate(vec![]).into_channel_rate(ChannelRateId::new(3));
        assert!(rate.serves(&Lane::new("China", "USA"), ShippingChannel::Air));
        assert!(!rate.serves(&Lane::new("China", "USA"), ShippingChannel::Ocean));
        assert!(!rate.serves(&Lane::new("India", "USA"), ShippingChannel::Air));
    }
}
