//! # Quote Aggregation Engine
//!
//! Turns a shipment into one quote per available shipping channel.
//!
//! The [`QuoteAggregationEngine`] evaluates every box, sums weights and
//! surcharges at shipment level, and prices each configured channel against
//! the rate tables. A mandatory channel that cannot be priced fails the whole
//! request; an optional one is left out of the result.
//!
//! ```text
//! shipping_cost = chargeable_weight * per_kg_rate
//! total_cost    = shipping_cost + service_fee + overweight_fee + oversized_fee
//! ```

use crate::application::error::{ApplicationError, ApplicationResult, RateGap};
use crate::domain::entities::{CostBreakdown, Quote, ShipmentRequest};
use crate::domain::services::{BoxCost, BoxCostEvaluator, ServiceFeeSchedule};
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use crate::domain::value_objects::{Lane, ShippingChannel};
use crate::infrastructure::persistence::{RateRepository, RepositoryResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Whether a channel must be priced for a quote request to succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRequirement {
    /// Channel to price.
    pub channel: ShippingChannel,
    /// Fail the request when this channel cannot be priced.
    pub mandatory: bool,
}

impl ChannelRequirement {
    /// A channel that must be priced.
    #[must_use]
    pub const fn mandatory(channel: ShippingChannel) -> Self {
        Self {
            channel,
            mandatory: true,
        }
    }

    /// A channel that is omitted when it cannot be priced.
    #[must_use]
    pub const fn optional(channel: ShippingChannel) -> Self {
        Self {
            channel,
            mandatory: false,
        }
    }
}

/// Configuration for quote aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Channels to price, in output order.
    pub channels: Vec<ChannelRequirement>,
    /// Per-lookup timeout in milliseconds.
    pub lookup_timeout_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            channels: vec![
                ChannelRequirement::mandatory(ShippingChannel::Air),
                ChannelRequirement::optional(ShippingChannel::Ocean),
            ],
            lookup_timeout_ms: 5000,
        }
    }
}

impl AggregationConfig {
    /// Creates the default configuration with a different lookup timeout.
    #[must_use]
    pub fn with_timeout(lookup_timeout_ms: u64) -> Self {
        Self {
            lookup_timeout_ms,
            ..Default::default()
        }
    }

    /// Replaces the channel policy.
    #[must_use]
    pub fn with_channels(mut self, channels: Vec<ChannelRequirement>) -> Self {
        self.channels = channels;
        self
    }

    /// Returns the per-lookup timeout.
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

/// Shipment-level weight and fees shared by every channel quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShipmentTotals {
    /// Sum of per-box chargeable weights, in kilograms.
    pub chargeable_weight: Decimal,
    /// Sum of per-box oversize surcharges.
    pub oversized_fee: Decimal,
    /// Sum of per-box overweight surcharges.
    pub overweight_fee: Decimal,
    /// Flat fee for the origin country, charged once.
    pub service_fee: Decimal,
}

enum ChannelOutcome {
    Priced(Quote),
    Unavailable(RateGap),
}

/// Prices shipments against the rate tables.
///
/// Holds no mutable state; share it behind an `Arc` across requests.
#[derive(Debug)]
pub struct QuoteAggregationEngine {
    repository: Arc<dyn RateRepository>,
    evaluator: BoxCostEvaluator,
    service_fees: ServiceFeeSchedule,
    config: AggregationConfig,
}

impl QuoteAggregationEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(
        repository: Arc<dyn RateRepository>,
        evaluator: BoxCostEvaluator,
        service_fees: ServiceFeeSchedule,
        config: AggregationConfig,
    ) -> Self {
        Self {
            repository,
            evaluator,
            service_fees,
            config,
        }
    }

    /// Creates an engine with the default surcharge policy, fee schedule and
    /// channel policy.
    #[must_use]
    pub fn with_defaults(repository: Arc<dyn RateRepository>) -> Self {
        Self::new(
            repository,
            BoxCostEvaluator::default(),
            ServiceFeeSchedule::default(),
            AggregationConfig::default(),
        )
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the box cost evaluator.
    #[must_use]
    pub fn evaluator(&self) -> &BoxCostEvaluator {
        &self.evaluator
    }

    /// Returns the service fee schedule.
    #[must_use]
    pub fn service_fees(&self) -> &ServiceFeeSchedule {
        &self.service_fees
    }

    /// Sums box costs and looks up the service fee for a shipment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if a sum leaves the decimal range.
    pub fn shipment_totals(&self, request: &ShipmentRequest) -> ApplicationResult<ShipmentTotals> {
        let origin = request.starting_country();
        let mut sum = BoxCost::default();
        for shipment_box in request.boxes() {
            let cost = self.evaluator.evaluate(shipment_box, origin)?;
            sum = sum.safe_add(cost)?;
        }

        Ok(ShipmentTotals {
            chargeable_weight: sum.chargeable_weight,
            oversized_fee: sum.oversized_fee,
            overweight_fee: sum.overweight_fee,
            service_fee: self.service_fees.fee_for(origin),
        })
    }

    /// Quotes a shipment on every configured channel.
    ///
    /// Quotes come back in channel policy order. The request is expected to
    /// have passed [`ShipmentRequest::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A mandatory channel has no rate or no bracket for the weight
    /// - No configured channel could be priced
    /// - A rate lookup fails or exceeds `lookup_timeout_ms`
    /// - A cost leaves the decimal range
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(lane = %request.lane(), boxes = request.boxes().len())
    )]
    pub async fn quote(&self, request: &ShipmentRequest) -> ApplicationResult<Vec<Quote>> {
        let totals = self.shipment_totals(request)?;
        debug!(
            chargeable_weight = %totals.chargeable_weight,
            overweight_fee = %totals.overweight_fee,
            oversized_fee = %totals.oversized_fee,
            service_fee = %totals.service_fee,
            "shipment totals computed"
        );

        let lane = request.lane();
        let mut quotes = Vec::with_capacity(self.config.channels.len());
        let mut last_gap = None;

        for requirement in &self.config.channels {
            match self.price_channel(lane, requirement.channel, &totals).await? {
                ChannelOutcome::Priced(quote) => quotes.push(quote),
                ChannelOutcome::Unavailable(gap) if requirement.mandatory => {
                    return Err(ApplicationError::rate_unavailable(
                        lane,
                        requirement.channel,
                        totals.chargeable_weight,
                        gap,
                    ));
                }
                ChannelOutcome::Unavailable(gap) => {
                    debug!(channel = %requirement.channel, %gap, "optional channel omitted");
                    last_gap = Some((requirement.channel, gap));
                }
            }
        }

        if quotes.is_empty() {
            return Err(match last_gap {
                Some((channel, gap)) => ApplicationError::rate_unavailable(
                    lane,
                    channel,
                    totals.chargeable_weight,
                    gap,
                ),
                None => ApplicationError::internal("no shipping channels configured"),
            });
        }

        Ok(quotes)
    }

    async fn price_channel(
        &self,
        lane: &Lane,
        channel: ShippingChannel,
        totals: &ShipmentTotals,
    ) -> ApplicationResult<ChannelOutcome> {
        let weight = totals.chargeable_weight;

        let rate = self
            .bounded(channel, self.repository.get_channel_rate(lane, channel))
            .await?;
        let Some(rate) = rate else {
            return Ok(ChannelOutcome::Unavailable(RateGap::NoChannelRate));
        };

        let matches = rate.matching_brackets(weight).count();
        if matches > 1 {
            warn!(
                %lane,
                %channel,
                rate_id = %rate.id(),
                %weight,
                matches,
                "overlapping rate brackets, using the first"
            );
        }

        let bracket = self
            .bounded(channel, self.repository.get_bracket(rate.id(), weight))
            .await?;
        let Some(bracket) = bracket else {
            return Ok(ChannelOutcome::Unavailable(RateGap::NoBracket));
        };

        let shipping_cost = weight.safe_mul(bracket.per_kg_rate())?;
        let breakdown = CostBreakdown::new(
            shipping_cost,
            totals.service_fee,
            totals.oversized_fee,
            totals.overweight_fee,
        );
        let quote = Quote::new(channel, breakdown, rate.shipping_time_range())?;

        debug!(%channel, total_cost = %quote.total_cost(), "channel priced");
        Ok(ChannelOutcome::Priced(quote))
    }

    async fn bounded<T, F>(&self, channel: ShippingChannel, lookup: F) -> ApplicationResult<T>
    where
        F: Future<Output = RepositoryResult<T>>,
    {
        match timeout(self.config.lookup_timeout(), lookup).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ApplicationError::timeout(format!(
                "{channel} rate lookup exceeded {}ms",
                self.config.lookup_timeout_ms
            ))),
        }
    }
}
