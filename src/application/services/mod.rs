//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`QuoteAggregationEngine`]: prices a shipment on every configured channel

pub mod quote_aggregation;

pub use quote_aggregation::{
    AggregationConfig, ChannelRequirement, QuoteAggregationEngine, ShipmentTotals,
};
