//! # Domain Entities
//!
//! Request, reference-data and result types of the quote computation.
//!
//! ## Request-scoped
//!
//! - [`ShipmentRequest`] and [`ShipmentBox`]: the shipment being quoted
//! - [`Quote`], [`CostBreakdown`], [`ShippingTimeRange`]: the result
//!
//! ## Reference data
//!
//! - [`ChannelRate`] and [`RateBracket`]: read-only rate tables

pub mod channel_rate;
pub mod quote;
pub mod shipment;

pub use channel_rate::{ChannelRate, NewChannelRate, RateBracket};
pub use quote::{CostBreakdown, Quote, ShippingTimeRange};
pub use shipment::{ShipmentBox, ShipmentRequest};
