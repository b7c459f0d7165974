//! # Shipping Quote
//!
//! Shipping cost quotes for multi-box shipments across air and ocean
//! channels.
//!
//! The crate is organised in layers:
//!
//! - [`domain`]: boxes, shipments, rate records, quotes and the per-box
//!   surcharge rules
//! - [`application`]: the quote aggregation engine and its error type
//! - [`infrastructure`]: rate repositories (in-memory, PostgreSQL) and seeding
//! - [`api`]: the REST surface
//! - [`config`] and [`telemetry`]: process bootstrap
//!
//! # Examples
//!
//! ```
//! use shipping_quote::application::services::QuoteAggregationEngine;
//! use shipping_quote::domain::entities::{ShipmentBox, ShipmentRequest};
//! use shipping_quote::infrastructure::persistence::in_memory::InMemoryRateRepository;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let repository = Arc::new(InMemoryRateRepository::new());
//! let engine = QuoteAggregationEngine::with_defaults(repository);
//!
//! let request = ShipmentRequest::new(
//!     "China",
//!     "USA",
//!     vec![ShipmentBox::new(1, Decimal::from(10), Decimal::ONE, Decimal::ONE, Decimal::ONE)],
//! );
//!
//! // No rates are loaded, so the mandatory air channel is unavailable.
//! let result = engine.quote(&request).await;
//! assert!(result.unwrap_err().is_rate_unavailable());
//! # });
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
