//! # REST API
//!
//! HTTP endpoints using axum.
//!
//! # Endpoints
//!
//! - `GET /` - Liveness greeting
//! - `GET /api/v1/health` - Health check with crate version
//! - `POST /v1/quotes` - Quote a shipment on every available channel
//!
//! # Usage
//!
//! ```ignore
//! use shipping_quote::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(Arc::new(engine)));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    ApiError, AppState, BoxDto, CostBreakdownResponse, ErrorResponse, HealthResponse,
    QuoteRequestDto, QuoteResponse, ShippingTimeRangeResponse,
};
pub use routes::create_router;
