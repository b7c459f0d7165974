//! # REST Handlers
//!
//! Request/response DTOs and axum handlers for the quote API.
//!
//! Request bodies are converted into domain types with `TryFrom`, which is
//! where shipment validation happens. Errors are rendered as
//! [`ErrorResponse`] with one of two codes: `INVALID_INPUT` (400) or
//! `QUOTE_UNAVAILABLE` (500). The latter never carries internal detail.

use crate::application::error::{ApplicationError, ErrorCategory};
use crate::application::services::QuoteAggregationEngine;
use crate::domain::entities::{CostBreakdown, Quote, ShipmentBox, ShipmentRequest};
use crate::domain::value_objects::ShippingChannel;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

// ============================================================================
// Application State
// ============================================================================

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Quote engine shared across requests.
    pub engine: Arc<QuoteAggregationEngine>,
}

impl AppState {
    /// Creates state around an engine.
    #[must_use]
    pub fn new(engine: Arc<QuoteAggregationEngine>) -> Self {
        Self { engine }
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// One group of identical boxes in a quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDto {
    /// Number of identical boxes.
    pub count: i64,
    /// Weight of one box in kilograms.
    #[serde(with = "rust_decimal::serde::float")]
    pub weight_kg: Decimal,
    /// Length in centimetres.
    #[serde(with = "rust_decimal::serde::float")]
    pub length: Decimal,
    /// Width in centimetres.
    #[serde(with = "rust_decimal::serde::float")]
    pub width: Decimal,
    /// Height in centimetres.
    #[serde(with = "rust_decimal::serde::float")]
    pub height: Decimal,
}

/// Body of `POST /v1/quotes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequestDto {
    /// Origin country.
    pub starting_country: String,
    /// Destination country.
    pub destination_country: String,
    /// Box groups.
    pub boxes: Vec<BoxDto>,
}

impl TryFrom<QuoteRequestDto> for ShipmentRequest {
    type Error = ApplicationError;

    fn try_from(dto: QuoteRequestDto) -> Result<Self, Self::Error> {
        let boxes = dto
            .boxes
            .into_iter()
            .enumerate()
            .map(|(index, b)| -> Result<ShipmentBox, ApplicationError> {
                let count = u32::try_from(b.count).map_err(|_| {
                    ApplicationError::validation(format!(
                        "box {index}: count must be a positive integer, got {}",
                        b.count
                    ))
                })?;
                Ok(ShipmentBox::new(count, b.weight_kg, b.length, b.width, b.height))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request = ShipmentRequest::new(dto.starting_country, dto.destination_country, boxes);
        request
            .validate()
            .map_err(|e| ApplicationError::validation(e.to_string()))?;
        Ok(request)
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Cost components of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownResponse {
    /// Chargeable weight times the bracket rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_cost: Decimal,
    /// Flat origin service fee.
    #[serde(with = "rust_decimal::serde::float")]
    pub service_fee: Decimal,
    /// Oversize surcharges.
    #[serde(with = "rust_decimal::serde::float")]
    pub oversized_fee: Decimal,
    /// Overweight surcharges.
    #[serde(with = "rust_decimal::serde::float")]
    pub overweight_fee: Decimal,
}

impl From<&CostBreakdown> for CostBreakdownResponse {
    fn from(breakdown: &CostBreakdown) -> Self {
        Self {
            shipping_cost: breakdown.shipping_cost(),
            service_fee: breakdown.service_fee(),
            oversized_fee: breakdown.oversized_fee(),
            overweight_fee: breakdown.overweight_fee(),
        }
    }
}

/// Delivery-time range of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTimeRangeResponse {
    /// Minimum days in transit.
    pub min_days: u32,
    /// Maximum days in transit.
    pub max_days: u32,
}

/// One channel quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Channel quoted.
    pub shipping_channel: ShippingChannel,
    /// Sum of all cost components.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    /// Cost components.
    pub cost_breakdown: CostBreakdownResponse,
    /// Delivery-time range.
    pub shipping_time_range: ShippingTimeRangeResponse,
}

impl From<&Quote> for QuoteResponse {
    fn from(quote: &Quote) -> Self {
        let range = quote.shipping_time_range();
        Self {
            shipping_channel: quote.shipping_channel(),
            total_cost: quote.total_cost(),
            cost_breakdown: CostBreakdownResponse::from(quote.cost_breakdown()),
            shipping_time_range: ShippingTimeRangeResponse {
                min_days: range.min_days(),
                max_days: range.max_days(),
            },
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

// ============================================================================
// Error Mapping
// ============================================================================

const QUOTE_UNAVAILABLE_MESSAGE: &str = "quote unavailable";

/// Handler error rendered as an [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl ApiError {
    /// Returns the wrapped application error.
    #[must_use]
    pub fn inner(&self) -> &ApplicationError {
        &self.0
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCategory::QuoteUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the public response body.
    #[must_use]
    pub fn body(&self) -> ErrorResponse {
        let category = self.0.category();
        let message = match category {
            ErrorCategory::InvalidInput => self.0.to_string(),
            ErrorCategory::QuoteUnavailable => QUOTE_UNAVAILABLE_MESSAGE.to_string(),
        };
        ErrorResponse {
            code: category.code().to_string(),
            message,
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ApplicationError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.category() {
            ErrorCategory::InvalidInput => warn!(error = %self.0, "rejected quote request"),
            ErrorCategory::QuoteUnavailable => error!(error = %self.0, "quote request failed"),
        }
        (self.status(), Json(self.body())).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /`
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "Hello": "World" }))
}

/// `GET /api/v1/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /v1/quotes`
///
/// # Errors
///
/// Returns 400 for malformed or invalid shipments and 500 when no quote can
/// be produced.
pub async fn create_quotes(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuoteRequestDto>, JsonRejection>,
) -> Result<Json<Vec<QuoteResponse>>, ApiError> {
    let Json(dto) = payload?;
    let request = ShipmentRequest::try_from(dto)?;

    let quotes = state.engine.quote(&request).await?;
    info!(lane = %request.lane(), quotes = quotes.len(), "quotes issued");

    Ok(Json(quotes.iter().map(QuoteResponse::from).collect()))
}
