//! # Application Errors
//!
//! Error types for the quote use case.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Business rule violations, arithmetic
//! ├── Repository(RepositoryError)  - Rate table access failures
//! ├── Validation(String)           - Invalid shipment input
//! ├── RateUnavailable { .. }       - Mandatory channel has no rate/bracket
//! ├── Timeout(String)              - Rate lookup exceeded its deadline
//! └── Internal(String)             - Anything else
//! ```
//!
//! Internally every variant is distinct. At the service boundary they
//! collapse into two [`ErrorCategory`] values: invalid input, and a single
//! user-safe "quote unavailable" for everything else.
//!
//! # Examples
//!
//! ```
//! use shipping_quote::application::error::{ApplicationError, ErrorCategory};
//!
//! let err = ApplicationError::validation("count must be positive");
//! assert_eq!(err.category(), ErrorCategory::InvalidInput);
//!
//! let err = ApplicationError::internal("unexpected");
//! assert_eq!(err.category(), ErrorCategory::QuoteUnavailable);
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{ArithmeticError, Lane, ShippingChannel};
use crate::infrastructure::persistence::RepositoryError;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Why a channel could not be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateGap {
    /// The lane has no rate record for the channel.
    NoChannelRate,
    /// The rate record has no bracket containing the chargeable weight.
    NoBracket,
}

impl fmt::Display for RateGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChannelRate => write!(f, "no channel rate"),
            Self::NoBracket => write!(f, "no matching weight bracket"),
        }
    }
}

/// Externally visible failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request itself is malformed.
    InvalidInput,
    /// No quote can be produced; details stay internal.
    QuoteUnavailable,
}

impl ErrorCategory {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::QuoteUnavailable => "QUOTE_UNAVAILABLE",
        }
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Rate table access failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mandatory channel could not be priced.
    #[error("rate unavailable for {lane} {channel} at {chargeable_weight} kg: {gap}")]
    RateUnavailable {
        /// Requested lane.
        lane: Lane,
        /// Channel that failed.
        channel: ShippingChannel,
        /// Aggregate chargeable weight of the shipment.
        chargeable_weight: Decimal,
        /// Which lookup came back empty.
        gap: RateGap,
    },

    /// A rate lookup exceeded its deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a rate unavailable error.
    #[must_use]
    pub fn rate_unavailable(
        lane: &Lane,
        channel: ShippingChannel,
        chargeable_weight: Decimal,
        gap: RateGap,
    ) -> Self {
        Self::RateUnavailable {
            lane: lane.clone(),
            channel,
            chargeable_weight,
            gap,
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is invalid caller input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Domain(e) => e.is_invalid_input(),
            _ => false,
        }
    }

    /// Returns true if a mandatory channel had no rate or bracket.
    #[must_use]
    pub fn is_rate_unavailable(&self) -> bool {
        matches!(self, Self::RateUnavailable { .. })
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Repository(e) => e.is_retryable(),
            Self::Timeout(_) => true,
            _ => false,
        }
    }

    /// Returns the externally visible failure class.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        if self.is_validation() {
            ErrorCategory::InvalidInput
        } else {
            ErrorCategory::QuoteUnavailable
        }
    }
}

impl From<ArithmeticError> for ApplicationError {
    fn from(err: ArithmeticError) -> Self {
        Self::Domain(DomainError::from(err))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
