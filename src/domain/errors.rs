//! # Domain Errors
//!
//! Business rule violations raised by domain types.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Domain layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A shipment or one of its boxes failed numeric sanity checks.
    #[error("invalid shipment: {0}")]
    InvalidShipment(String),

    /// A rate record or bracket is malformed.
    #[error("invalid rate: {0}")]
    InvalidRate(String),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid shipment error.
    #[must_use]
    pub fn invalid_shipment(message: impl Into<String>) -> Self {
        Self::InvalidShipment(message.into())
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(message: impl Into<String>) -> Self {
        Self::InvalidRate(message.into())
    }

    /// Returns true if this error describes bad caller input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidShipment(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_shipment_is_invalid_input() {
        let err = DomainError::invalid_shipment("count must be positive");
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("count must be positive"));
    }

    #[test]
    fn arithmetic_is_not_invalid_input() {
        let err: DomainError = ArithmeticError::Overflow.into();
        assert!(!err.is_invalid_input());
        assert!(err.to_string().contains("overflow"));
    }
}
