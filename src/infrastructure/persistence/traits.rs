//! # Repository Traits
//!
//! Port definitions for rate table access.
//!
//! The quote engine only reads rates, through [`RateRepository`]. Seeding
//! writes through [`RateStore`]. Implementations exist for in-memory storage
//! and PostgreSQL.
//!
//! # Available Ports
//!
//! - [`RateRepository`]: channel rate and bracket lookup
//! - [`RateStore`]: writing channel rates during seeding
//!
//! # Examples
//!
//! ```ignore
//! use shipping_quote::infrastructure::persistence::traits::RateRepository;
//!
//! async fn air_bracket(repo: &impl RateRepository, lane: &Lane, weight: Decimal) {
//!     if let Some(rate) = repo.get_channel_rate(lane, ShippingChannel::Air).await? {
//!         let bracket = repo.get_bracket(rate.id(), weight).await?;
//!     }
//! }
//! ```

use crate::domain::entities::{ChannelRate, NewChannelRate, RateBracket};
use crate::domain::value_objects::{ChannelRateId, Lane, ShippingChannel};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
///
/// "Not found" on a lookup is expressed as `Ok(None)`, never as an error;
/// [`RepositoryError::NotFound`] is reserved for references to records that
/// must exist, such as a bracket lookup against an unknown rate id.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Record failed validation before being written.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Stored data could not be mapped to domain types.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an invalid record error.
    #[must_use]
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read access to the rate tables.
///
/// Both lookups return `Ok(None)` when nothing matches so that the caller
/// decides explicitly whether absence is fatal (mandatory channel) or simply
/// omitted (optional channel).
///
/// # Invariants
///
/// Implementations must never hold two brackets of one channel rate whose
/// intervals overlap. If that invariant is broken anyway, `get_bracket`
/// returns the first match in stored order.
#[async_trait]
pub trait RateRepository: Send + Sync + fmt::Debug {
    /// Gets the rate record for a lane and channel.
    ///
    /// Returns `None` if the lane is not served by that channel.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn get_channel_rate(
        &self,
        lane: &Lane,
        channel: ShippingChannel,
    ) -> RepositoryResult<Option<ChannelRate>>;

    /// Gets the bracket of a rate record containing `weight`.
    ///
    /// Matching is `min_weight_kg < weight <= max_weight_kg`. Returns `None`
    /// if no bracket contains the weight.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn get_bracket(
        &self,
        channel_rate_id: ChannelRateId,
        weight: Decimal,
    ) -> RepositoryResult<Option<RateBracket>>;
}

/// Write access used to load rate tables.
#[async_trait]
pub trait RateStore: Send + Sync + fmt::Debug {
    /// Saves a channel rate with its brackets and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the lane and channel already
    /// have a rate, `RepositoryError::InvalidRecord` if the record fails
    /// validation, or a backend error.
    async fn save_channel_rate(&self, rate: &NewChannelRate) -> RepositoryResult<ChannelRateId>;

    /// Counts stored channel rates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn count(&self) -> RepositoryResult<u64>;
}
