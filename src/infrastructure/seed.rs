//! # Rate Seeding
//!
//! Loads rate tables from a JSON file and writes them through a [`RateStore`].
//!
//! The file is a list of channel rate records:
//!
//! ```json
//! [
//!   {
//!     "starting_country": "China",
//!     "destination_country": "USA",
//!     "shipping_channel": "air",
//!     "shipping_time_range": { "min_days": 15, "max_days": 20 },
//!     "rates": [
//!       { "min_weight_kg": 0, "max_weight_kg": 100, "per_kg_rate": 4.0 }
//!     ]
//!   }
//! ]
//! ```
//!
//! Every record is validated before anything is written, so a bad file leaves
//! the store untouched.

use crate::domain::entities::{NewChannelRate, RateBracket, ShippingTimeRange};
use crate::domain::value_objects::{Lane, ShippingChannel};
use crate::infrastructure::persistence::{RateStore, RepositoryError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Error type for seed loading.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Seed content is not valid JSON for the expected layout.
    #[error("failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record failed validation.
    #[error("invalid seed record {index}: {message}")]
    InvalidRecord {
        /// Zero-based position in the file.
        index: usize,
        /// What was wrong.
        message: String,
    },

    /// Writing to the store failed.
    #[error("failed to store seed record: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result type for seed operations.
pub type SeedResult<T> = Result<T, SeedError>;

/// Delivery-time range as written in the seed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeRecord {
    /// Minimum days in transit.
    pub min_days: u32,
    /// Maximum days in transit.
    pub max_days: u32,
}

/// Weight bracket as written in the seed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRecord {
    /// Exclusive lower bound.
    #[serde(with = "rust_decimal::serde::float")]
    pub min_weight_kg: Decimal,
    /// Inclusive upper bound.
    #[serde(with = "rust_decimal::serde::float")]
    pub max_weight_kg: Decimal,
    /// Price per chargeable kilogram.
    #[serde(with = "rust_decimal::serde::float")]
    pub per_kg_rate: Decimal,
}

/// One channel rate as written in the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Origin country.
    pub starting_country: String,
    /// Destination country.
    pub destination_country: String,
    /// Channel served.
    pub shipping_channel: ShippingChannel,
    /// Delivery-time range.
    pub shipping_time_range: TimeRangeRecord,
    /// Weight brackets.
    pub rates: Vec<BracketRecord>,
}

impl RateRecord {
    /// Converts the record into a domain rate, without validating it.
    #[must_use]
    pub fn to_new_channel_rate(&self) -> NewChannelRate {
        NewChannelRate::new(
            Lane::new(
                self.starting_country.clone(),
                self.destination_country.clone(),
            ),
            self.shipping_channel,
            ShippingTimeRange::new(
                self.shipping_time_range.min_days,
                self.shipping_time_range.max_days,
            ),
            self.rates
                .iter()
                .map(|b| RateBracket::new(b.min_weight_kg, b.max_weight_kg, b.per_kg_rate))
                .collect(),
        )
    }
}

/// Contents of a seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateSeed {
    /// Records in file order.
    pub records: Vec<RateRecord>,
}

impl RateSeed {
    /// Parses seed data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Parse` if the JSON does not match the layout.
    pub fn from_json(json: &str) -> SeedResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Converts and validates every record.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidRecord` for the first record that fails
    /// validation.
    pub fn to_channel_rates(&self) -> SeedResult<Vec<NewChannelRate>> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| -> SeedResult<NewChannelRate> {
                let rate = record.to_new_channel_rate();
                rate.validate().map_err(|e| SeedError::InvalidRecord {
                    index,
                    message: e.to_string(),
                })?;
                Ok(rate)
            })
            .collect()
    }
}

/// Reads and parses a seed file.
///
/// # Errors
///
/// Returns `SeedError::Io` if the file cannot be read, or
/// `SeedError::Parse` if its content is malformed.
pub async fn load_seed_file(path: impl AsRef<Path>) -> SeedResult<RateSeed> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    RateSeed::from_json(&json)
}

/// Validates every record and writes them to the store.
///
/// Returns the number of channel rates written.
///
/// # Errors
///
/// Returns `SeedError::InvalidRecord` before writing anything if a record is
/// invalid, or `SeedError::Repository` if a write fails.
pub async fn seed_store(store: &dyn RateStore, seed: &RateSeed) -> SeedResult<usize> {
    let rates = seed.to_channel_rates()?;
    for rate in &rates {
        let id = store.save_channel_rate(rate).await?;
        info!(
            lane = %rate.lane(),
            channel = %rate.channel(),
            %id,
            brackets = rate.brackets().len(),
            "seeded channel rate"
        );
    }
    Ok(rates.len())
}

/// Seeds the store only when it holds no channel rates yet.
///
/// Returns the number of channel rates written, zero if the store was
/// already populated.
///
/// # Errors
///
/// See [`seed_store`].
pub async fn seed_if_empty(store: &dyn RateStore, seed: &RateSeed) -> SeedResult<usize> {
    let existing = store.count().await?;
    if existing > 0 {
        info!(existing, "rate store already populated, skipping seed");
        return Ok(0);
    }
    seed_store(store, seed).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::RateRepository;
    use crate::infrastructure::persistence::in_memory::InMemoryRateRepository;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {
            "starting_country": "China",
            "destination_country": "USA",
            "shipping_channel": "air",
            "shipping_time_range": { "min_days": 15, "max_days": 20 },
            "rates": [
                { "min_weight_kg": 0, "max_weight_kg": 100, "per_kg_rate": 4.0 },
                { "min_weight_kg": 100, "max_weight_kg": 500, "per_kg_rate": 3.5 }
            ]
        },
        {
            "starting_country": "China",
            "destination_country": "USA",
            "shipping_channel": "ocean",
            "shipping_time_range": { "min_days": 45, "max_days": 50 },
            "rates": [
                { "min_weight_kg": 100, "max_weight_kg": 500, "per_kg_rate": 1.0 },
                { "min_weight_kg": 500, "max_weight_kg": 5000, "per_kg_rate": 0.8 }
            ]
        }
    ]"#;

    #[test]
    fn parses_seed_layout() {
        let seed = RateSeed::from_json(SAMPLE).unwrap();
        assert_eq!(seed.len(), 2);

        let ocean = &seed.records[1];
        assert_eq!(ocean.shipping_channel, ShippingChannel::Ocean);
        assert_eq!(ocean.shipping_time_range.max_days, 50);
        assert_eq!(ocean.rates[1].per_kg_rate, Decimal::new(8, 1));
        assert_eq!(ocean.rates[1].max_weight_kg, Decimal::from(5000));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = RateSeed::from_json(r#"[{"starting_country": "China"}]"#).unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn inverted_days_are_rejected() {
        let json = SAMPLE.replace(r#""min_days": 45"#, r#""min_days": 60"#);
        let err = RateSeed::from_json(&json)
            .unwrap()
            .to_channel_rates()
            .unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn overlapping_brackets_are_rejected() {
        let json = SAMPLE.replace(
            r#"{ "min_weight_kg": 100, "max_weight_kg": 500, "per_kg_rate": 3.5 }"#,
            r#"{ "min_weight_kg": 50, "max_weight_kg": 500, "per_kg_rate": 3.5 }"#,
        );
        let err = RateSeed::from_json(&json)
            .unwrap()
            .to_channel_rates()
            .unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { index: 0, .. }));
    }

    #[tokio::test]
    async fn seeds_in_memory_store() {
        let repo = InMemoryRateRepository::new();
        let seed = RateSeed::from_json(SAMPLE).unwrap();

        let written = seed_store(&repo, &seed).await.unwrap();
        assert_eq!(written, 2);

        let air = repo
            .get_channel_rate(&Lane::new("China", "USA"), ShippingChannel::Air)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(air.brackets().len(), 2);
        assert_eq!(air.shipping_time_range(), ShippingTimeRange::new(15, 20));
    }

    #[tokio::test]
    async fn invalid_seed_writes_nothing() {
        let repo = InMemoryRateRepository::new();
        let json = SAMPLE.replace(r#""max_days": 50"#, r#""max_days": 40"#);
        let seed = RateSeed::from_json(&json).unwrap();

        assert!(seed_store(&repo, &seed).await.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn seed_if_empty_skips_populated_store() {
        let repo = InMemoryRateRepository::new();
        let seed = RateSeed::from_json(SAMPLE).unwrap();

        assert_eq!(seed_if_empty(&repo, &seed).await.unwrap(), 2);
        assert_eq!(seed_if_empty(&repo, &seed).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn loads_seed_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let seed = load_seed_file(file.path()).await.unwrap();
        assert_eq!(seed.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_seed_file(dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
