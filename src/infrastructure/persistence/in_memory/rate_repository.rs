//! # In-Memory Rate Repository
//!
//! In-memory implementation of [`RateRepository`] and [`RateStore`].
//!
//! Records live in a `Vec` behind a `tokio::sync::RwLock`, in insertion
//! order, with sequential ids starting at 1. Suitable for tests and for
//! running the server without a database.
//!
//! Sizes are read through [`RateStore::count`], which waits for in-flight
//! writes instead of guessing.

use crate::domain::entities::{ChannelRate, NewChannelRate, RateBracket};
use crate::domain::value_objects::{ChannelRateId, Lane, ShippingChannel};
use crate::infrastructure::persistence::traits::{
    RateRepository, RateStore, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`RateRepository`] and [`RateStore`].
#[derive(Debug, Clone)]
pub struct InMemoryRateRepository {
    storage: Arc<RwLock<Vec<ChannelRate>>>,
}

impl InMemoryRateRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Inserts a fully-formed record as-is, bypassing validation.
    ///
    /// Lets tests reproduce inconsistent data such as overlapping brackets.
    pub async fn insert_raw(&self, rate: ChannelRate) {
        let mut storage = self.storage.write().await;
        storage.push(rate);
    }

    /// Clears all channel rates.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

impl Default for InMemoryRateRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateRepository for InMemoryRateRepository {
    async fn get_channel_rate(
        &self,
        lane: &Lane,
        channel: ShippingChannel,
    ) -> RepositoryResult<Option<ChannelRate>> {
        let storage = self.storage.read().await;
        Ok(storage.iter().find(|r| r.serves(lane, channel)).cloned())
    }

    async fn get_bracket(
        &self,
        channel_rate_id: ChannelRateId,
        weight: Decimal,
    ) -> RepositoryResult<Option<RateBracket>> {
        let storage = self.storage.read().await;
        let rate = storage
            .iter()
            .find(|r| r.id() == channel_rate_id)
            .ok_or_else(|| RepositoryError::not_found("ChannelRate", channel_rate_id.to_string()))?;
        Ok(rate.find_bracket(weight).cloned())
    }
}

#[async_trait]
impl RateStore for InMemoryRateRepository {
    async fn save_channel_rate(&self, rate: &NewChannelRate) -> RepositoryResult<ChannelRateId> {
        rate.validate()
            .map_err(|e| RepositoryError::invalid_record(e.to_string()))?;

        let mut storage = self.storage.write().await;
        if storage.iter().any(|r| r.serves(rate.lane(), rate.channel())) {
            return Err(RepositoryError::duplicate(
                "ChannelRate",
                format!("{} {}", rate.lane(), rate.channel()),
            ));
        }

        let next_id = storage.iter().map(|r| r.id().get()).max().unwrap_or(0) + 1;
        let id = ChannelRateId::new(next_id);
        storage.push(rate.clone().into_channel_rate(id));
        Ok(id)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::ShippingTimeRange;

    fn air_rate(origin: &str) -> NewChannelRate {
        NewChannelRate::new(
            Lane::new(origin, "USA"),
            ShippingChannel::Air,
            ShippingTimeRange::new(15, 20),
            vec![
                RateBracket::new(Decimal::ZERO, Decimal::from(100), Decimal::from(4)),
                RateBracket::new(Decimal::from(100), Decimal::from(500), Decimal::new(35, 1)),
            ],
        )
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryRateRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let repo = InMemoryRateRepository::new();
        let first = repo.save_channel_rate(&air_rate("China")).await.unwrap();
        let second = repo.save_channel_rate(&air_rate("India")).await.unwrap();
        assert_eq!(first, ChannelRateId::new(1));
        assert_eq!(second, ChannelRateId::new(2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_lane_and_channel() {
        let repo = InMemoryRateRepository::new();
        repo.save_channel_rate(&air_rate("China")).await.unwrap();
        let err = repo.save_channel_rate(&air_rate("China")).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn save_rejects_overlapping_brackets() {
        let repo = InMemoryRateRepository::new();
        let rate = NewChannelRate::new(
            Lane::new("China", "USA"),
            ShippingChannel::Air,
            ShippingTimeRange::new(15, 20),
            vec![
                RateBracket::new(Decimal::ZERO, Decimal::from(200), Decimal::from(4)),
                RateBracket::new(Decimal::from(100), Decimal::from(500), Decimal::from(3)),
            ],
        );
        let err = repo.save_channel_rate(&rate).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRecord(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn count_waits_for_in_flight_write() {
        let repo = InMemoryRateRepository::new();
        let mut guard = repo.storage.write().await;

        let reader = repo.clone();
        let pending = tokio::spawn(async move { reader.count().await.unwrap() });
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        guard.push(air_rate("China").into_channel_rate(ChannelRateId::new(1)));
        drop(guard);
        assert_eq!(pending.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_channel_rate_by_lane_and_channel() {
        let repo = InMemoryRateRepository::new();
        repo.save_channel_rate(&air_rate("China")).await.unwrap();

        let lane = Lane::new("China", "USA");
        let air = repo
            .get_channel_rate(&lane, ShippingChannel::Air)
            .await
            .unwrap();
        assert_eq!(air.unwrap().shipping_time_range().min_days(), 15);

        let ocean = repo
            .get_channel_rate(&lane, ShippingChannel::Ocean)
            .await
            .unwrap();
        assert!(ocean.is_none());
    }

    #[tokio::test]
    async fn get_bracket_uses_exclusive_min_inclusive_max() {
        let repo = InMemoryRateRepository::new();
        let id = repo.save_channel_rate(&air_rate("China")).await.unwrap();

        let at_max = repo.get_bracket(id, Decimal::from(100)).await.unwrap();
        assert_eq!(at_max.unwrap().per_kg_rate(), Decimal::from(4));

        let above = repo.get_bracket(id, Decimal::new(1001, 1)).await.unwrap();
        assert_eq!(above.unwrap().per_kg_rate(), Decimal::new(35, 1));

        let at_zero = repo.get_bracket(id, Decimal::ZERO).await.unwrap();
        assert!(at_zero.is_none());

        let too_heavy = repo.get_bracket(id, Decimal::from(100_000)).await.unwrap();
        assert!(too_heavy.is_none());
    }

    #[tokio::test]
    async fn get_bracket_for_unknown_rate_is_not_found() {
        let repo = InMemoryRateRepository::new();
        let err = repo
            .get_bracket(ChannelRateId::new(99), Decimal::ONE)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn clear() {
        let repo = InMemoryRateRepository::new();
        repo.save_channel_rate(&air_rate("China")).await.unwrap();
        repo.clear().await;
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
