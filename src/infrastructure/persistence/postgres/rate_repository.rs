//! # PostgreSQL Rate Repository
//!
//! PostgreSQL implementation of [`RateRepository`] and [`RateStore`] using
//! sqlx.
//!
//! Rates live in two tables: `shipping_rates` holds one row per
//! (origin, destination, channel) with its delivery-time range, and `rates`
//! holds the weight brackets of each row. Amounts are `NUMERIC` and map
//! directly onto `rust_decimal::Decimal`.

use crate::domain::entities::{ChannelRate, NewChannelRate, RateBracket, ShippingTimeRange};
use crate::domain::value_objects::{ChannelRateId, Lane, ParseEnumError, ShippingChannel};
use crate::infrastructure::persistence::traits::{
    RateRepository, RateStore, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

const CREATE_SHIPPING_RATES: &str = r#"
    CREATE TABLE IF NOT EXISTS shipping_rates (
        id BIGSERIAL PRIMARY KEY,
        starting_country TEXT NOT NULL,
        destination_country TEXT NOT NULL,
        shipping_channel TEXT NOT NULL,
        min_days INTEGER NOT NULL,
        max_days INTEGER NOT NULL,
        UNIQUE (starting_country, destination_country, shipping_channel)
    )
"#;

const CREATE_RATES: &str = r#"
    CREATE TABLE IF NOT EXISTS rates (
        id BIGSERIAL PRIMARY KEY,
        shipping_rate_id BIGINT NOT NULL REFERENCES shipping_rates (id) ON DELETE CASCADE,
        min_weight_kg NUMERIC NOT NULL,
        max_weight_kg NUMERIC NOT NULL,
        per_kg_rate NUMERIC NOT NULL
    )
"#;

const CREATE_RATES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS rates_shipping_rate_id_idx ON rates (shipping_rate_id)";

/// Postgres SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL implementation of [`RateRepository`] and [`RateStore`].
///
/// # Examples
///
/// ```ignore
/// use sqlx::PgPool;
/// use shipping_quote::infrastructure::persistence::postgres::PostgresRateRepository;
///
/// let pool = PgPool::connect("postgres://...").await?;
/// let repo = PostgresRateRepository::new(pool);
/// repo.create_schema().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresRateRepository {
    pool: PgPool,
}

impl PostgresRateRepository {
    /// Creates a new PostgreSQL rate repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the rate tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Query` if a statement fails.
    pub async fn create_schema(&self) -> RepositoryResult<()> {
        for statement in [CREATE_SHIPPING_RATES, CREATE_RATES, CREATE_RATES_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;
        }
        Ok(())
    }

    async fn fetch_brackets(&self, id: i64) -> RepositoryResult<Vec<RateBracket>> {
        let rows: Vec<BracketRow> = sqlx::query_as(
            r#"
            SELECT min_weight_kg, max_weight_kg, per_kg_rate
            FROM rates
            WHERE shipping_rate_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(rows.into_iter().map(BracketRow::into_bracket).collect())
    }
}

#[async_trait]
impl RateRepository for PostgresRateRepository {
    async fn get_channel_rate(
        &self,
        lane: &Lane,
        channel: ShippingChannel,
    ) -> RepositoryResult<Option<ChannelRate>> {
        let row: Option<ChannelRateRow> = sqlx::query_as(
            r#"
            SELECT id, starting_country, destination_country, shipping_channel,
                   min_days, max_days
            FROM shipping_rates
            WHERE starting_country = $1
              AND destination_country = $2
              AND shipping_channel = $3
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(lane.origin())
        .bind(lane.destination())
        .bind(channel.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        match row {
            Some(row) => {
                let brackets = self.fetch_brackets(row.id).await?;
                row.try_into_channel_rate(brackets).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn get_bracket(
        &self,
        channel_rate_id: ChannelRateId,
        weight: Decimal,
    ) -> RepositoryResult<Option<RateBracket>> {
        let row: Option<BracketRow> = sqlx::query_as(
            r#"
            SELECT min_weight_kg, max_weight_kg, per_kg_rate
            FROM rates
            WHERE shipping_rate_id = $1
              AND min_weight_kg < $2
              AND max_weight_kg >= $2
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(channel_rate_id.get())
        .bind(weight)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(row.map(BracketRow::into_bracket))
    }
}

#[async_trait]
impl RateStore for PostgresRateRepository {
    async fn save_channel_rate(&self, rate: &NewChannelRate) -> RepositoryResult<ChannelRateId> {
        rate.validate()
            .map_err(|e| RepositoryError::invalid_record(e.to_string()))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        let time_range = rate.shipping_time_range();
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO shipping_rates (
                starting_country, destination_country, shipping_channel,
                min_days, max_days
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(rate.lane().origin())
        .bind(rate.lane().destination())
        .bind(rate.channel().as_str())
        .bind(days_to_column(time_range.min_days())?)
        .bind(days_to_column(time_range.max_days())?)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == UNIQUE_VIOLATION);
            if unique_violation {
                RepositoryError::duplicate(
                    "ChannelRate",
                    format!("{} {}", rate.lane(), rate.channel()),
                )
            } else {
                RepositoryError::query(e.to_string())
            }
        })?;

        for bracket in rate.brackets() {
            sqlx::query(
                r#"
                INSERT INTO rates (
                    shipping_rate_id, min_weight_kg, max_weight_kg, per_kg_rate
                ) VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(id)
            .bind(bracket.min_weight_kg())
            .bind(bracket.max_weight_kg())
            .bind(bracket.per_kg_rate())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(ChannelRateId::new(id))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shipping_rates")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        u64::try_from(count).map_err(|e| RepositoryError::serialization(e.to_string()))
    }
}

fn days_to_column(days: u32) -> RepositoryResult<i32> {
    i32::try_from(days).map_err(|e| RepositoryError::invalid_record(e.to_string()))
}

/// Row type for `shipping_rates` queries.
#[derive(Debug, sqlx::FromRow)]
struct ChannelRateRow {
    id: i64,
    starting_country: String,
    destination_country: String,
    shipping_channel: String,
    min_days: i32,
    max_days: i32,
}

impl ChannelRateRow {
    /// Converts the row into a ChannelRate.
    fn try_into_channel_rate(self, brackets: Vec<RateBracket>) -> RepositoryResult<ChannelRate> {
        let channel: ShippingChannel = self
            .shipping_channel
            .parse()
            .map_err(|e: ParseEnumError| RepositoryError::serialization(e.to_string()))?;
        let min_days =
            u32::try_from(self.min_days).map_err(|e| RepositoryError::serialization(e.to_string()))?;
        let max_days =
            u32::try_from(self.max_days).map_err(|e| RepositoryError::serialization(e.to_string()))?;

        Ok(ChannelRate::from_parts(
            ChannelRateId::new(self.id),
            Lane::new(self.starting_country, self.destination_country),
            channel,
            ShippingTimeRange::new(min_days, max_days),
            brackets,
        ))
    }
}

/// Row type for `rates` queries.
#[derive(Debug, sqlx::FromRow)]
struct BracketRow {
    min_weight_kg: Decimal,
    max_weight_kg: Decimal,
    per_kg_rate: Decimal,
}

impl BracketRow {
    fn into_bracket(self) -> RateBracket {
        RateBracket::new(self.min_weight_kg, self.max_weight_kg, self.per_kg_rate)
    }
}
