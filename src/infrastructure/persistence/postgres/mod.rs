//! # PostgreSQL Persistence
//!
//! sqlx-backed rate tables.

pub mod rate_repository;

pub use rate_repository::PostgresRateRepository;
