//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryRateRepository`]: rate table lookup and seeding
//!
//! ## Thread Safety
//!
//! Storage is `Arc<RwLock<Vec<_>>>`; clones share the same tables.

pub mod rate_repository;

pub use rate_repository::InMemoryRateRepository;
