//! # Persistence Layer
//!
//! Rate table ports and their implementations.
//!
//! ## Ports
//!
//! - [`RateRepository`]: channel rate and bracket lookup
//! - [`RateStore`]: writing channel rates during seeding
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory tables for tests and database-less runs
//! - `postgres`: PostgreSQL tables via sqlx

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{RateRepository, RateStore, RepositoryError, RepositoryResult};
