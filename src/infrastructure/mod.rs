//! # Infrastructure Layer
//!
//! Adapters behind the application ports.
//!
//! - [`persistence`]: rate table repositories (in-memory, PostgreSQL)
//! - [`seed`]: loading rate tables from JSON files

pub mod persistence;
pub mod seed;
