//! # API Layer
//!
//! Transport adapters over the application layer.
//!
//! - [`rest`]: axum HTTP API

pub mod rest;
