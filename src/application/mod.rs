//! # Application Layer
//!
//! Use-case orchestration between the domain and the rate tables.
//!
//! - [`services`]: the quote aggregation engine
//! - [`error`]: application error taxonomy and its public categories

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, ErrorCategory, RateGap};
