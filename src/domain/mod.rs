//! # Domain Layer
//!
//! Entities, value objects and pricing rules with no I/O.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
