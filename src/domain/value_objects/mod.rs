//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ChannelRateId`]: identifier of a stored channel rate
//! - [`Lane`]: (origin, destination) country pair
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//!
//! ## Domain Enums
//!
//! - `ShippingChannel`: Air or ocean
//! - `SurchargeKind`: Overweight or oversize
//! - `CombineMode`: How country overrides combine with base surcharges

pub mod arithmetic;
pub mod enums;
pub mod ids;
pub mod lane;

pub use arithmetic::{checked_sum, ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use enums::{CombineMode, ParseEnumError, ShippingChannel, SurchargeKind};
pub use ids::ChannelRateId;
pub use lane::Lane;
