//! # Domain Services
//!
//! Pricing logic that doesn't belong to a single entity.
//!
//! ## Services
//!
//! - [`BoxCostEvaluator`]: chargeable weight and per-box surcharges
//! - [`SurchargePolicy`]: thresholds, unit fees and country overrides
//! - [`ServiceFeeSchedule`]: per-origin flat service fees

pub mod box_cost;
pub mod service_fee;
pub mod surcharge_rules;

pub use box_cost::{BoxCost, BoxCostEvaluator};
pub use service_fee::ServiceFeeSchedule;
pub use surcharge_rules::{CountrySurchargeRule, SurchargePolicy, SurchargeTrigger};
