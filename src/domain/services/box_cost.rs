//! # Box Cost Evaluator
//!
//! Chargeable weight and per-box surcharges for one group of boxes.
//!
//! ```text
//! gross       = count * weight_kg
//! volumetric  = length * width * height * count / divisor
//! chargeable  = max(gross, volumetric)
//! ```
//!
//! Surcharges follow the base rules and then at most one country override;
//! see [`surcharge_rules`](super::surcharge_rules).
//!
//! The evaluator does not validate its input. Numeric sanity is checked at
//! the transport boundary with [`ShipmentRequest::validate`].
//!
//! [`ShipmentRequest::validate`]: crate::domain::entities::ShipmentRequest::validate
//!
//! # Examples
//!
//! ```
//! use shipping_quote::domain::entities::ShipmentBox;
//! use shipping_quote::domain::services::BoxCostEvaluator;
//! use rust_decimal::Decimal;
//!
//! let evaluator = BoxCostEvaluator::default();
//! let heavy = ShipmentBox::new(2, Decimal::from(40), Decimal::ONE, Decimal::ONE, Decimal::ONE);
//!
//! let cost = evaluator.evaluate(&heavy, "China").unwrap();
//! assert_eq!(cost.chargeable_weight, Decimal::from(80));
//! assert_eq!(cost.overweight_fee, Decimal::from(160));
//! assert_eq!(cost.oversized_fee, Decimal::ZERO);
//! ```

use crate::domain::entities::ShipmentBox;
use crate::domain::services::surcharge_rules::SurchargePolicy;
use crate::domain::value_objects::SurchargeKind;
use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weight and surcharges of one box group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxCost {
    /// Greater of gross and volumetric weight, in kilograms.
    pub chargeable_weight: Decimal,
    /// Oversize surcharge for the whole group.
    pub oversized_fee: Decimal,
    /// Overweight surcharge for the whole group.
    pub overweight_fee: Decimal,
}

impl BoxCost {
    fn fee(&self, kind: SurchargeKind) -> Decimal {
        match kind {
            SurchargeKind::Overweight => self.overweight_fee,
            SurchargeKind::Oversize => self.oversized_fee,
        }
    }

    fn add_fee(&mut self, kind: SurchargeKind, amount: Decimal) -> ArithmeticResult<()> {
        match kind {
            SurchargeKind::Overweight => {
                self.overweight_fee = self.overweight_fee.safe_add(amount)?;
            }
            SurchargeKind::Oversize => {
                self.oversized_fee = self.oversized_fee.safe_add(amount)?;
            }
        }
        Ok(())
    }

    /// Component-wise sum of two box costs.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if any component overflows.
    pub fn safe_add(self, other: Self) -> ArithmeticResult<Self> {
        Ok(Self {
            chargeable_weight: self.chargeable_weight.safe_add(other.chargeable_weight)?,
            oversized_fee: self.oversized_fee.safe_add(other.oversized_fee)?,
            overweight_fee: self.overweight_fee.safe_add(other.overweight_fee)?,
        })
    }
}

/// Computes [`BoxCost`] for a box group under a [`SurchargePolicy`].
#[derive(Debug, Clone, Default)]
pub struct BoxCostEvaluator {
    policy: SurchargePolicy,
}

impl BoxCostEvaluator {
    /// Creates an evaluator with the given policy.
    #[must_use]
    pub fn new(policy: SurchargePolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub fn policy(&self) -> &SurchargePolicy {
        &self.policy
    }

    /// Evaluates one box group shipped from `origin_country`.
    ///
    /// # Errors
    ///
    /// Returns an `ArithmeticError` only for values outside the decimal range
    /// or a zero volumetric divisor in the policy.
    pub fn evaluate(
        &self,
        shipment_box: &ShipmentBox,
        origin_country: &str,
    ) -> ArithmeticResult<BoxCost> {
        let policy = &self.policy;
        let count = shipment_box.count_decimal();

        let gross_weight = shipment_box.gross_weight()?;
        let volumetric_weight = shipment_box.volumetric_weight(policy.volumetric_divisor)?;

        let mut cost = BoxCost {
            chargeable_weight: gross_weight.max(volumetric_weight),
            ..BoxCost::default()
        };

        if shipment_box.weight_kg() > policy.overweight_threshold_kg {
            cost.overweight_fee = policy.overweight_unit_fee.safe_mul(count)?;
        }
        if shipment_box.largest_dimension() > policy.oversize_threshold_cm {
            cost.oversized_fee = policy.oversized_unit_fee.safe_mul(count)?;
        }

        if let Some(rule) =
            policy.country_override(shipment_box, origin_country, |kind| cost.fee(kind))
        {
            let charge = policy.unit_fee(rule.kind).safe_mul(count)?;
            cost.add_fee(rule.kind, charge)?;
        }

        Ok(cost)
    }
}
