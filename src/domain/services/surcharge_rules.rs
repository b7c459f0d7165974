//! # Surcharge Rules
//!
//! Thresholds, unit fees and country overrides for per-box surcharges.
//!
//! The base rules are global: a box heavier than the overweight threshold
//! pays the overweight fee, and a box with any dimension longer than the
//! oversize threshold pays the oversize fee. Both can fire for the same box.
//!
//! Country overrides are an ordered table evaluated after the base rules. At
//! most one override fires per box: the first whose origin matches, whose
//! trigger fires, and whose [`CombineMode`] allows it. The two defaults are
//! deliberately asymmetric:
//!
//! | Origin  | Trigger              | Kind       | Mode                |
//! |---------|----------------------|------------|---------------------|
//! | India   | unit weight >= 15 kg | overweight | replace-if-absent   |
//! | Vietnam | largest side > 70 cm | oversize   | additive            |

use crate::domain::entities::ShipmentBox;
use crate::domain::value_objects::{CombineMode, SurchargeKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default divisor converting cubic centimetres to volumetric kilograms.
pub const DEFAULT_VOLUMETRIC_DIVISOR: i64 = 6000;

/// Default per-unit weight above which the overweight fee applies.
pub const DEFAULT_OVERWEIGHT_THRESHOLD_KG: i64 = 30;

/// Default dimension above which the oversize fee applies.
pub const DEFAULT_OVERSIZE_THRESHOLD_CM: i64 = 120;

/// Default overweight fee per box.
pub const DEFAULT_OVERWEIGHT_UNIT_FEE: i64 = 80;

/// Default oversize fee per box.
pub const DEFAULT_OVERSIZED_UNIT_FEE: i64 = 100;

/// Condition a country override tests on a single box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurchargeTrigger {
    /// Unit weight strictly greater than `kg`.
    UnitWeightAbove {
        /// Threshold in kilograms.
        kg: Decimal,
    },
    /// Unit weight greater than or equal to `kg`.
    UnitWeightAtLeast {
        /// Threshold in kilograms.
        kg: Decimal,
    },
    /// Largest dimension strictly greater than `cm`.
    LargestDimensionAbove {
        /// Threshold in centimetres.
        cm: Decimal,
    },
}

impl SurchargeTrigger {
    /// Returns true if the box meets the condition.
    #[must_use]
    pub fn fires(&self, shipment_box: &ShipmentBox) -> bool {
        match *self {
            Self::UnitWeightAbove { kg } => shipment_box.weight_kg() > kg,
            Self::UnitWeightAtLeast { kg } => shipment_box.weight_kg() >= kg,
            Self::LargestDimensionAbove { cm } => shipment_box.largest_dimension() > cm,
        }
    }
}

/// One row of the country override table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySurchargeRule {
    /// Origin country, matched exactly.
    pub origin: String,
    /// Box condition.
    pub trigger: SurchargeTrigger,
    /// Which surcharge is charged.
    pub kind: SurchargeKind,
    /// How the charge combines with the base rule.
    pub mode: CombineMode,
}

impl CountrySurchargeRule {
    /// Creates a rule.
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        trigger: SurchargeTrigger,
        kind: SurchargeKind,
        mode: CombineMode,
    ) -> Self {
        Self {
            origin: origin.into(),
            trigger,
            kind,
            mode,
        }
    }

    /// India charges overweight from 15 kg, never on top of the base fee.
    #[must_use]
    pub fn india() -> Self {
        Self::new(
            "India",
            SurchargeTrigger::UnitWeightAtLeast {
                kg: Decimal::from(15),
            },
            SurchargeKind::Overweight,
            CombineMode::ReplaceIfAbsent,
        )
    }

    /// Vietnam charges oversize from 70 cm, on top of the base fee.
    #[must_use]
    pub fn vietnam() -> Self {
        Self::new(
            "Vietnam",
            SurchargeTrigger::LargestDimensionAbove {
                cm: Decimal::from(70),
            },
            SurchargeKind::Oversize,
            CombineMode::Additive,
        )
    }

    /// Returns true if this rule fires for the box.
    ///
    /// `existing_fee` is what the base rules already charged for this rule's
    /// kind.
    #[must_use]
    pub fn applies(&self, shipment_box: &ShipmentBox, origin: &str, existing_fee: Decimal) -> bool {
        self.origin == origin
            && self.trigger.fires(shipment_box)
            && (!self.mode.requires_absent_fee() || existing_fee.is_zero())
    }
}

/// Every tunable of the box cost evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurchargePolicy {
    /// Divides `L * W * H * count` (cm³) into volumetric kilograms.
    pub volumetric_divisor: Decimal,
    /// Unit weight strictly above which the base overweight fee applies.
    pub overweight_threshold_kg: Decimal,
    /// Dimension strictly above which the base oversize fee applies.
    pub oversize_threshold_cm: Decimal,
    /// Overweight fee per box.
    pub overweight_unit_fee: Decimal,
    /// Oversize fee per box.
    pub oversized_unit_fee: Decimal,
    /// Ordered country overrides.
    pub country_rules: Vec<CountrySurchargeRule>,
}

impl Default for SurchargePolicy {
    fn default() -> Self {
        Self {
            volumetric_divisor: Decimal::from(DEFAULT_VOLUMETRIC_DIVISOR),
            overweight_threshold_kg: Decimal::from(DEFAULT_OVERWEIGHT_THRESHOLD_KG),
            oversize_threshold_cm: Decimal::from(DEFAULT_OVERSIZE_THRESHOLD_CM),
            overweight_unit_fee: Decimal::from(DEFAULT_OVERWEIGHT_UNIT_FEE),
            oversized_unit_fee: Decimal::from(DEFAULT_OVERSIZED_UNIT_FEE),
            country_rules: vec![CountrySurchargeRule::india(), CountrySurchargeRule::vietnam()],
        }
    }
}

impl SurchargePolicy {
    /// Returns the per-box fee for a surcharge kind.
    #[must_use]
    pub fn unit_fee(&self, kind: SurchargeKind) -> Decimal {
        match kind {
            SurchargeKind::Overweight => self.overweight_unit_fee,
            SurchargeKind::Oversize => self.oversized_unit_fee,
        }
    }

    /// Returns the first country override that fires, if any.
    #[must_use]
    pub fn country_override<'a>(
        &'a self,
        shipment_box: &ShipmentBox,
        origin: &str,
        charged: impl Fn(SurchargeKind) -> Decimal,
    ) -> Option<&'a CountrySurchargeRule> {
        self.country_rules
            .iter()
            .find(|rule| rule.applies(shipment_box, origin, charged(rule.kind)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shipment_box(weight: i64, longest: i64) -> ShipmentBox {
        ShipmentBox::new(
            1,
            Decimal::from(weight),
            Decimal::from(longest),
            Decimal::ONE,
            Decimal::ONE,
        )
    }

    #[test]
    fn at_least_trigger_is_inclusive() {
        let trigger = SurchargeTrigger::UnitWeightAtLeast {
            kg: Decimal::from(15),
        };
        assert!(trigger.fires(&shipment_box(15, 1)));
        assert!(!trigger.fires(&shipment_box(14, 1)));
    }

    #[test]
    fn dimension_trigger_is_exclusive() {
        let trigger = SurchargeTrigger::LargestDimensionAbove {
            cm: Decimal::from(70),
        };
        assert!(!trigger.fires(&shipment_box(1, 70)));
        assert!(trigger.fires(&shipment_box(1, 71)));
    }

    #[test]
    fn replace_if_absent_rule_skips_when_already_charged() {
        let rule = CountrySurchargeRule::india();
        let heavy = shipment_box(40, 1);
        assert!(rule.applies(&heavy, "India", Decimal::ZERO));
        assert!(!rule.applies(&heavy, "India", Decimal::from(80)));
    }

    #[test]
    fn additive_rule_ignores_existing_fee() {
        let rule = CountrySurchargeRule::vietnam();
        let long = shipment_box(1, 130);
        assert!(rule.applies(&long, "Vietnam", Decimal::from(100)));
    }

    #[test]
    fn rules_match_origin_exactly() {
        let rule = CountrySurchargeRule::vietnam();
        assert!(!rule.applies(&shipment_box(1, 130), "vietnam", Decimal::ZERO));
    }

    #[test]
    fn default_policy_orders_india_before_vietnam() {
        let policy = SurchargePolicy::default();
        let origins: Vec<&str> = policy
            .country_rules
            .iter()
            .map(|r| r.origin.as_str())
            .collect();
        assert_eq!(origins, vec!["India", "Vietnam"]);
    }

    #[test]
    fn rule_deserializes_from_tagged_trigger() {
        let json = r#"{
            "origin": "Thailand",
            "trigger": {"type": "unit_weight_above", "kg": 25},
            "kind": "overweight",
            "mode": "replace_if_absent"
        }"#;
        let rule: CountrySurchargeRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.origin, "Thailand");
        assert_eq!(
            rule.trigger,
            SurchargeTrigger::UnitWeightAbove {
                kg: Decimal::from(25)
            }
        );
    }
}
