//! # Shipment Entities
//!
//! The boxes of a shipment and the quote request that carries them.
//!
//! Both types are request-scoped, immutable input values. They can be built
//! without validation so that the core computation stays total over whatever
//! it is handed; [`ShipmentRequest::validate`] is the numeric sanity gate the
//! transport layer applies before calling the engine.
//!
//! # Examples
//!
//! ```
//! use shipping_quote::domain::entities::{ShipmentBox, ShipmentRequest};
//! use rust_decimal::Decimal;
//!
//! let request = ShipmentRequest::new(
//!     "China",
//!     "USA",
//!     vec![ShipmentBox::new(2, Decimal::from(40), Decimal::ONE, Decimal::ONE, Decimal::ONE)],
//! );
//!
//! assert!(request.validate().is_ok());
//! assert_eq!(request.lane().origin(), "China");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::Lane;
use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A group of identical boxes in a shipment.
///
/// Weight is per box in kilograms; dimensions are per box in centimetres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentBox {
    count: u32,
    weight_kg: Decimal,
    length: Decimal,
    width: Decimal,
    height: Decimal,
}

impl ShipmentBox {
    /// Creates a box group without validation.
    #[must_use]
    pub fn new(
        count: u32,
        weight_kg: Decimal,
        length: Decimal,
        width: Decimal,
        height: Decimal,
    ) -> Self {
        Self {
            count,
            weight_kg,
            length,
            width,
            height,
        }
    }

    /// Number of identical boxes.
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Physical weight of a single box in kilograms.
    #[inline]
    #[must_use]
    pub fn weight_kg(&self) -> Decimal {
        self.weight_kg
    }

    /// Length in centimetres.
    #[inline]
    #[must_use]
    pub fn length(&self) -> Decimal {
        self.length
    }

    /// Width in centimetres.
    #[inline]
    #[must_use]
    pub fn width(&self) -> Decimal {
        self.width
    }

    /// Height in centimetres.
    #[inline]
    #[must_use]
    pub fn height(&self) -> Decimal {
        self.height
    }

    /// The box count as a decimal multiplier.
    #[inline]
    #[must_use]
    pub fn count_decimal(&self) -> Decimal {
        Decimal::from(self.count)
    }

    /// The longest of the three dimensions.
    #[must_use]
    pub fn largest_dimension(&self) -> Decimal {
        self.length.max(self.width).max(self.height)
    }

    /// Combined physical weight of every box in the group.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the product overflows.
    pub fn gross_weight(&self) -> ArithmeticResult<Decimal> {
        self.count_decimal().safe_mul(self.weight_kg)
    }

    /// Combined dimensional weight of every box in the group.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` on overflow and
    /// `ArithmeticError::DivisionByZero` for a zero divisor.
    pub fn volumetric_weight(&self, divisor: Decimal) -> ArithmeticResult<Decimal> {
        self.length
            .safe_mul(self.width)?
            .safe_mul(self.height)?
            .safe_mul(self.count_decimal())?
            .safe_div(divisor)
    }

    /// Checks that count, weight and dimensions are all positive.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShipment` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        if self.count == 0 {
            return Err(DomainError::invalid_shipment("count must be positive"));
        }
        let fields = [
            ("weight_kg", self.weight_kg),
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in fields {
            if value <= Decimal::ZERO {
                return Err(DomainError::invalid_shipment(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// A request for shipping quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    lane: Lane,
    boxes: Vec<ShipmentBox>,
}

impl ShipmentRequest {
    /// Creates a request without validation.
    #[must_use]
    pub fn new(
        starting_country: impl Into<String>,
        destination_country: impl Into<String>,
        boxes: Vec<ShipmentBox>,
    ) -> Self {
        Self {
            lane: Lane::new(starting_country, destination_country),
            boxes,
        }
    }

    /// The (origin, destination) lane.
    #[inline]
    #[must_use]
    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    /// Starting country.
    #[inline]
    #[must_use]
    pub fn starting_country(&self) -> &str {
        self.lane.origin()
    }

    /// Destination country.
    #[inline]
    #[must_use]
    pub fn destination_country(&self) -> &str {
        self.lane.destination()
    }

    /// The boxes, in request order.
    #[inline]
    #[must_use]
    pub fn boxes(&self) -> &[ShipmentBox] {
        &self.boxes
    }

    /// Checks the request before it reaches the quote engine.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShipment` if a country is blank, the box
    /// list is empty, or any box fails [`ShipmentBox::validate`].
    pub fn validate(&self) -> DomainResult<()> {
        if self.lane.origin().trim().is_empty() {
            return Err(DomainError::invalid_shipment(
                "starting_country must not be empty",
            ));
        }
        if self.lane.destination().trim().is_empty() {
            return Err(DomainError::invalid_shipment(
                "destination_country must not be empty",
            ));
        }
        if self.boxes.is_empty() {
            return Err(DomainError::invalid_shipment(
                "at least one box is required",
            ));
        }
        for (index, shipment_box) in self.boxes.iter().enumerate() {
            shipment_box.validate().map_err(|e| match e {
                DomainError::InvalidShipment(msg) => {
                    DomainError::invalid_shipment(format!("box {index}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_box(count: u32, weight: i64) -> ShipmentBox {
        ShipmentBox::new(
            count,
            Decimal::from(weight),
            Decimal::ONE,
            Decimal::ONE,
            Decimal::ONE,
        )
    }

    #[test]
    fn gross_weight_scales_with_count() {
        assert_eq!(unit_box(3, 40).gross_weight().unwrap(), Decimal::from(120));
    }

    #[test]
    fn volumetric_weight_uses_all_dimensions() {
        let b = ShipmentBox::new(
            1,
            Decimal::from(40),
            Decimal::from(10),
            Decimal::from(1000),
            Decimal::from(30),
        );
        assert_eq!(
            b.volumetric_weight(Decimal::from(6000)).unwrap(),
            Decimal::from(50)
        );
    }

    #[test]
    fn largest_dimension_picks_max() {
        let b = ShipmentBox::new(
            1,
            Decimal::ONE,
            Decimal::from(1),
            Decimal::from(130),
            Decimal::from(20),
        );
        assert_eq!(b.largest_dimension(), Decimal::from(130));
    }

    #[test]
    fn validate_rejects_zero_count() {
        let err = unit_box(0, 10).validate().unwrap_err();
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn validate_rejects_zero_weight() {
        let err = unit_box(1, 0).validate().unwrap_err();
        assert!(err.to_string().contains("weight_kg"));
    }

    #[test]
    fn validate_rejects_negative_dimension() {
        let b = ShipmentBox::new(
            1,
            Decimal::ONE,
            Decimal::ONE,
            Decimal::from(-5),
            Decimal::ONE,
        );
        assert!(b.validate().unwrap_err().to_string().contains("width"));
    }

    #[test]
    fn request_validate_reports_box_index() {
        let request = ShipmentRequest::new("China", "USA", vec![unit_box(1, 1), unit_box(1, 0)]);
        let err = request.validate().unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("box 1"));
    }

    #[test]
    fn request_validate_rejects_empty_boxes() {
        let request = ShipmentRequest::new("China", "USA", vec![]);
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_validate_rejects_blank_country() {
        let request = ShipmentRequest::new(" ", "USA", vec![unit_box(1, 1)]);
        assert!(
            request
                .validate()
                .unwrap_err()
                .to_string()
                .contains("starting_country")
        );
    }
}
