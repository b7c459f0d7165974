//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`ShippingChannel`] - Air or ocean freight
//! - [`SurchargeKind`] - Overweight or oversize per-box surcharge
//! - [`CombineMode`] - How a country override combines with the base surcharge
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shipping mode with its own delivery-time range and rate table.
///
/// Serialized lower-case, matching the keys used in the rate tables.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::value_objects::enums::ShippingChannel;
///
/// assert_eq!(ShippingChannel::Air.to_string(), "air");
/// assert_eq!("OCEAN".parse::<ShippingChannel>().unwrap(), ShippingChannel::Ocean);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ShippingChannel {
    /// Air freight.
    Air = 0,
    /// Ocean freight.
    Ocean = 1,
}

impl ShippingChannel {
    /// All channels, in quote output order.
    pub const ALL: [Self; 2] = [Self::Air, Self::Ocean];

    /// Returns the rate-table key for this channel.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Ocean => "ocean",
        }
    }
}

impl fmt::Display for ShippingChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingChannel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "air" => Ok(Self::Air),
            "ocean" | "sea" => Ok(Self::Ocean),
            _ => Err(ParseEnumError::InvalidValue(
                "ShippingChannel",
                s.to_string(),
            )),
        }
    }
}

/// Kind of per-box surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeKind {
    /// Charged for boxes heavier than the allowed unit weight.
    Overweight,
    /// Charged for boxes with a dimension longer than allowed.
    Oversize,
}

impl fmt::Display for SurchargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overweight => write!(f, "overweight"),
            Self::Oversize => write!(f, "oversize"),
        }
    }
}

impl FromStr for SurchargeKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overweight" => Ok(Self::Overweight),
            "oversize" | "oversized" => Ok(Self::Oversize),
            _ => Err(ParseEnumError::InvalidValue("SurchargeKind", s.to_string())),
        }
    }
}

/// How a country-specific surcharge combines with the base rule.
///
/// # Examples
///
/// ```
/// use shipping_quote::domain::value_objects::enums::CombineMode;
///
/// assert!(CombineMode::ReplaceIfAbsent.requires_absent_fee());
/// assert!(!CombineMode::Additive.requires_absent_fee());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Charge only when the base rule charged nothing for this kind.
    ReplaceIfAbsent,
    /// Charge on top of whatever the base rule charged.
    Additive,
}

impl CombineMode {
    /// Returns true if the rule only fires when no fee of its kind exists yet.
    #[inline]
    #[must_use]
    pub const fn requires_absent_fee(self) -> bool {
        matches!(self, Self::ReplaceIfAbsent)
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReplaceIfAbsent => write!(f, "replace_if_absent"),
            Self::Additive => write!(f, "additive"),
        }
    }
}

impl FromStr for CombineMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "replace_if_absent" => Ok(Self::ReplaceIfAbsent),
            "additive" => Ok(Self::Additive),
            _ => Err(ParseEnumError::InvalidValue("CombineMode", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
