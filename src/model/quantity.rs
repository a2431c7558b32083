//! Quantity values and the unit conversion boundary

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unit code of a dimensionless quantity
pub const DIMENSIONLESS_UNIT: &str = "1";

/// A decimal magnitude paired with a unit code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantity {
    /// Magnitude
    pub value: Decimal,
    /// Unit code (`1` for dimensionless)
    pub unit: String,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: Decimal, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Create a dimensionless quantity
    pub fn dimensionless(value: Decimal) -> Self {
        Self::new(value, DIMENSIONLESS_UNIT)
    }

    /// Whether the unit is dimensionless (`'1'` or no unit at all)
    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_empty() || self.unit == DIMENSIONLESS_UNIT
    }

    /// Whether both quantities are expressed in the same unit
    pub fn has_same_unit(&self, unit: &str) -> bool {
        self.unit == unit
            || (self.is_dimensionless() && (unit.is_empty() || unit == DIMENSIONLESS_UNIT))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.value, self.unit)
    }
}

/// Errors reported by a unit conversion service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// The service does not know the unit code
    #[error("unknown unit '{unit}'")]
    UnknownUnit {
        /// Offending unit code
        unit: String,
    },

    /// The units measure different dimensions
    #[error("cannot convert '{from}' to '{to}'")]
    Incompatible {
        /// Source unit
        from: String,
        /// Target unit
        to: String,
    },
}

/// Unit conversion service consulted by quantity conversions
///
/// Definitions and dimensional algebra live behind this trait; the engine only
/// asks for a quantity re-expressed in another unit.
pub trait UnitConverter: Send + Sync {
    /// Convert `quantity` into `target_unit`
    fn convert(&self, quantity: &Quantity, target_unit: &str) -> Result<Quantity, UnitError>;
}

/// Converter that only accepts conversions into the unit a quantity already has
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityUnitConverter;

impl UnitConverter for IdentityUnitConverter {
    fn convert(&self, quantity: &Quantity, target_unit: &str) -> Result<Quantity, UnitError> {
        if quantity.has_same_unit(target_unit) {
            Ok(Quantity::new(quantity.value, target_unit))
        } else {
            Err(UnitError::Incompatible {
                from: quantity.unit.clone(),
                to: target_unit.to_string(),
            })
        }
    }
}
