//! Implicit and explicit conversion tables between system types

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use super::quantity::Quantity;
use super::system::SystemValue;
use super::types::SystemType;

/// Result type for type coercion operations
pub type CoercionResult<T> = Result<T, CoercionError>;

/// Errors that can occur during type coercion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// No implicit conversion is registered between the types
    #[error("cannot use {from} value as {to}")]
    NoImplicitConversion {
        /// Source type
        from: SystemType,
        /// Target type
        to: SystemType,
    },

    /// No explicit conversion is registered between the types
    #[error("cannot convert {from} value to {to}")]
    NoExplicitConversion {
        /// Source type
        from: SystemType,
        /// Target type
        to: SystemType,
    },

    /// The value format is invalid for the target type
    #[error("invalid format '{value}' for type {target}")]
    InvalidFormat {
        /// Rendered source value
        value: String,
        /// Target type
        target: SystemType,
    },
}

/// Which of the two tables a lookup goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Use a value as another type without an explicit request
    Implicit,
    /// Explicit conversion such as `toDecimal()`
    Explicit,
}

/// A single registered conversion
pub type ConversionFn = fn(&SystemValue) -> CoercionResult<SystemValue>;

/// Conversions keyed by `(source, target)`
#[derive(Clone)]
pub struct ConversionTable {
    mode: ConversionMode,
    entries: FxHashMap<(SystemType, SystemType), ConversionFn>,
}

impl std::fmt::Debug for ConversionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pairs: Vec<_> = self.entries.keys().copied().collect();
        pairs.sort();
        f.debug_struct("ConversionTable")
            .field("mode", &self.mode)
            .field("pairs", &pairs)
            .finish()
    }
}

impl ConversionTable {
    /// Create an empty table
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            mode,
            entries: FxHashMap::default(),
        }
    }

    /// Lossless widenings: Integer→Decimal, Integer→Quantity, Decimal→Quantity, Date→DateTime
    pub fn implicit_defaults() -> Self {
        let mut table = Self::new(ConversionMode::Implicit);
        register_widenings(&mut table);
        table
    }

    /// The implicit widenings plus string parsing, rendering and boolean mappings
    pub fn explicit_defaults() -> Self {
        use SystemType::*;

        let mut table = Self::new(ConversionMode::Explicit);
        register_widenings(&mut table);

        table.register(String, Integer, string_to_integer);
        table.register(String, Decimal, string_to_decimal);
        table.register(String, Boolean, string_to_boolean);
        table.register(String, Quantity, string_to_quantity);
        table.register(String, Date, string_to_date);
        table.register(String, DateTime, string_to_datetime);
        table.register(String, Time, string_to_time);

        table.register(Boolean, Integer, |v| match v {
            SystemValue::Boolean(b) => Ok(SystemValue::Integer(i64::from(*b))),
            other => Err(invalid(other, Integer)),
        });
        table.register(Boolean, Decimal, |v| match v {
            SystemValue::Boolean(b) => Ok(SystemValue::Decimal(if *b {
                rust_decimal::Decimal::ONE
            } else {
                rust_decimal::Decimal::ZERO
            })),
            other => Err(invalid(other, Decimal)),
        });
        table.register(Integer, Boolean, |v| match v {
            SystemValue::Integer(1) => Ok(SystemValue::Boolean(true)),
            SystemValue::Integer(0) => Ok(SystemValue::Boolean(false)),
            other => Err(invalid(other, Boolean)),
        });
        table.register(Decimal, Boolean, |v| match v {
            SystemValue::Decimal(d) if *d == rust_decimal::Decimal::ONE => Ok(SystemValue::Boolean(true)),
            SystemValue::Decimal(d) if d.is_zero() => Ok(SystemValue::Boolean(false)),
            other => Err(invalid(other, Boolean)),
        });

        for source in [Boolean, Integer, Decimal, Quantity, Date, DateTime, Time] {
            table.register(source, String, |v| Ok(SystemValue::String(v.to_plain_string())));
        }
        table
    }

    /// Register (or replace) the conversion for a type pair
    pub fn register(&mut self, from: SystemType, to: SystemType, conversion: ConversionFn) {
        self.entries.insert((from, to), conversion);
    }

    /// Whether a value of `from` can be turned into `to`
    pub fn supports(&self, from: SystemType, to: SystemType) -> bool {
        from == to || to == SystemType::Any || self.entries.contains_key(&(from, to))
    }

    /// Convert `value` into `target`
    ///
    /// Identity conversions (and conversions to `System.Any`) always succeed.
    pub fn apply(&self, value: &SystemValue, target: SystemType) -> CoercionResult<SystemValue> {
        let from = value.system_type();
        if from == target || target == SystemType::Any {
            return Ok(value.clone());
        }

        match self.entries.get(&(from, target)) {
            Some(conversion) => conversion(value),
            None => Err(match self.mode {
                ConversionMode::Implicit => CoercionError::NoImplicitConversion { from, to: target },
                ConversionMode::Explicit => CoercionError::NoExplicitConversion { from, to: target },
            }),
        }
    }
}

fn register_widenings(table: &mut ConversionTable) {
    use SystemType::*;

    table.register(Integer, Decimal, |v| match v {
        SystemValue::Integer(i) => Ok(SystemValue::Decimal(rust_decimal::Decimal::from(*i))),
        other => Err(invalid(other, Decimal)),
    });
    table.register(Integer, Quantity, |v| match v {
        SystemValue::Integer(i) => Ok(SystemValue::Quantity(
            super::quantity::Quantity::dimensionless(rust_decimal::Decimal::from(*i)),
        )),
        other => Err(invalid(other, Quantity)),
    });
    table.register(Decimal, Quantity, |v| match v {
        SystemValue::Decimal(d) => Ok(SystemValue::Quantity(
            super::quantity::Quantity::dimensionless(*d),
        )),
        other => Err(invalid(other, Quantity)),
    });
    table.register(Date, DateTime, |v| match v {
        SystemValue::Date(d) => Ok(SystemValue::DateTime(
            d.and_time(NaiveTime::MIN).and_utc().fixed_offset(),
        )),
        other => Err(invalid(other, DateTime)),
    });
}

fn invalid(value: &SystemValue, target: SystemType) -> CoercionError {
    CoercionError::InvalidFormat {
        value: value.to_plain_string(),
        target,
    }
}

fn string_payload(value: &SystemValue, target: SystemType) -> CoercionResult<&str> {
    value.as_str().map(str::trim).ok_or_else(|| invalid(value, target))
}

fn string_to_integer(value: &SystemValue) -> CoercionResult<SystemValue> {
    let s = string_payload(value, SystemType::Integer)?;
    s.parse::<i64>()
        .map(SystemValue::Integer)
        .map_err(|_| invalid(value, SystemType::Integer))
}

fn string_to_decimal(value: &SystemValue) -> CoercionResult<SystemValue> {
    let s = string_payload(value, SystemType::Decimal)?;
    Decimal::from_str(s)
        .map(SystemValue::Decimal)
        .map_err(|_| invalid(value, SystemType::Decimal))
}

fn string_to_boolean(value: &SystemValue) -> CoercionResult<SystemValue> {
    let s = string_payload(value, SystemType::Boolean)?;
    match s.to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Ok(SystemValue::Boolean(true)),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Ok(SystemValue::Boolean(false)),
        _ => Err(invalid(value, SystemType::Boolean)),
    }
}

/// Accepts `5`, `5 'mg'` and `5 mg`
fn string_to_quantity(value: &SystemValue) -> CoercionResult<SystemValue> {
    let s = string_payload(value, SystemType::Quantity)?;
    let (number, unit) = match s.split_once(char::is_whitespace) {
        Some((number, unit)) => (number, unit.trim()),
        None => (s, ""),
    };

    let magnitude = Decimal::from_str(number).map_err(|_| invalid(value, SystemType::Quantity))?;
    let unit = match unit.strip_prefix('\'').and_then(|u| u.strip_suffix('\'')) {
        Some(quoted) => quoted,
        None if unit.contains('\'') => return Err(invalid(value, SystemType::Quantity)),
        None => unit,
    };

    Ok(SystemValue::Quantity(if unit.is_empty() {
        Quantity::dimensionless(magnitude)
    } else {
        Quantity::new(magnitude, unit)
    }))
}

fn string_to_date(value: &SystemValue) -> CoercionResult<SystemValue> {
    let s = string_payload(value, SystemType::Date)?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(SystemValue::Date)
        .map_err(|_| invalid(value, SystemType::Date))
}

/// RFC 3339 text, or a local date-time which is taken as UTC
fn string_to_datetime(value: &SystemValue) -> CoercionResult<SystemValue> {
    let s = string_payload(value, SystemType::DateTime)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(SystemValue::DateTime(dt));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| SystemValue::DateTime(naive.and_utc().fixed_offset()))
        .map_err(|_| invalid(value, SystemType::DateTime))
}

fn string_to_time(value: &SystemValue) -> CoercionResult<SystemValue> {
    let s = string_payload(value, SystemType::Time)?;
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map(SystemValue::Time)
        .map_err(|_| invalid(value, SystemType::Time))
}

/// The implicit and explicit tables used together by an evaluation
#[derive(Debug, Clone)]
pub struct TypeConverter {
    implicit: ConversionTable,
    explicit: ConversionTable,
}

impl Default for TypeConverter {
    fn default() -> Self {
        Self::new(
            ConversionTable::implicit_defaults(),
            ConversionTable::explicit_defaults(),
        )
    }
}

impl TypeConverter {
    /// Combine two tables
    pub fn new(implicit: ConversionTable, explicit: ConversionTable) -> Self {
        Self { implicit, explicit }
    }

    /// The implicit table
    pub fn implicit(&self) -> &ConversionTable {
        &self.implicit
    }

    /// The explicit table
    pub fn explicit(&self) -> &ConversionTable {
        &self.explicit
    }

    /// Use `value` as `target` through the implicit table
    pub fn cast(&self, value: &SystemValue, target: SystemType) -> CoercionResult<SystemValue> {
        self.implicit.apply(value, target)
    }

    /// Convert `value` to `target` through the explicit table
    pub fn convert(&self, value: &SystemValue, target: SystemType) -> CoercionResult<SystemValue> {
        self.explicit.apply(value, target)
    }
}

static DEFAULT_CONVERTER: LazyLock<TypeConverter> = LazyLock::new(TypeConverter::default);

/// Process-wide immutable instance of the default tables
pub fn default_converter() -> &'static TypeConverter {
    &DEFAULT_CONVERTER
}

/// Implicit conversion with the default tables
pub fn cast(value: &SystemValue, target: SystemType) -> CoercionResult<SystemValue> {
    DEFAULT_CONVERTER.cast(value, target)
}

/// Explicit conversion with the default tables
pub fn convert(value: &SystemValue, target: SystemType) -> CoercionResult<SystemValue> {
    DEFAULT_CONVERTER.convert(value, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        assert_eq!(
            cast(&SystemValue::Integer(5), SystemType::Decimal).unwrap(),
            SystemValue::Decimal(Decimal::new(50, 1))
        );
        assert_eq!(
            cast(&SystemValue::Integer(5), SystemType::Quantity).unwrap(),
            SystemValue::Quantity(Quantity::dimensionless(Decimal::from(5)))
        );
    }

    #[test]
    fn test_identity() {
        let value = SystemValue::from("x");
        assert_eq!(cast(&value, SystemType::String).unwrap(), value);
        assert_eq!(convert(&value, SystemType::Any).unwrap(), value);
    }

    #[test]
    fn test_missing_pair() {
        let err = cast(&SystemValue::from("x"), SystemType::Decimal).unwrap_err();
        assert_eq!(
            err,
            CoercionError::NoImplicitConversion {
                from: SystemType::String,
                to: SystemType::Decimal
            }
        );
        let message = err.to_string();
        assert!(message.contains("System.String") && message.contains("System.Decimal"));
    }

    #[test]
    fn test_implicit_never_narrows() {
        let table = ConversionTable::implicit_defaults();
        assert!(!table.supports(SystemType::Decimal, SystemType::Integer));
        assert!(!table.supports(SystemType::Integer, SystemType::String));
        assert!(table.supports(SystemType::Date, SystemType::DateTime));
    }

    #[test]
    fn test_string_conversions() {
        assert_eq!(
            convert(&SystemValue::from(" 42 "), SystemType::Integer).unwrap(),
            SystemValue::Integer(42)
        );
        assert!(matches!(
            convert(&SystemValue::from("4.2"), SystemType::Integer),
            Err(CoercionError::InvalidFormat { .. })
        ));
        assert_eq!(
            convert(&SystemValue::from("yes"), SystemType::Boolean).unwrap(),
            SystemValue::Boolean(true)
        );
        assert_eq!(
            convert(&SystemValue::from("5.5 'mg'"), SystemType::Quantity).unwrap(),
            SystemValue::Quantity(Quantity::new(Decimal::new(55, 1), "mg"))
        );
        assert_eq!(
            convert(&SystemValue::from("2024-02-29"), SystemType::Date).unwrap(),
            SystemValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(convert(&SystemValue::from("2024-01-01T10:00:00Z"), SystemType::DateTime).is_ok());
        assert!(convert(&SystemValue::from("10:15"), SystemType::Time).is_ok());
    }

    #[test]
    fn test_rendering_to_string() {
        assert_eq!(
            convert(&SystemValue::Decimal(Decimal::new(125, 2)), SystemType::String).unwrap(),
            SystemValue::from("1.25")
        );
        assert_eq!(
            convert(&SystemValue::Boolean(true), SystemType::String).unwrap(),
            SystemValue::from("true")
        );
    }

    #[test]
    fn test_boolean_integer_mapping() {
        assert_eq!(
            convert(&SystemValue::Integer(0), SystemType::Boolean).unwrap(),
            SystemValue::Boolean(false)
        );
        assert!(convert(&SystemValue::Integer(2), SystemType::Boolean).is_err());
        assert_eq!(
            convert(&SystemValue::Boolean(true), SystemType::Integer).unwrap(),
            SystemValue::Integer(1)
        );
    }
}
