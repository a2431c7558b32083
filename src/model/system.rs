//! Primitive scalar values of the `System` namespace

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::quantity::Quantity;
use super::types::SystemType;

/// A single primitive scalar
///
/// Every variant maps to exactly one [`SystemType`]; `System.Any` has no
/// values of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SystemValue {
    /// Boolean value
    Boolean(bool),
    /// String value
    String(String),
    /// Integer value (64-bit signed)
    Integer(i64),
    /// Decimal value with arbitrary precision
    Decimal(Decimal),
    /// Quantity value with unit
    Quantity(Quantity),
    /// Date value (without time)
    Date(NaiveDate),
    /// DateTime value with timezone
    DateTime(DateTime<FixedOffset>),
    /// Time value (without date)
    Time(NaiveTime),
}

impl SystemValue {
    /// The system type of this value
    pub fn system_type(&self) -> SystemType {
        match self {
            SystemValue::Boolean(_) => SystemType::Boolean,
            SystemValue::String(_) => SystemType::String,
            SystemValue::Integer(_) => SystemType::Integer,
            SystemValue::Decimal(_) => SystemType::Decimal,
            SystemValue::Quantity(_) => SystemType::Quantity,
            SystemValue::Date(_) => SystemType::Date,
            SystemValue::DateTime(_) => SystemType::DateTime,
            SystemValue::Time(_) => SystemType::Time,
        }
    }

    /// Borrow the string payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SystemValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Copy out the boolean payload
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SystemValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Copy out the integer payload
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SystemValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Copy out the decimal payload
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            SystemValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Borrow the quantity payload
    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            SystemValue::Quantity(q) => Some(q),
            _ => None,
        }
    }

    /// Render without literal decoration (no quotes, no `@`)
    pub fn to_plain_string(&self) -> String {
        match self {
            SystemValue::Boolean(b) => b.to_string(),
            SystemValue::String(s) => s.clone(),
            SystemValue::Integer(i) => i.to_string(),
            SystemValue::Decimal(d) => d.to_string(),
            SystemValue::Quantity(q) => q.to_string(),
            SystemValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            SystemValue::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            SystemValue::Time(t) => format_time(t),
        }
    }
}

fn format_time(time: &NaiveTime) -> String {
    let millis = time.nanosecond() / 1_000_000;
    if millis == 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        format!("{}.{millis:03}", time.format("%H:%M:%S"))
    }
}

/// Canonical literal rendering: `true`, `'text'`, `42`, `1.5`, `5 'mg'`, `@2024-01-02`
impl fmt::Display for SystemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemValue::String(s) => write!(f, "'{s}'"),
            SystemValue::Date(_) | SystemValue::DateTime(_) => {
                write!(f, "@{}", self.to_plain_string())
            }
            SystemValue::Time(t) => write!(f, "@T{}", format_time(t)),
            other => f.write_str(&other.to_plain_string()),
        }
    }
}

impl From<bool> for SystemValue {
    fn from(value: bool) -> Self {
        SystemValue::Boolean(value)
    }
}

impl From<i64> for SystemValue {
    fn from(value: i64) -> Self {
        SystemValue::Integer(value)
    }
}

impl From<Decimal> for SystemValue {
    fn from(value: Decimal) -> Self {
        SystemValue::Decimal(value)
    }
}

impl From<&str> for SystemValue {
    fn from(value: &str) -> Self {
        SystemValue::String(value.to_string())
    }
}

impl From<String> for SystemValue {
    fn from(value: String) -> Self {
        SystemValue::String(value)
    }
}

impl From<Quantity> for SystemValue {
    fn from(value: Quantity) -> Self {
        SystemValue::Quantity(value)
    }
}
