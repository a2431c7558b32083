// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conversion table integration tests

use chrono::{NaiveDate, NaiveTime};
use octofhir_fhirpath_lite::model::{ConversionMode, ConversionTable, TypeConverter};
use octofhir_fhirpath_lite::{CoercionError, Quantity, SystemType, SystemValue, cast, convert};
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;

#[test]
fn test_cast_integer_to_decimal() {
    let result = cast(&SystemValue::Integer(5), SystemType::Decimal).unwrap();
    assert_eq!(result, SystemValue::Decimal(Decimal::new(50, 1)));
}

#[test]
fn test_cast_string_to_decimal_fails() {
    let err = cast(&SystemValue::from("x"), SystemType::Decimal).unwrap_err();
    assert_eq!(
        err,
        CoercionError::NoImplicitConversion {
            from: SystemType::String,
            to: SystemType::Decimal,
        }
    );
    let message = err.to_string();
    assert!(message.contains("String") && message.contains("Decimal"), "{message}");
}

#[rstest]
#[case(SystemValue::Integer(3), SystemType::Integer)]
#[case(SystemValue::from("a"), SystemType::String)]
#[case(SystemValue::Boolean(true), SystemType::Any)]
fn test_identity_always_succeeds(#[case] value: SystemValue, #[case] target: SystemType) {
    assert_eq!(cast(&value, target).unwrap(), value);
    assert_eq!(convert(&value, target).unwrap(), value);
}

#[rstest]
#[case(SystemValue::Decimal(Decimal::new(15, 1)), SystemType::Integer)]
#[case(SystemValue::Integer(1), SystemType::Boolean)]
#[case(SystemValue::Integer(1), SystemType::String)]
#[case(SystemValue::Boolean(true), SystemType::Integer)]
fn test_implicit_never_narrows(#[case] value: SystemValue, #[case] target: SystemType) {
    assert!(matches!(
        cast(&value, target),
        Err(CoercionError::NoImplicitConversion { .. })
    ));
}

#[rstest]
#[case(SystemValue::Integer(2), SystemType::Quantity, SystemValue::Quantity(Quantity::dimensionless(Decimal::from(2))))]
#[case(
    SystemValue::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
    SystemType::DateTime,
    SystemValue::DateTime(
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_time(NaiveTime::MIN)
            .and_utc()
            .fixed_offset()
    )
)]
fn test_implicit_widenings(
    #[case] value: SystemValue,
    #[case] target: SystemType,
    #[case] expected: SystemValue,
) {
    assert_eq!(cast(&value, target).unwrap(), expected);
}

#[rstest]
#[case(SystemValue::from(" 42 "), SystemType::Integer, SystemValue::Integer(42))]
#[case(SystemValue::from("2.50"), SystemType::Decimal, SystemValue::Decimal(Decimal::new(250, 2)))]
#[case(SystemValue::from("No"), SystemType::Boolean, SystemValue::Boolean(false))]
#[case(SystemValue::from("5 'mg'"), SystemType::Quantity, SystemValue::Quantity(Quantity::new(Decimal::from(5), "mg")))]
#[case(SystemValue::from("2024-02-29"), SystemType::Date, SystemValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))]
#[case(SystemValue::from("10:30"), SystemType::Time, SystemValue::Time(NaiveTime::from_hms_opt(10, 30, 0).unwrap()))]
#[case(SystemValue::Decimal(Decimal::new(15, 1)), SystemType::String, SystemValue::from("1.5"))]
#[case(SystemValue::Boolean(true), SystemType::Decimal, SystemValue::Decimal(Decimal::ONE))]
fn test_explicit_conversions(
    #[case] value: SystemValue,
    #[case] target: SystemType,
    #[case] expected: SystemValue,
) {
    assert_eq!(convert(&value, target).unwrap(), expected);
}

#[rstest]
#[case(SystemValue::from("x"), SystemType::Decimal)]
#[case(SystemValue::from("2023-02-29"), SystemType::Date)]
#[case(SystemValue::from("5 'mg"), SystemType::Quantity)]
#[case(SystemValue::Integer(7), SystemType::Boolean)]
fn test_explicit_rejects_bad_values(#[case] value: SystemValue, #[case] target: SystemType) {
    assert!(matches!(
        convert(&value, target),
        Err(CoercionError::InvalidFormat { target: t, .. }) if t == target
    ));
}

#[test]
fn test_explicit_missing_pair() {
    let date = SystemValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(
        convert(&date, SystemType::Integer).unwrap_err(),
        CoercionError::NoExplicitConversion {
            from: SystemType::Date,
            to: SystemType::Integer,
        }
    );
}

#[test]
fn test_custom_tables() {
    let mut implicit = ConversionTable::new(ConversionMode::Implicit);
    implicit.register(SystemType::Boolean, SystemType::String, |v| {
        Ok(SystemValue::String(v.to_plain_string()))
    });
    let converter = TypeConverter::new(implicit, ConversionTable::explicit_defaults());

    assert_eq!(
        converter.cast(&SystemValue::Boolean(true), SystemType::String).unwrap(),
        SystemValue::from("true")
    );
    assert!(converter.cast(&SystemValue::Integer(1), SystemType::Decimal).is_err());
    assert!(converter.implicit().supports(SystemType::Boolean, SystemType::String));
}
