use crate::evaluator::{EvaluationError, EvaluationResult, Evaluator};
use crate::model::{Collection, FhirPathValue, Quantity, SystemValue, UnitError};
use crate::parser::parse;
use crate::registry::FunctionRegistry;
use rust_decimal::Decimal;
use rstest::rstest;

fn eval(expression: &str) -> EvaluationResult<Collection> {
    let registry = FunctionRegistry::standard();
    let atom = parse(expression).unwrap();
    Evaluator::new(&registry).evaluate(&atom, Collection::new())
}

fn single(expression: &str) -> Option<SystemValue> {
    eval(expression)
        .unwrap()
        .first()
        .and_then(FhirPathValue::primitive_value)
        .cloned()
}

#[rstest]
#[case("'42'.toInteger()", SystemValue::Integer(42))]
#[case("true.toInteger()", SystemValue::Integer(1))]
#[case("5.toDecimal()", SystemValue::Decimal(Decimal::from(5)))]
#[case("'1.50'.toDecimal()", SystemValue::Decimal(Decimal::new(150, 2)))]
#[case("'yes'.toBoolean()", SystemValue::Boolean(true))]
#[case("0.toBoolean()", SystemValue::Boolean(false))]
#[case("12.toString()", SystemValue::from("12"))]
#[case("true.toString()", SystemValue::from("true"))]
#[case("'abc'.toString()", SystemValue::from("abc"))]
fn test_conversions(#[case] expression: &str, #[case] expected: SystemValue) {
    assert_eq!(single(expression), Some(expected));
}

#[rstest]
#[case("'abc'.toInteger()")]
#[case("'1.5'.toInteger()")]
#[case("'maybe'.toBoolean()")]
#[case("2.toBoolean()")]
#[case("toInteger()")]
#[case("'x'.toQuantity()")]
fn test_unconvertible_gives_empty(#[case] expression: &str) {
    assert!(eval(expression).unwrap().is_empty());
}

#[test]
fn test_to_quantity() {
    assert_eq!(
        single("'5 mg'.toQuantity()"),
        Some(SystemValue::Quantity(Quantity::new(Decimal::from(5), "mg")))
    );
    assert_eq!(
        single("3.toQuantity()"),
        Some(SystemValue::Quantity(Quantity::dimensionless(Decimal::from(3))))
    );
    assert_eq!(
        single("'5 mg'.toQuantity('mg')"),
        Some(SystemValue::Quantity(Quantity::new(Decimal::from(5), "mg")))
    );
}

#[test]
fn test_to_quantity_incompatible_unit() {
    let err = eval("'5 mg'.toQuantity('kg')").unwrap_err();
    assert!(matches!(
        err.root_cause(),
        EvaluationError::Unit(UnitError::Incompatible { .. })
    ));
}

#[test]
fn test_conversion_needs_singleton() {
    let err = eval("('1', '2').toInteger()").unwrap_err();
    assert!(err.is_cardinality_error());
}
