//! Type conversion functions for FHIRPath expressions
//!
//! Conversions go through the explicit table of the evaluator's
//! [`TypeConverter`](crate::model::TypeConverter). A value the table rejects
//! converts to empty.

mod to_boolean;
mod to_decimal;
mod to_integer;
mod to_quantity;
mod to_string;

pub use to_boolean::ToBooleanFunction;
pub use to_decimal::ToDecimalFunction;
pub use to_integer::ToIntegerFunction;
pub use to_quantity::ToQuantityFunction;
pub use to_string::ToStringFunction;

use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::functions::system_result;

/// Explicitly convert the single input to `target`
pub(crate) fn convert_input(
    evaluator: &Evaluator<'_>,
    input: &Collection,
    target: SystemType,
) -> EvaluationResult<Collection> {
    let Some(value) = input.singleton(SystemType::Any)? else {
        return Ok(Collection::new());
    };
    match evaluator.converter().convert(value, target) {
        Ok(converted) => Ok(system_result(converted)),
        Err(err) => {
            log::debug!("{err}, result is empty");
            Ok(Collection::new())
        }
    }
}

#[cfg(test)]
mod tests;
