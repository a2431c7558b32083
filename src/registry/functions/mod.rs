//! Function implementations for FHIRPath expressions

pub mod collection;
pub mod string;
pub mod type_conversion;

pub use collection::*;
pub use string::*;
pub use type_conversion::*;

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, FhirPathValue, SystemType, SystemValue};
use crate::registry::FunctionRegistry;

/// Register every builtin function
pub fn register_builtin_functions(registry: &mut FunctionRegistry) {
    // String functions
    registry.register(ReplaceFunction);
    registry.register(UpperFunction);
    registry.register(LowerFunction);
    registry.register(LengthFunction);
    registry.register(StartsWithFunction);
    registry.register(EndsWithFunction);
    registry.register(ContainsFunction);
    registry.register(SubstringFunction);

    // Collection functions
    registry.register(CountFunction);
    registry.register(EmptyFunction);
    registry.register(ExistsFunction);
    registry.register(FirstFunction);
    registry.register(LastFunction);
    registry.register(TailFunction);

    // Type conversion functions
    registry.register(ToStringFunction);
    registry.register(ToIntegerFunction);
    registry.register(ToDecimalFunction);
    registry.register(ToBooleanFunction);
    registry.register(ToQuantityFunction);
}

/// One-item collection holding a `System.*` value
pub(crate) fn system_result(value: impl Into<SystemValue>) -> Collection {
    Collection::single(FhirPathValue::system(value.into()))
}

/// The input as a single `System.String`, `None` when the input is empty
pub(crate) fn string_input(input: &Collection) -> EvaluationResult<Option<&str>> {
    Ok(input
        .singleton(SystemType::String)?
        .and_then(SystemValue::as_str))
}

/// Evaluate `arg` against the calling context and coerce it to a single string
pub(crate) fn string_argument(
    evaluator: &mut Evaluator<'_>,
    arg: &Atom,
) -> EvaluationResult<Option<String>> {
    let value = evaluator.evaluate_argument(arg)?;
    Ok(value
        .singleton(SystemType::String)?
        .and_then(SystemValue::as_str)
        .map(str::to_string))
}

/// Evaluate `arg` against the calling context and coerce it to a single integer
pub(crate) fn integer_argument(
    evaluator: &mut Evaluator<'_>,
    arg: &Atom,
) -> EvaluationResult<Option<i64>> {
    let value = evaluator.evaluate_argument(arg)?;
    Ok(value
        .singleton(SystemType::Integer)?
        .and_then(SystemValue::as_integer))
}
