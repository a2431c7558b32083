//! substring() function - extract part of a string

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::{integer_argument, string_input, system_result};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// substring() function - extract part of a string
pub struct SubstringFunction;

impl FhirPathFunction for SubstringFunction {
    fn name(&self) -> &str {
        "substring"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "substring",
                vec![
                    ParameterInfo::required("start", SystemType::Integer),
                    ParameterInfo::optional("length", SystemType::Integer),
                ],
                SystemType::String,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the part of the input string starting at character position `start` (zero-based). With `length`, at most that many characters are returned. Returns empty when `start` is outside the string."
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        let args = self.validate_args(params)?;
        let Some(text) = string_input(input)? else {
            return Ok(Collection::new());
        };
        let Some(start) = integer_argument(evaluator, args[0])? else {
            return Ok(Collection::new());
        };
        // An empty length behaves like an omitted one
        let length = match args.get(1) {
            Some(arg) => integer_argument(evaluator, arg)?,
            None => None,
        };

        let char_count = text.chars().count();
        let Some(start) = usize::try_from(start).ok().filter(|&s| s < char_count) else {
            return Ok(Collection::new());
        };
        let take = length.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(0));
        let result: String = text.chars().skip(start).take(take).collect();
        Ok(system_result(result))
    }
}

#[cfg(test)]
mod tests {
    use crate::evaluator::Evaluator;
    use crate::model::{Collection, FhirPathValue, SystemValue};
    use crate::parser::parse;
    use crate::registry::FunctionRegistry;
    use rstest::rstest;

    fn eval_string(expression: &str) -> Option<String> {
        let registry = FunctionRegistry::standard();
        let atom = parse(expression).unwrap();
        let result = Evaluator::new(&registry)
            .evaluate(&atom, Collection::new())
            .unwrap();
        result
            .first()
            .and_then(FhirPathValue::primitive_value)
            .and_then(SystemValue::as_str)
            .map(str::to_string)
    }

    #[rstest]
    #[case("'abcdef'.substring(2)", Some("cdef"))]
    #[case("'abcdef'.substring(1, 3)", Some("bcd"))]
    #[case("'abcdef'.substring(4, 10)", Some("ef"))]
    #[case("'abcdef'.substring(6)", None)]
    #[case("'abcdef'.substring(('-1'.toInteger()))", None)]
    #[case("'abcdef'.substring(2, ('-1'.toInteger()))", Some(""))]
    #[case("'h\\u00e9llo'.substring(1, 2)", Some("\u{e9}l"))]
    fn test_substring(#[case] expression: &str, #[case] expected: Option<&str>) {
        assert_eq!(eval_string(expression).as_deref(), expected);
    }
}
