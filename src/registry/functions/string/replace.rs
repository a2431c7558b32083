//! replace() function - literal string replacement

use crate::ast::Atom;
use crate::evaluator::{EvaluationError, EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::{string_argument, string_input, system_result};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// replace() function - literal string replacement
pub struct ReplaceFunction;

impl FhirPathFunction for ReplaceFunction {
    fn name(&self) -> &str {
        "replace"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "replace",
                vec![
                    ParameterInfo::required("pattern", SystemType::String),
                    ParameterInfo::required("substitution", SystemType::String),
                ],
                SystemType::String,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the input string with all instances of `pattern` replaced with `substitution`. The pattern is matched literally. Returns empty when the input or either argument is empty."
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        let Some(text) = string_input(input)? else {
            return Ok(Collection::new());
        };

        let args = Evaluator::arguments(params)?;
        if args.len() < 2 {
            return Ok(Collection::new());
        }
        if args.len() > 2 {
            return Err(EvaluationError::InvalidArity {
                name: self.name().to_string(),
                expected: self.signature().arity(),
                actual: args.len(),
            });
        }

        let pattern = string_argument(evaluator, args[0])?;
        let substitution = string_argument(evaluator, args[1])?;
        match (pattern, substitution) {
            (Some(pattern), Some(substitution)) => {
                Ok(system_result(text.replace(&pattern, &substitution)))
            }
            _ => Ok(Collection::new()),
        }
    }
}
