//! contains() function - substring test

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::{string_argument, string_input, system_result};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// contains() function - substring test
pub struct ContainsFunction;

impl FhirPathFunction for ContainsFunction {
    fn name(&self) -> &str {
        "contains"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "contains",
                vec![ParameterInfo::required("substring", SystemType::String)],
                SystemType::Boolean,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns true when the given substring is a substring of the input string. Returns empty when the input or the argument is empty."
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
        Ok(match string_argument(evaluator, args[0])? {
            Some(substring) => system_result(text.contains(substring.as_str())),
            None => Collection::new(),
        })
    }
}
