//! endsWith() function - substring test

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::{string_argument, string_input, system_result};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// endsWith() function - substring test
pub struct EndsWithFunction;

impl FhirPathFunction for EndsWithFunction {
    fn name(&self) -> &str {
        "endsWith"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "endsWith",
                vec![ParameterInfo::required("suffix", SystemType::String)],
                SystemType::Boolean,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns true when the input string ends with the given suffix. Returns empty when the input or the argument is empty."
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
            Some(suffix) => system_result(text.ends_with(suffix.as_str())),
            None => Collection::new(),
        })
    }
}
