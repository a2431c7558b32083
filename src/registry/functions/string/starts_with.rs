//! startsWith() function - substring test

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::{string_argument, string_input, system_result};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// startsWith() function - substring test
pub struct StartsWithFunction;

impl FhirPathFunction for StartsWithFunction {
    fn name(&self) -> &str {
        "startsWith"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "startsWith",
                vec![ParameterInfo::required("prefix", SystemType::String)],
                SystemType::Boolean,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns true when the input string starts with the given prefix. Returns empty when the input or the argument is empty."
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
            Some(prefix) => system_result(text.starts_with(prefix.as_str())),
            None => Collection::new(),
        })
    }
}
