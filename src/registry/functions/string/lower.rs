//! lower() function - lower case conversion

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::{string_input, system_result};
use crate::registry::signature::FunctionSignature;

/// lower() function - lower case conversion
pub struct LowerFunction;

impl FhirPathFunction for LowerFunction {
    fn name(&self) -> &str {
        "lower"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("lower", vec![], SystemType::String)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the input string with all characters converted to lower case."
    }

    fn evaluate(
        &self,
        _evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        self.validate_args(params)?;
        Ok(match string_input(input)? {
            Some(text) => system_result(text.to_lowercase()),
            None => Collection::new(),
        })
    }
}
