//! empty() function - tests whether a collection has no items

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::system_result;
use crate::registry::signature::FunctionSignature;

/// empty() function - tests whether a collection has no items
pub struct EmptyFunction;

impl FhirPathFunction for EmptyFunction {
    fn name(&self) -> &str {
        "empty"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("empty", vec![], SystemType::Boolean)
        });
        &SIG
    }

    fn evaluate(
        &self,
        _evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        self.validate_args(params)?;
        Ok(system_result(input.is_empty()))
    }
}
