//! tail() function - all but the first item

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::signature::FunctionSignature;

/// tail() function - all but the first item
pub struct TailFunction;

impl FhirPathFunction for TailFunction {
    fn name(&self) -> &str {
        "tail"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("tail", vec![], SystemType::Any)
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
        Ok(input.iter().skip(1).cloned().collect())
    }
}
