//! last() function - the last item of a collection

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::signature::FunctionSignature;

/// last() function
pub struct LastFunction;

impl FhirPathFunction for LastFunction {
    fn name(&self) -> &str {
        "last"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("last", vec![], SystemType::Any)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns a collection containing only the last item in the input collection. Returns empty when the input is empty."
    }

    fn evaluate(
        &self,
        _evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        self.validate_args(params)?;
        Ok(input.last().cloned().into_iter().collect())
    }
}
