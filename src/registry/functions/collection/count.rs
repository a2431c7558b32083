//! count() function - returns the number of items in a collection

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::system_result;
use crate::registry::signature::FunctionSignature;

/// count() function - returns the number of items in a collection
pub struct CountFunction;

impl FhirPathFunction for CountFunction {
    fn name(&self) -> &str {
        "count"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("count", vec![], SystemType::Integer)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the integer count of the number of items in the input collection. Returns 0 when the input collection is empty."
    }

    fn evaluate(
        &self,
        _evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        self.validate_args(params)?;
        Ok(system_result(input.len() as i64))
    }
}
