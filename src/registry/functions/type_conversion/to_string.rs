//! toString() function - explicit conversion to String

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::signature::FunctionSignature;

use super::convert_input;

/// toString() function - explicit conversion to String
pub struct ToStringFunction;

impl FhirPathFunction for ToStringFunction {
    fn name(&self) -> &str {
        "toString"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("toString", vec![], SystemType::String)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Converts the input to its canonical string form, without quotes. Returns empty when the input cannot be converted."
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        self.validate_args(params)?;
        convert_input(evaluator, input, SystemType::String)
    }
}
