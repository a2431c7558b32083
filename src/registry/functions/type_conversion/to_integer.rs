//! toInteger() function - explicit conversion to Integer

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::signature::FunctionSignature;

use super::convert_input;

/// toInteger() function - explicit conversion to Integer
pub struct ToIntegerFunction;

impl FhirPathFunction for ToIntegerFunction {
    fn name(&self) -> &str {
        "toInteger"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("toInteger", vec![], SystemType::Integer)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Converts the input to an integer. Strings must hold an optional sign and digits only; booleans convert to 0 or 1. Returns empty when the input cannot be converted."
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        self.validate_args(params)?;
        convert_input(evaluator, input, SystemType::Integer)
    }
}
