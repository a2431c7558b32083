//! toBoolean() function - explicit conversion to Boolean

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::signature::FunctionSignature;

use super::convert_input;

/// toBoolean() function - explicit conversion to Boolean
pub struct ToBooleanFunction;

impl FhirPathFunction for ToBooleanFunction {
    fn name(&self) -> &str {
        "toBoolean"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("toBoolean", vec![], SystemType::Boolean)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Converts the input to a boolean. Accepts 'true', 't', 'yes', 'y', '1', '1.0' and their false counterparts, and the numbers 0 and 1. Returns empty when the input cannot be converted."
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        self.validate_args(params)?;
        convert_input(evaluator, input, SystemType::Boolean)
    }
}
