//! toDecimal() function - explicit conversion to Decimal

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::signature::FunctionSignature;

use super::convert_input;

/// toDecimal() function - explicit conversion to Decimal
pub struct ToDecimalFunction;

impl FhirPathFunction for ToDecimalFunction {
    fn name(&self) -> &str {
        "toDecimal"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("toDecimal", vec![], SystemType::Decimal)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Converts the input to a decimal. Integers widen exactly; booleans convert to 0 or 1. Returns empty when the input cannot be converted."
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        self.validate_args(params)?;
        convert_input(evaluator, input, SystemType::Decimal)
    }
}
