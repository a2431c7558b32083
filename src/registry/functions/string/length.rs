//! length() function - number of characters in a string

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::{string_input, system_result};
use crate::registry::signature::FunctionSignature;

/// length() function - number of characters in a string
pub struct LengthFunction;

impl FhirPathFunction for LengthFunction {
    fn name(&self) -> &str {
        "length"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("length", vec![], SystemType::Integer)
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
        Ok(match string_input(input)? {
            Some(text) => system_result(text.chars().count() as i64),
            None => Collection::new(),
        })
    }
}
