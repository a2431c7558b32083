//! exists() function - checks if a collection has any items

use crate::ast::Atom;
use crate::evaluator::{EvaluationError, EvaluationResult, Evaluator};
use crate::model::{Collection, SystemType, SystemValue};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::system_result;
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// exists() function - checks if a collection has any items
pub struct ExistsFunction;

impl FhirPathFunction for ExistsFunction {
    fn name(&self) -> &str {
        "exists"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "exists",
                vec![ParameterInfo::optional("criteria", SystemType::Boolean)],
                SystemType::Boolean,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns true if the input collection has any elements, optionally filtered by criteria. The criteria is evaluated once per item with that item as its context."
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        let args = self.validate_args(params)?;
        let Some(criteria) = args.first() else {
            return Ok(system_result(!input.is_empty()));
        };

        for item in input.iter() {
            let matched = evaluator
                .evaluate(criteria, Collection::single(item.clone()))
                .map_err(|e| EvaluationError::in_rule("criteria of exists", e))?;
            if criteria_holds(&matched)? {
                return Ok(system_result(true));
            }
        }
        Ok(system_result(false))
    }
}

/// A lone boolean of either namespace decides; empty means false
fn criteria_holds(matched: &Collection) -> EvaluationResult<bool> {
    if let [item] = matched.as_slice() {
        if let Some(SystemValue::Boolean(holds)) = item.primitive_value() {
            return Ok(*holds);
        }
    }
    Ok(matched
        .singleton(SystemType::Boolean)?
        .and_then(SystemValue::as_boolean)
        .unwrap_or(false))
}
