//! toQuantity() function - explicit conversion to Quantity

use crate::ast::Atom;
use crate::evaluator::{EvaluationResult, Evaluator};
use crate::model::{Collection, FhirPathValue, SystemType, SystemValue};
use crate::registry::function::FhirPathFunction;
use crate::registry::functions::{string_argument, system_result};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

use super::convert_input;

/// toQuantity() function - explicit conversion to Quantity
pub struct ToQuantityFunction;

impl FhirPathFunction for ToQuantityFunction {
    fn name(&self) -> &str {
        "toQuantity"
    }

    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "toQuantity",
                vec![ParameterInfo::optional("unit", SystemType::String)],
                SystemType::Quantity,
            )
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Converts the input to a quantity. Numbers become dimensionless quantities; strings may carry a unit (`'5 mg'`). With `unit`, the quantity is re-expressed in that unit by the unit conversion service."
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        let args = self.validate_args(params)?;
        let converted = convert_input(evaluator, input, SystemType::Quantity)?;
        let Some(unit_arg) = args.first() else {
            return Ok(converted);
        };

        let quantity = converted
            .first()
            .and_then(FhirPathValue::primitive_value)
            .and_then(SystemValue::as_quantity)
            .cloned();
        let Some(quantity) = quantity else {
            return Ok(Collection::new());
        };
        let Some(unit) = string_argument(evaluator, unit_arg)? else {
            return Ok(Collection::new());
        };

        let target = evaluator.unit_converter().convert(&quantity, &unit)?;
        Ok(system_result(target))
    }
}
