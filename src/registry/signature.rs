//! Function signatures for arity checking and documentation

use crate::model::SystemType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared shape of a builtin function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name
    pub name: String,
    /// Parameter types
    pub parameters: Vec<ParameterInfo>,
    /// Return type
    pub return_type: SystemType,
    /// Minimum number of arguments
    pub min_arity: usize,
    /// Maximum number of arguments
    pub max_arity: usize,
}

/// Parameter information for functions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub param_type: SystemType,
    /// Whether this parameter is optional
    pub optional: bool,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        return_type: SystemType,
    ) -> Self {
        let min_arity = parameters.iter().filter(|p| !p.optional).count();
        let max_arity = parameters.len();

        Self {
            name: name.into(),
            parameters,
            return_type,
            min_arity,
            max_arity,
        }
    }

    /// Whether `count` arguments are accepted
    pub fn accepts(&self, count: usize) -> bool {
        (self.min_arity..=self.max_arity).contains(&count)
    }

    /// Accepted argument count as text (`0`, `1..2`)
    pub fn arity(&self) -> String {
        if self.min_arity == self.max_arity {
            self.min_arity.to_string()
        } else {
            format!("{}..{}", self.min_arity, self.max_arity)
        }
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if param.optional {
                write!(f, "[{}: {}]", param.name, param.param_type)?;
            } else {
                write!(f, "{}: {}", param.name, param.param_type)?;
            }
        }
        write!(f, ") -> {}", self.return_type)
    }
}

impl ParameterInfo {
    /// Create a required parameter
    pub fn required(name: impl Into<String>, param_type: SystemType) -> Self {
        Self {
            name: name.into(),
            param_type,
            optional: false,
        }
    }

    /// Create an optional parameter
    pub fn optional(name: impl Into<String>, param_type: SystemType) -> Self {
        Self {
            name: name.into(),
            param_type,
            optional: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        let sig = FunctionSignature::new(
            "substring",
            vec![
                ParameterInfo::required("start", SystemType::Integer),
                ParameterInfo::optional("length", SystemType::Integer),
            ],
            SystemType::String,
        );
        assert!(!sig.accepts(0));
        assert!(sig.accepts(1));
        assert!(sig.accepts(2));
        assert!(!sig.accepts(3));
        assert_eq!(sig.arity(), "1..2");
        assert_eq!(
            sig.to_string(),
            "substring(start: System.Integer, [length: System.Integer]) -> System.String"
        );
    }
}
