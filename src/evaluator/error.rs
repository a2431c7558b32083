// Error types for FHIRPath evaluation

use thiserror::Error;

use crate::ast::AtomKind;
use crate::model::{CoercionError, ModelError, UnitError};

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors that can occur during FHIRPath evaluation
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// Cardinality, type and other value model failures
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A conversion between system types failed
    #[error(transparent)]
    Conversion(#[from] CoercionError),

    /// The unit conversion service rejected a conversion
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// No function of that name is registered
    #[error("function not found: {name}")]
    FunctionNotFound {
        /// Function name
        name: String,
    },

    /// A function received an unsupported number of arguments
    #[error("function '{name}' expects {expected} arguments, got {actual}")]
    InvalidArity {
        /// Function name
        name: String,
        /// Accepted argument count, e.g. `1` or `1..2`
        expected: String,
        /// Number of arguments supplied
        actual: usize,
    },

    /// A literal token that does not denote a value
    #[error("invalid {kind} literal '{literal}'")]
    InvalidLiteral {
        /// Literal kind
        kind: AtomKind,
        /// Raw token
        literal: String,
    },

    /// A node that cannot be evaluated in its position
    #[error("cannot evaluate {kind} here")]
    UnexpectedAtom {
        /// Node kind
        kind: AtomKind,
    },

    /// The expression nests deeper than the configured limit
    #[error("maximum recursion depth {limit} exceeded")]
    RecursionLimit {
        /// Configured limit
        limit: usize,
    },

    /// A failure inside a rule, wrapped with the rule's name
    #[error("error evaluating {rule}: {source}")]
    Rule {
        /// Rule name (`invocation`, `parameters of replace`, ...)
        rule: String,
        /// Underlying failure
        #[source]
        source: Box<EvaluationError>,
    },

    /// One or both branches of a union failed
    #[error("error evaluating union: {}", join_errors(.0))]
    Union(Vec<EvaluationError>),
}

fn join_errors(errors: &[EvaluationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl EvaluationError {
    /// Wrap `source` with the name of the rule it occurred in
    pub fn in_rule(rule: impl Into<String>, source: EvaluationError) -> Self {
        EvaluationError::Rule {
            rule: rule.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, with all rule wrappers removed
    ///
    /// A union failure is its own root cause.
    pub fn root_cause(&self) -> &EvaluationError {
        let mut current = self;
        while let EvaluationError::Rule { source, .. } = current {
            current = source;
        }
        current
    }

    /// Whether the root cause is a singleton cardinality failure
    pub fn is_cardinality_error(&self) -> bool {
        matches!(
            self.root_cause(),
            EvaluationError::Model(ModelError::Cardinality { .. })
        )
    }

    /// Whether the root cause is a singleton type failure
    pub fn is_type_error(&self) -> bool {
        matches!(self.root_cause(), EvaluationError::Model(ModelError::Type { .. }))
    }
}
