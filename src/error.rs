//! Error types for FHIRPath operations
//!
//! Each layer owns its error enum; [`FhirPathError`] gathers them for the
//! engine facade.

use thiserror::Error;

use crate::evaluator::EvaluationError;
use crate::model::{CoercionError, ModelError, UnitError};
use crate::parser::{LexError, ParseError};

/// Result type alias for FHIRPath operations
pub type Result<T> = std::result::Result<T, FhirPathError>;

/// Any failure surfaced by the engine facade
#[derive(Error, Debug)]
pub enum FhirPathError {
    /// Scanning the expression failed
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Parsing the expression failed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Ingestion or value model failure
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Conversion between system types failed
    #[error(transparent)]
    Conversion(#[from] CoercionError),

    /// Unit conversion failed
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Evaluating a compiled expression failed
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl FhirPathError {
    /// Whether the expression text itself was rejected
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, FhirPathError::Lex(_) | FhirPathError::Parse(_))
    }

    /// Byte offset into the expression for syntax errors
    pub fn position(&self) -> Option<usize> {
        match self {
            FhirPathError::Lex(LexError::UnexpectedCharacter { position, .. })
            | FhirPathError::Lex(LexError::UnterminatedString { position }) => Some(*position),
            FhirPathError::Parse(err) => Some(err.position()),
            _ => None,
        }
    }
}
