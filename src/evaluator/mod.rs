//! FHIRPath Expression Evaluator
//!
//! Tree-walking interpretation of parsed expressions with FHIRPath's
//! collection-valued, empty-propagating semantics.

mod config;
mod engine;
mod error;

pub use config::EngineConfig;
pub use engine::{DEFAULT_MAX_DEPTH, Evaluator};
pub use error::{EvaluationError, EvaluationResult};
