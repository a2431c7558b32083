//! FHIRPath implementation in Rust
//!
//! A compact FHIRPath interpreter: expressions are parsed once into an
//! [`Atom`] tree and evaluated against documents ingested from JSON into
//! path-indexed composites.
//!
//! ```rust
//! use octofhir_fhirpath_lite::{FhirPathEngine, SystemValue};
//!
//! let engine = FhirPathEngine::new();
//! let json = br#"{"resourceType":"Patient","name":[{"family":"Chalmers"}]}"#;
//! let result = engine.evaluate_json("name.family", json).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(
//!     result.first().and_then(|v| v.primitive_value()),
//!     Some(&SystemValue::from("Chalmers"))
//! );
//! ```

pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod registry;

use std::sync::LazyLock;

pub use ast::{Atom, AtomKind, Visitor};
pub use engine::FhirPathEngine;
pub use error::{FhirPathError, Result};
pub use evaluator::{EngineConfig, EvaluationError, EvaluationResult, Evaluator};
pub use model::{
    CoercionError, Collection, FhirPathValue, ModelError, Quantity, SystemType, SystemValue,
    TypeConverter, TypeTag, UnitConverter, cast, convert, ingest, ingest_resource,
};
pub use parser::{LexError, ParseError, ParseResult, parse, parse_bytes};
pub use registry::{FhirPathFunction, FunctionRegistry, FunctionSignature};

static STANDARD_REGISTRY: LazyLock<FunctionRegistry> = LazyLock::new(FunctionRegistry::standard);

/// Evaluate a parsed expression with the standard builtins
///
/// Without an input value the expression runs against the empty collection.
pub fn evaluate(atom: &Atom, input: Option<&FhirPathValue>) -> EvaluationResult<Collection> {
    let context = input.cloned().map(Collection::single).unwrap_or_default();
    Evaluator::new(&STANDARD_REGISTRY).evaluate(atom, context)
}
