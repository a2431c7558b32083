//! Function registry for FHIRPath
//!
//! Builtins are trait objects keyed by name. A registry is built once and
//! lent to every evaluation that should see it.

#![warn(missing_docs)]

pub mod function;
pub mod functions;
pub mod signature;

pub use function::{FhirPathFunction, FunctionHandler, FunctionRegistry};
pub use signature::{FunctionSignature, ParameterInfo};
