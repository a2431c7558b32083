//! Data model and value types for FHIRPath expressions
//!
//! This module provides the typed scalars of the `System` namespace, the
//! path-indexed document nodes built by JSON ingestion, collections, and the
//! implicit/explicit conversion tables.

pub mod error;
pub mod json;
pub mod path;
pub mod quantity;
pub mod system;
pub mod type_coercion;
pub mod types;
pub mod value;

pub use error::{ModelError, ModelResult};
pub use json::{from_json_value, ingest, ingest_resource};
pub use path::{PathKey, PathSegment};
pub use quantity::{IdentityUnitConverter, Quantity, UnitConverter, UnitError};
pub use system::SystemValue;
pub use type_coercion::{
    CoercionError, CoercionResult, ConversionMode, ConversionTable, TypeConverter, cast, convert,
    default_converter,
};
pub use types::{FHIR_NAMESPACE, SYSTEM_NAMESPACE, SystemType, TypeTag};
pub use value::{Collection, FhirPathValue, PathMap};
