//! JSON ingestion into path-indexed composites

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use std::str::FromStr;

use super::error::{ModelError, ModelResult};
use super::path::PathKey;
use super::system::SystemValue;
use super::types::{FHIR_NAMESPACE, TypeTag};
use super::value::{FhirPathValue, PathMap};

/// Member naming the document type; consumed rather than stored
pub const RESOURCE_TYPE_FIELD: &str = "resourceType";

/// Ingest JSON bytes as a composite tagged `type_tag`
///
/// Returns `Ok(None)` when the top-level JSON value is not an object.
pub fn ingest(json: &[u8], type_tag: impl Into<TypeTag>) -> ModelResult<Option<FhirPathValue>> {
    let document: Value = serde_json::from_slice(json)?;
    from_json_value(&document, type_tag)
}

/// Ingest JSON bytes, deriving the tag `FHIR.<resourceType>` from the document
pub fn ingest_resource(json: &[u8]) -> ModelResult<FhirPathValue> {
    let document: Value = serde_json::from_slice(json)?;
    let resource_type = document
        .get(RESOURCE_TYPE_FIELD)
        .and_then(Value::as_str)
        .filter(|rt| !rt.is_empty())
        .ok_or(ModelError::MissingResourceType)?;
    let tag = TypeTag::new(format!("{FHIR_NAMESPACE}.{resource_type}"));

    from_json_value(&document, tag)?.ok_or(ModelError::MissingResourceType)
}

/// Ingest an already parsed JSON value
pub fn from_json_value(
    document: &Value,
    type_tag: impl Into<TypeTag>,
) -> ModelResult<Option<FhirPathValue>> {
    let Value::Object(members) = document else {
        return Ok(None);
    };

    let type_tag = type_tag.into();
    let mut entries = PathMap::new();
    for (name, member) in members {
        if name == RESOURCE_TYPE_FIELD {
            continue;
        }
        collect_value(&mut entries, PathKey::root().field(name.as_str()), member)?;
    }

    log::debug!("ingested {} primitives as {}", entries.len(), type_tag);
    Ok(Some(FhirPathValue::composite(type_tag, entries)))
}

fn collect_object(entries: &mut PathMap, prefix: &PathKey, members: &Map<String, Value>) -> ModelResult<()> {
    for (name, member) in members {
        collect_value(entries, prefix.field(name.as_str()), member)?;
    }
    Ok(())
}

fn collect_value(entries: &mut PathMap, key: PathKey, value: &Value) -> ModelResult<()> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            entries.insert(key, SystemValue::Boolean(*b));
        }
        Value::String(s) => {
            entries.insert(key, SystemValue::String(s.clone()));
        }
        Value::Number(n) => {
            let number = decode_number(n, &key)?;
            entries.insert(key, number);
        }
        Value::Object(members) => collect_object(entries, &key, members)?,
        Value::Array(items) => {
            // Elements that contribute nothing (null, {}, []) do not take an
            // index, so a family always runs 0..n without gaps.
            let mut next = 0;
            for item in items {
                let before = entries.len();
                collect_value(entries, key.index(next), item)?;
                if entries.len() > before {
                    next += 1;
                }
            }
        }
    }
    Ok(())
}

/// Integral literals in i64 range become Integer; fractions, exponents and
/// wider integers become an exact Decimal parsed from the JSON text.
fn decode_number(number: &Number, key: &PathKey) -> ModelResult<SystemValue> {
    if let Some(integer) = number.as_i64() {
        return Ok(SystemValue::Integer(integer));
    }

    let literal = number.to_string();
    let decimal = if literal.contains(['e', 'E']) {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str(&literal)
    };

    decimal.map(SystemValue::Decimal).map_err(|_| {
        log::warn!("unsupported number {literal} at {key}");
        ModelError::UnsupportedNumber {
            path: key.to_string(),
            literal,
        }
    })
}
