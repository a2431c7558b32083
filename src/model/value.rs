//! Document nodes and collections
//!
//! A [`FhirPathValue`] is either a primitive leaf wrapping one [`SystemValue`]
//! or a composite backed by a path-indexed map of primitives. Nested objects
//! and arrays are not stored as nodes; they are reconstructed on demand by
//! [`FhirPathValue::get`] from the keys sharing a prefix.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

use super::error::{ModelError, ModelResult};
use super::path::{PathKey, PathSegment};
use super::system::SystemValue;
use super::types::{SystemType, TypeTag};

/// Ordered, prefix-queryable storage of a composite's primitives
pub type PathMap = BTreeMap<PathKey, SystemValue>;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Primitive(SystemValue),
    Composite(Arc<PathMap>),
}

/// A typed document node
#[derive(Debug, Clone, PartialEq)]
pub struct FhirPathValue {
    type_tag: TypeTag,
    node: Node,
}

impl FhirPathValue {
    /// Primitive leaf tagged with the FHIR wrapper of its scalar type (`FHIR.string`, ...)
    pub fn primitive(value: SystemValue) -> Self {
        Self {
            type_tag: TypeTag::fhir_primitive(value.system_type()),
            node: Node::Primitive(value),
        }
    }

    /// Raw system scalar tagged with its `System.*` type
    pub fn system(value: SystemValue) -> Self {
        Self {
            type_tag: TypeTag::system(value.system_type()),
            node: Node::Primitive(value),
        }
    }

    /// Primitive leaf with an explicit tag
    pub fn primitive_with_type(type_tag: TypeTag, value: SystemValue) -> Self {
        Self {
            type_tag,
            node: Node::Primitive(value),
        }
    }

    /// Composite node over a path-indexed map
    pub fn composite(type_tag: TypeTag, entries: PathMap) -> Self {
        Self {
            type_tag,
            node: Node::Composite(Arc::new(entries)),
        }
    }

    /// Declared type tag
    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    /// The wrapped scalar of a primitive node
    pub fn primitive_value(&self) -> Option<&SystemValue> {
        match &self.node {
            Node::Primitive(value) => Some(value),
            Node::Composite(_) => None,
        }
    }

    /// Whether this node is a primitive leaf
    pub fn is_primitive(&self) -> bool {
        matches!(self.node, Node::Primitive(_))
    }

    /// Whether this node is a composite
    pub fn is_composite(&self) -> bool {
        matches!(self.node, Node::Composite(_))
    }

    /// Stored primitives of a composite node
    pub fn entries(&self) -> Option<&PathMap> {
        match &self.node {
            Node::Composite(data) => Some(data),
            Node::Primitive(_) => None,
        }
    }

    /// Resolve a property by its textual path key (`name[0].family`)
    ///
    /// Keys that do not parse resolve to nothing.
    pub fn get(&self, key: &str) -> Collection {
        match key.parse::<PathKey>() {
            Ok(path) => self.get_path(&path),
            Err(err) => {
                log::debug!("unresolvable property key: {err}");
                Collection::new()
            }
        }
    }

    /// Resolve a property, in strict precedence order:
    ///
    /// 1. an exact key stored on this composite yields that primitive;
    /// 2. `value` on a non-system primitive yields its raw scalar;
    /// 3. the indexed family `key[0]`, `key[1]`, ... up to the first gap;
    /// 4. every key strictly under `key.` as one reconstructed composite.
    pub fn get_path(&self, key: &PathKey) -> Collection {
        let data = match &self.node {
            Node::Composite(data) => data,
            Node::Primitive(value) => {
                return if is_value_accessor(key) && !self.type_tag.is_system() {
                    Collection::from(vec![FhirPathValue::system(value.clone())])
                } else {
                    Collection::new()
                };
            }
        };

        if let Some(value) = data.get(key) {
            return Collection::from(vec![FhirPathValue::primitive(value.clone())]);
        }

        let mut family = Vec::new();
        for index in 0.. {
            let element = key.index(index);
            if let Some(value) = data.get(&element) {
                family.push(FhirPathValue::primitive(value.clone()));
            } else if let Some(sub) = reconstruct(data, &element) {
                family.push(sub);
            } else {
                break;
            }
        }
        if !family.is_empty() {
            return Collection::from(family);
        }

        reconstruct(data, key)
            .map(|sub| Collection::from(vec![sub]))
            .unwrap_or_default()
    }
}

fn is_value_accessor(key: &PathKey) -> bool {
    matches!(key.segments(), [PathSegment::Field(name)] if name == "value")
}

/// Collect every key strictly under `prefix` into a fresh composite
fn reconstruct(data: &PathMap, prefix: &PathKey) -> Option<FhirPathValue> {
    let entries: PathMap = data
        .range::<PathKey, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(|(key, _)| key.starts_with(prefix))
        .filter_map(|(key, value)| key.strip_prefix(prefix).map(|rest| (rest, value.clone())))
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(FhirPathValue::composite(TypeTag::unresolved(), entries))
    }
}

impl fmt::Display for FhirPathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Primitive(value) => write!(f, "{value}"),
            Node::Composite(data) => {
                writeln!(f, "[{}]: {{", self.type_tag)?;
                for (key, value) in data.iter() {
                    writeln!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Ordered sequence of values, the result shape of every evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection(Vec<FhirPathValue>);

impl Collection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a collection holding a single value
    pub fn single(value: FhirPathValue) -> Self {
        Self(vec![value])
    }

    /// Create a collection from a vector
    pub fn from_vec(values: Vec<FhirPathValue>) -> Self {
        Self(values)
    }

    /// Get the length of the collection
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an iterator over the values
    pub fn iter(&self) -> std::slice::Iter<'_, FhirPathValue> {
        self.0.iter()
    }

    /// Push a value to the collection
    pub fn push(&mut self, value: FhirPathValue) {
        self.0.push(value);
    }

    /// Extend the collection with another, keeping duplicates
    pub fn extend(&mut self, other: Collection) {
        self.0.extend(other.0);
    }

    /// Get the first value
    pub fn first(&self) -> Option<&FhirPathValue> {
        self.0.first()
    }

    /// Get the last value
    pub fn last(&self) -> Option<&FhirPathValue> {
        self.0.last()
    }

    /// Get an element by index
    pub fn get(&self, index: usize) -> Option<&FhirPathValue> {
        self.0.get(index)
    }

    /// Borrow the items as a slice
    pub fn as_slice(&self) -> &[FhirPathValue] {
        &self.0
    }

    /// Take ownership of the inner vector
    pub fn into_vec(self) -> Vec<FhirPathValue> {
        self.0
    }

    /// Coerce to one system scalar of type `of_type`
    ///
    /// Zero items is "no value" rather than an error. More than one item is a
    /// cardinality error. The single item must be a primitive tagged in the
    /// `System` namespace whose scalar has the requested type (`System.Any`
    /// accepts every scalar); anything else is a type error.
    pub fn singleton(&self, of_type: SystemType) -> ModelResult<Option<&SystemValue>> {
        let item = match self.0.as_slice() {
            [] => return Ok(None),
            [item] => item,
            items => {
                return Err(ModelError::Cardinality {
                    expected: of_type.to_string(),
                    actual: items.len(),
                });
            }
        };

        let Some(value) = item.primitive_value() else {
            return Err(ModelError::Type {
                expected: of_type.to_string(),
                actual: format!("complex value ({})", item.type_tag()),
            });
        };
        if !item.type_tag().is_system() {
            return Err(ModelError::Type {
                expected: of_type.to_string(),
                actual: item.type_tag().to_string(),
            });
        }
        if of_type != SystemType::Any && value.system_type() != of_type {
            return Err(ModelError::Type {
                expected: of_type.to_string(),
                actual: value.system_type().to_string(),
            });
        }
        Ok(Some(value))
    }
}

impl From<Vec<FhirPathValue>> for Collection {
    fn from(values: Vec<FhirPathValue>) -> Self {
        Self(values)
    }
}

impl FromIterator<FhirPathValue> for Collection {
    fn from_iter<I: IntoIterator<Item = FhirPathValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Collection {
    type Item = FhirPathValue;
    type IntoIter = std::vec::IntoIter<FhirPathValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a FhirPathValue;
    type IntoIter = std::slice::Iter<'a, FhirPathValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, SystemValue)]) -> PathMap {
        pairs
            .iter()
            .map(|(k, v)| (k.parse().unwrap(), v.clone()))
            .collect()
    }

    fn patient() -> FhirPathValue {
        FhirPathValue::composite(
            TypeTag::new("FHIR.Patient"),
            entries(&[
                ("active", SystemValue::Boolean(true)),
                ("name[0].family", "Chalmers".into()),
                ("name[0].given[0]", "Peter".into()),
                ("name[0].given[1]", "James".into()),
                ("name[1].family", "Windsor".into()),
                ("contact.gender", "female".into()),
            ]),
        )
    }

    #[test]
    fn test_exact_key_hit() {
        let result = patient().get("name[0].family");
        assert_eq!(result.len(), 1);
        let item = result.first().unwrap();
        assert_eq!(item.type_tag().as_str(), "FHIR.string");
        assert_eq!(item.primitive_value(), Some(&SystemValue::from("Chalmers")));
    }

    #[test]
    fn test_indexed_family() {
        let names = patient().get("name");
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(FhirPathValue::is_composite));
        assert_eq!(names.get(1).unwrap().get("family").len(), 1);

        let given = names.first().unwrap().get("given");
        let rendered: Vec<String> = given.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["'Peter'", "'James'"]);
    }

    #[test]
    fn test_nested_object() {
        let contact = patient().get("contact");
        assert_eq!(contact.len(), 1);
        let contact = contact.first().unwrap();
        assert_eq!(contact.type_tag().as_str(), TypeTag::UNRESOLVED);
        assert_eq!(contact.get("gender").len(), 1);
    }

    #[test]
    fn test_missing_property() {
        assert!(patient().get("birthDate").is_empty());
        assert!(patient().get("name[").is_empty());
    }

    #[test]
    fn test_value_bridge() {
        let wrapped = FhirPathValue::primitive(SystemValue::from("abc"));
        let raw = wrapped.get("value");
        assert_eq!(raw.len(), 1);
        assert_eq!(raw.first().unwrap().type_tag().as_str(), "System.String");

        let system = FhirPathValue::system(SystemValue::from("abc"));
        assert!(system.get("value").is_empty());
        assert!(wrapped.get("id").is_empty());
    }

    #[test]
    fn test_singleton_rules() {
        assert_eq!(Collection::new().singleton(SystemType::String).unwrap(), None);

        let one = Collection::single(FhirPathValue::system("x".into()));
        assert_eq!(
            one.singleton(SystemType::String).unwrap(),
            Some(&SystemValue::from("x"))
        );
        assert!(one.singleton(SystemType::Any).unwrap().is_some());
        assert!(matches!(
            one.singleton(SystemType::Integer),
            Err(ModelError::Type { .. })
        ));

        let two: Collection = vec![
            FhirPathValue::system("a".into()),
            FhirPathValue::system("b".into()),
        ]
        .into();
        assert!(matches!(
            two.singleton(SystemType::String),
            Err(ModelError::Cardinality { actual: 2, .. })
        ));

        let complex = Collection::single(patient());
        assert!(matches!(
            complex.singleton(SystemType::String),
            Err(ModelError::Type { .. })
        ));

        let wrapped = Collection::single(FhirPathValue::primitive("x".into()));
        assert!(matches!(
            wrapped.singleton(SystemType::String),
            Err(ModelError::Type { .. })
        ));
    }

    #[test]
    fn test_composite_display() {
        let value = FhirPathValue::composite(
            TypeTag::new("FHIR.Patient"),
            entries(&[("gender", "male".into())]),
        );
        assert_eq!(value.to_string(), "[FHIR.Patient]: {\ngender: 'male'\n}");
    }
}
