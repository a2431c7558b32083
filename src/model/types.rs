//! Type tags for system scalars and namespaced document nodes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Namespace of the primitive scalar types
pub const SYSTEM_NAMESPACE: &str = "System";

/// Namespace of FHIR element and resource types
pub const FHIR_NAMESPACE: &str = "FHIR";

/// Closed set of FHIRPath system types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SystemType {
    /// System.Boolean
    Boolean,
    /// System.String
    String,
    /// System.Integer
    Integer,
    /// System.Decimal
    Decimal,
    /// System.Quantity
    Quantity,
    /// System.Date
    Date,
    /// System.DateTime
    DateTime,
    /// System.Time
    Time,
    /// System.Any, only ever used as a type tag
    Any,
}

impl SystemType {
    /// Unqualified type name
    pub const fn name(self) -> &'static str {
        match self {
            SystemType::Boolean => "Boolean",
            SystemType::String => "String",
            SystemType::Integer => "Integer",
            SystemType::Decimal => "Decimal",
            SystemType::Quantity => "Quantity",
            SystemType::Date => "Date",
            SystemType::DateTime => "DateTime",
            SystemType::Time => "Time",
            SystemType::Any => "Any",
        }
    }

    /// Fully qualified name, e.g. `System.String`
    pub const fn qualified_name(self) -> &'static str {
        match self {
            SystemType::Boolean => "System.Boolean",
            SystemType::String => "System.String",
            SystemType::Integer => "System.Integer",
            SystemType::Decimal => "System.Decimal",
            SystemType::Quantity => "System.Quantity",
            SystemType::Date => "System.Date",
            SystemType::DateTime => "System.DateTime",
            SystemType::Time => "System.Time",
            SystemType::Any => "System.Any",
        }
    }

    /// Name of the FHIR primitive that wraps values of this type
    pub const fn fhir_wrapper_name(self) -> Option<&'static str> {
        match self {
            SystemType::Boolean => Some("FHIR.boolean"),
            SystemType::String => Some("FHIR.string"),
            SystemType::Integer => Some("FHIR.integer"),
            SystemType::Decimal => Some("FHIR.decimal"),
            SystemType::Quantity => Some("FHIR.Quantity"),
            SystemType::Date => Some("FHIR.date"),
            SystemType::DateTime => Some("FHIR.dateTime"),
            SystemType::Time => Some("FHIR.time"),
            SystemType::Any => None,
        }
    }

    /// Look up a system type by its qualified or unqualified name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("System.").unwrap_or(name);
        match name {
            "Boolean" => Some(SystemType::Boolean),
            "String" => Some(SystemType::String),
            "Integer" => Some(SystemType::Integer),
            "Decimal" => Some(SystemType::Decimal),
            "Quantity" => Some(SystemType::Quantity),
            "Date" => Some(SystemType::Date),
            "DateTime" => Some(SystemType::DateTime),
            "Time" => Some(SystemType::Time),
            "Any" => Some(SystemType::Any),
            _ => None,
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

/// Namespaced type tag carried by every document node (`FHIR.Patient`, `FHIR.string`, ...)
///
/// Tags are shared between the many nodes a single ingestion produces, so the
/// text lives behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(Arc<str>);

impl TypeTag {
    /// Tag assigned to sub-documents reconstructed without schema information
    pub const UNRESOLVED: &'static str = "FHIR.Element";

    /// Create a tag from its qualified text
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(Arc::from(tag.as_ref()))
    }

    /// Tag of a raw system scalar
    pub fn system(ty: SystemType) -> Self {
        Self::new(ty.qualified_name())
    }

    /// Tag of the FHIR primitive wrapping a scalar of `ty`
    pub fn fhir_primitive(ty: SystemType) -> Self {
        match ty.fhir_wrapper_name() {
            Some(name) => Self::new(name),
            None => Self::system(ty),
        }
    }

    /// Placeholder tag for reconstructed sub-documents
    pub fn unresolved() -> Self {
        Self::new(Self::UNRESOLVED)
    }

    /// Full tag text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace part, if the tag is qualified
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once('.').map(|(ns, _)| ns)
    }

    /// Unqualified type name
    pub fn name(&self) -> &str {
        self.0.split_once('.').map_or(&self.0, |(_, name)| name)
    }

    /// Whether the tag sits in the `System` namespace
    pub fn is_system(&self) -> bool {
        self.namespace() == Some(SYSTEM_NAMESPACE)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<SystemType> for TypeTag {
    fn from(ty: SystemType) -> Self {
        Self::system(ty)
    }
}
