//! FHIRPath engine - the main entry point for FHIRPath evaluation
//!
//! The engine owns the services an evaluation needs (function registry,
//! conversion tables, unit converter) and a cache of compiled expressions.
//! All methods take `&self`, so one engine can serve many threads.

use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::ast::Atom;
use crate::error::Result;
use crate::evaluator::{EngineConfig, Evaluator};
use crate::model::{
    Collection, FHIR_NAMESPACE, FhirPathValue, IdentityUnitConverter, TypeConverter, TypeTag,
    UnitConverter, from_json_value, json::RESOURCE_TYPE_FIELD,
};
use crate::parser::parse;
use crate::registry::FunctionRegistry;

/// Main FHIRPath engine for parsing and evaluating expressions
pub struct FhirPathEngine {
    registry: Arc<FunctionRegistry>,
    converter: Arc<TypeConverter>,
    units: Arc<dyn UnitConverter>,
    config: EngineConfig,
    cache: Option<Mutex<LruCache<String, Arc<Atom>>>>,
}

impl Default for FhirPathEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FhirPathEngine {
    /// Create an engine with the standard builtins and default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the standard builtins and `config`
    pub fn with_config(config: EngineConfig) -> Self {
        for warning in config.validate() {
            log::warn!("engine config: {warning}");
        }

        let cache = if config.cache_enabled() {
            NonZeroUsize::new(config.max_cache_size).map(|size| Mutex::new(LruCache::new(size)))
        } else {
            None
        };

        Self {
            registry: Arc::new(FunctionRegistry::standard()),
            converter: Arc::new(TypeConverter::default()),
            units: Arc::new(IdentityUnitConverter),
            config,
            cache,
        }
    }

    /// Replace the function registry
    pub fn with_registry(mut self, registry: impl Into<Arc<FunctionRegistry>>) -> Self {
        self.registry = registry.into();
        self
    }

    /// Replace the conversion tables
    pub fn with_type_converter(mut self, converter: impl Into<Arc<TypeConverter>>) -> Self {
        self.converter = converter.into();
        self
    }

    /// Replace the unit conversion service
    pub fn with_unit_converter(mut self, units: Arc<dyn UnitConverter>) -> Self {
        self.units = units;
        self
    }

    /// The function registry used by evaluations
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of cached compiled expressions
    pub fn cached_expressions(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }

    /// Drop every cached compiled expression
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    /// Parse `expression`, reusing a cached AST when one exists
    pub fn compile(&self, expression: &str) -> Result<Arc<Atom>> {
        let Some(cache) = &self.cache else {
            return Ok(Arc::new(parse(expression)?));
        };

        if let Some(atom) = cache.lock().get(expression) {
            log::debug!("compile cache hit for '{expression}'");
            return Ok(Arc::clone(atom));
        }

        // Parsed outside the lock
        let atom = Arc::new(parse(expression)?);
        log::debug!("compiled '{expression}' into {} nodes", atom.node_count());
        cache.lock().put(expression.to_string(), Arc::clone(&atom));
        Ok(atom)
    }

    /// Compile and evaluate `expression` against an optional input value
    pub fn evaluate(&self, expression: &str, input: Option<&FhirPathValue>) -> Result<Collection> {
        let atom = self.compile(expression)?;
        self.evaluate_ast(&atom, input)
    }

    /// Evaluate an already compiled expression
    pub fn evaluate_ast(&self, atom: &Atom, input: Option<&FhirPathValue>) -> Result<Collection> {
        let context = input.cloned().map(Collection::single).unwrap_or_default();
        let result = Evaluator::new(&self.registry)
            .with_converter(&self.converter)
            .with_unit_converter(self.units.as_ref())
            .with_max_depth(self.config.max_recursion_depth)
            .evaluate(atom, context)?;
        Ok(result)
    }

    /// Ingest a JSON document and evaluate `expression` against it
    ///
    /// The document is tagged `FHIR.<resourceType>` when it names one. A
    /// top-level value that is not an object evaluates against empty input.
    pub fn evaluate_json(&self, expression: &str, json: &[u8]) -> Result<Collection> {
        let atom = self.compile(expression)?;
        let document: Value = serde_json::from_slice(json).map_err(crate::model::ModelError::from)?;

        let tag = document
            .get(RESOURCE_TYPE_FIELD)
            .and_then(Value::as_str)
            .filter(|rt| !rt.is_empty())
            .map_or_else(TypeTag::unresolved, |rt| {
                TypeTag::new(format!("{FHIR_NAMESPACE}.{rt}"))
            });
        let input = from_json_value(&document, tag)?;
        self.evaluate_ast(&atom, input.as_ref())
    }
}
