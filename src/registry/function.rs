//! Function registry and the builtin function contract

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use crate::ast::Atom;
use crate::evaluator::{EvaluationError, EvaluationResult, Evaluator};
use crate::model::Collection;
use crate::registry::functions;
use crate::registry::signature::FunctionSignature;

/// A builtin function invoked from a function-call node
///
/// Handlers receive the current input and the *unevaluated* argument list;
/// they decide when, and against which context, to evaluate arguments (usually
/// via [`Evaluator::evaluate_arguments`], which uses the calling context).
/// Each handler owns its arity checks and empty-propagation policy.
pub trait FhirPathFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get the function signature
    fn signature(&self) -> &FunctionSignature;

    /// Evaluate the function
    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection>;

    /// Get function documentation
    fn documentation(&self) -> &str {
        ""
    }

    /// Split `params` and check the count against the signature
    fn validate_args<'p>(&self, params: &'p Atom) -> EvaluationResult<Vec<&'p Atom>> {
        let args = Evaluator::arguments(params)?;
        let signature = self.signature();
        if !signature.accepts(args.len()) {
            return Err(EvaluationError::InvalidArity {
                name: self.name().to_string(),
                expected: signature.arity(),
                actual: args.len(),
            });
        }
        Ok(args)
    }
}

/// Signature of a closure-backed function
pub type FunctionHandler = dyn Fn(&mut Evaluator<'_>, &Collection, &Atom) -> EvaluationResult<Collection>
    + Send
    + Sync;

struct ClosureFunction {
    signature: FunctionSignature,
    documentation: String,
    handler: Box<FunctionHandler>,
}

impl FhirPathFunction for ClosureFunction {
    fn name(&self) -> &str {
        &self.signature.name
    }

    fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    fn evaluate(
        &self,
        evaluator: &mut Evaluator<'_>,
        input: &Collection,
        params: &Atom,
    ) -> EvaluationResult<Collection> {
        (self.handler)(evaluator, input, params)
    }

    fn documentation(&self) -> &str {
        &self.documentation
    }
}

/// Open mapping from function name to handler
///
/// A registry is immutable once handed to an evaluation; distinct engines can
/// hold distinct registries.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<dyn FhirPathFunction>>,
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every builtin function
    pub fn standard() -> Self {
        let mut registry = Self::new();
        functions::register_builtin_functions(&mut registry);
        registry
    }

    /// Register a trait-based function, replacing any function of the same name
    pub fn register<F: FhirPathFunction + 'static>(&mut self, function: F) {
        let name = function.name().to_string();
        log::debug!("registering function {name}");
        self.functions.insert(name, Arc::new(function));
    }

    /// Register a closure-based function
    pub fn register_fn<F>(
        &mut self,
        signature: FunctionSignature,
        documentation: impl Into<String>,
        handler: F,
    ) where
        F: Fn(&mut Evaluator<'_>, &Collection, &Atom) -> EvaluationResult<Collection>
            + Send
            + Sync
            + 'static,
    {
        self.register(ClosureFunction {
            signature,
            documentation: documentation.into(),
            handler: Box::new(handler),
        });
    }

    /// Look up a function by exact name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn FhirPathFunction>> {
        self.functions.get(name)
    }

    /// Whether a function of that name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Signature of a registered function
    pub fn signature(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name).map(|f| f.signature())
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no function is registered
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
