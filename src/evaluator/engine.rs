//! Tree-walking evaluator
//!
//! An [`Evaluator`] runs an [`Atom`] against a context collection. It carries
//! two cursors: the current `input` (what identifiers and functions apply to)
//! and the `calling` context, which is the context the enclosing invocation
//! chain started from. Function arguments are evaluated against the calling
//! context, so `a.f(b)` resolves `b` where `a` was resolved.

use std::mem;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::{EvaluationError, EvaluationResult};
use crate::ast::{Atom, AtomKind, Visitor, walk_atom};
use crate::model::{
    Collection, FhirPathValue, IdentityUnitConverter, SystemValue, TypeConverter, UnitConverter,
    default_converter,
};
use crate::parser::unescape_string;
use crate::registry::FunctionRegistry;

static IDENTITY_UNITS: IdentityUnitConverter = IdentityUnitConverter;

/// Default recursion limit when none is configured
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Evaluation state for one run over one expression
///
/// Services are borrowed; the evaluator itself is cheap to create and is not
/// shared between threads.
pub struct Evaluator<'a> {
    registry: &'a FunctionRegistry,
    converter: &'a TypeConverter,
    units: &'a dyn UnitConverter,
    max_depth: usize,
    depth: usize,
    input: Collection,
    calling: Collection,
    function: Option<String>,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over `registry` with the default conversion tables
    pub fn new(registry: &'a FunctionRegistry) -> Self {
        Self {
            registry,
            converter: default_converter(),
            units: &IDENTITY_UNITS,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
            input: Collection::new(),
            calling: Collection::new(),
            function: None,
        }
    }

    /// Use other conversion tables
    pub fn with_converter(mut self, converter: &'a TypeConverter) -> Self {
        self.converter = converter;
        self
    }

    /// Use another unit conversion service
    pub fn with_unit_converter(mut self, units: &'a dyn UnitConverter) -> Self {
        self.units = units;
        self
    }

    /// Limit the nesting depth of evaluated nodes
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builtin functions available to this run
    pub fn registry(&self) -> &'a FunctionRegistry {
        self.registry
    }

    /// Implicit and explicit conversion tables
    pub fn converter(&self) -> &'a TypeConverter {
        self.converter
    }

    /// Unit conversion service
    pub fn unit_converter(&self) -> &'a dyn UnitConverter {
        self.units
    }

    /// Current input context
    pub fn input(&self) -> &Collection {
        &self.input
    }

    /// Context the enclosing invocation chain started from
    pub fn calling_context(&self) -> &Collection {
        &self.calling
    }

    /// Evaluate `atom` with `context` as both input and calling context
    pub fn evaluate(&mut self, atom: &Atom, context: Collection) -> EvaluationResult<Collection> {
        let saved_input = mem::replace(&mut self.input, context.clone());
        let saved_calling = mem::replace(&mut self.calling, context);
        let result = self.visit_atom(atom);
        self.input = saved_input;
        self.calling = saved_calling;
        result
    }

    /// Split an argument list into its top-level arguments
    ///
    /// Arguments are the left spine of the union inside the list, so
    /// `f(a, b, c)` has three arguments while a parenthesised `(b, c)` in the
    /// last position stays one argument.
    pub fn arguments(params: &Atom) -> EvaluationResult<Vec<&Atom>> {
        let inner = match params {
            Atom::ParamList(None) => return Ok(Vec::new()),
            Atom::ParamList(Some(inner)) => inner.as_ref(),
            other => {
                return Err(EvaluationError::UnexpectedAtom { kind: other.kind() });
            }
        };

        let mut args = Vec::new();
        let mut current = inner;
        while let Atom::Union { left, right } = current {
            args.push(right.as_ref());
            current = left;
        }
        args.push(current);
        args.reverse();
        Ok(args)
    }

    /// Evaluate one argument against the calling context
    pub fn evaluate_argument(&mut self, arg: &Atom) -> EvaluationResult<Collection> {
        let context = self.calling.clone();
        self.evaluate(arg, context).map_err(|e| self.wrap_parameters(e))
    }

    /// Evaluate every argument of `params` against the calling context
    pub fn evaluate_arguments(&mut self, params: &Atom) -> EvaluationResult<Vec<Collection>> {
        Self::arguments(params)?
            .into_iter()
            .map(|arg| self.evaluate_argument(arg))
            .collect()
    }

    fn wrap_parameters(&self, err: EvaluationError) -> EvaluationError {
        match &self.function {
            Some(name) => EvaluationError::in_rule(format!("parameters of {name}"), err),
            None => EvaluationError::in_rule("parameters", err),
        }
    }

    fn singleton(value: SystemValue) -> Collection {
        Collection::single(FhirPathValue::system(value))
    }
}

impl Visitor for Evaluator<'_> {
    type Result = EvaluationResult<Collection>;

    fn visit_atom(&mut self, atom: &Atom) -> Self::Result {
        if self.depth >= self.max_depth {
            return Err(EvaluationError::RecursionLimit {
                limit: self.max_depth,
            });
        }
        log::trace!("visit {} '{}' with {} inputs", atom.kind(), atom.token(), self.input.len());

        self.depth += 1;
        let result = walk_atom(self, atom);
        self.depth -= 1;
        result
    }

    fn visit_boolean(&mut self, token: &str) -> Self::Result {
        match token {
            "true" => Ok(Self::singleton(SystemValue::Boolean(true))),
            "false" => Ok(Self::singleton(SystemValue::Boolean(false))),
            _ => Err(EvaluationError::InvalidLiteral {
                kind: AtomKind::Boolean,
                literal: token.to_string(),
            }),
        }
    }

    fn visit_string(&mut self, token: &str) -> Self::Result {
        Ok(Self::singleton(SystemValue::String(unescape_string(token))))
    }

    /// `42` is an Integer, `4.2` a Decimal
    fn visit_number(&mut self, token: &str) -> Self::Result {
        let invalid = || EvaluationError::InvalidLiteral {
            kind: AtomKind::Number,
            literal: token.to_string(),
        };

        let value = if token.contains('.') {
            SystemValue::Decimal(Decimal::from_str(token).map_err(|_| invalid())?)
        } else {
            SystemValue::Integer(token.parse::<i64>().map_err(|_| invalid())?)
        };
        Ok(Self::singleton(value))
    }

    fn visit_identifier(&mut self, name: &str) -> Self::Result {
        let mut result = Collection::new();
        for item in self.input.iter() {
            let found = item.get(name);
            if found.is_empty() && item.is_composite() && item.type_tag().name() == name {
                result.push(item.clone());
            } else {
                result.extend(found);
            }
        }
        Ok(result)
    }

    fn visit_invocation(&mut self, left: &Atom, right: &Atom) -> Self::Result {
        let receiver = self
            .visit_atom(left)
            .map_err(|e| EvaluationError::in_rule("invocation", e))?;

        let outer = mem::replace(&mut self.input, receiver);
        let saved_calling = mem::replace(&mut self.calling, outer.clone());
        let result = self.visit_atom(right);
        self.input = outer;
        self.calling = saved_calling;

        result.map_err(|e| EvaluationError::in_rule("invocation", e))
    }

    fn visit_function(&mut self, callee: &Atom, args: &Atom) -> Self::Result {
        let Some(name) = callee.as_identifier() else {
            return Err(EvaluationError::UnexpectedAtom {
                kind: callee.kind(),
            });
        };
        let registry = self.registry;
        let function = registry
            .get(name)
            .ok_or_else(|| EvaluationError::FunctionNotFound {
                name: name.to_string(),
            })?;
        log::debug!("calling {name} on {} inputs", self.input.len());

        let input = self.input.clone();
        let saved_function = self.function.replace(name.to_string());
        let result = function.evaluate(self, &input, args);
        self.function = saved_function;
        result
    }

    fn visit_param_list(&mut self, _args: Option<&Atom>) -> Self::Result {
        Err(EvaluationError::UnexpectedAtom {
            kind: AtomKind::ParamList,
        })
    }

    fn visit_union(&mut self, left: &Atom, right: &Atom) -> Self::Result {
        let context = self.input.clone();
        let left_result = self.visit_atom(left);
        self.input = context;
        let right_result = self.visit_atom(right);

        match (left_result, right_result) {
            (Ok(mut items), Ok(more)) => {
                items.extend(more);
                Ok(items)
            }
            (Err(l), Err(r)) => Err(EvaluationError::Union(vec![l, r])),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(EvaluationError::Union(vec![e])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn run(expression: &str, context: Collection) -> EvaluationResult<Collection> {
        let registry = FunctionRegistry::standard();
        let atom = parse(expression).unwrap();
        Evaluator::new(&registry).evaluate(&atom, context)
    }

    #[test]
    fn test_literals() {
        let values = |expr: &str| {
            run(expr, Collection::new())
                .unwrap()
                .first()
                .and_then(FhirPathValue::primitive_value)
                .cloned()
        };
        assert_eq!(values("true"), Some(SystemValue::Boolean(true)));
        assert_eq!(values("42"), Some(SystemValue::Integer(42)));
        assert_eq!(values("4.25"), Some(SystemValue::Decimal(Decimal::new(425, 2))));
        assert_eq!(values(r"'it\'s'"), Some(SystemValue::from("it's")));
    }

    #[test]
    fn test_invalid_number_literal() {
        let err = run("1.2.3", Collection::new()).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::InvalidLiteral {
                kind: AtomKind::Number,
                ..
            }
        ));
        assert!(run("99999999999999999999", Collection::new()).is_err());
    }

    #[test]
    fn test_arguments_follow_left_spine() {
        let atom = parse("f(a, b, (c, d))").unwrap();
        let Atom::Function { args, .. } = atom else {
            panic!("expected a function");
        };
        let split = Evaluator::arguments(&args).unwrap();
        let rendered: Vec<String> = split.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["a", "b", "c, d"]);
        assert!(Evaluator::arguments(&Atom::param_list(None)).unwrap().is_empty());
    }

    #[test]
    fn test_recursion_limit() {
        let registry = FunctionRegistry::standard();
        let atom = parse("a.b.c.d.e").unwrap();
        let err = Evaluator::new(&registry)
            .with_max_depth(3)
            .evaluate(&atom, Collection::new())
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            EvaluationError::RecursionLimit { limit: 3 }
        ));
    }

    #[test]
    fn test_unknown_function() {
        let err = run("'x'.nope()", Collection::new()).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            EvaluationError::FunctionNotFound { name } if name == "nope"
        ));
    }

    #[test]
    fn test_union_aggregates_failures() {
        let err = run("(nope1()), (nope2())", Collection::new()).unwrap_err();
        let EvaluationError::Union(errors) = err else {
            panic!("expected a union error");
        };
        assert_eq!(errors.len(), 2);
    }
}
