//! Abstract Syntax Tree (AST) definitions for FHIRPath expressions
//!
//! Nodes are immutable once built; the parser is the usual producer, and the
//! evaluator walks them through [`Visitor`].

mod expression;
mod visitor;

pub use expression::*;
pub use visitor::*;
