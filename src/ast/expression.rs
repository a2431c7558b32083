// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Expression AST node definitions

use std::fmt;

/// AST representation of FHIRPath expressions
///
/// Leaves keep the raw literal token exactly as scanned (string literals
/// without their quotes, escapes untouched). Inner nodes own their children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    /// `true` / `false`
    Boolean(String),

    /// Single-quoted string literal
    String(String),

    /// Numeric literal such as `42` or `1.5`
    Number(String),

    /// Member name
    Identifier(String),

    /// `left.right`: `right` is evaluated against the result of `left`
    InvocationExpression {
        /// Receiver expression
        left: Box<Atom>,
        /// Expression evaluated against the receiver's result
        right: Box<Atom>,
    },

    /// `callee(args)`
    Function {
        /// Function name, always an [`Atom::Identifier`]
        callee: Box<Atom>,
        /// Unevaluated arguments, always an [`Atom::ParamList`]
        args: Box<Atom>,
    },

    /// Parenthesised argument list, empty for `()`
    ParamList(Option<Box<Atom>>),

    /// `left, right`
    Union {
        /// Left operand
        left: Box<Atom>,
        /// Right operand
        right: Box<Atom>,
    },
}

/// Node kind of an [`Atom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// Boolean literal
    Boolean,
    /// String literal
    String,
    /// Number literal
    Number,
    /// Identifier
    Identifier,
    /// Member invocation
    InvocationExpression,
    /// Function call
    Function,
    /// Argument list
    ParamList,
    /// Union
    Union,
}

impl AtomKind {
    /// Name of the kind
    pub const fn name(self) -> &'static str {
        match self {
            AtomKind::Boolean => "Boolean",
            AtomKind::String => "String",
            AtomKind::Number => "Number",
            AtomKind::Identifier => "Identifier",
            AtomKind::InvocationExpression => "InvocationExpression",
            AtomKind::Function => "Function",
            AtomKind::ParamList => "ParamList",
            AtomKind::Union => "Union",
        }
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Atom {
    /// Create a boolean literal
    pub fn boolean(token: impl Into<String>) -> Self {
        Self::Boolean(token.into())
    }

    /// Create a string literal from its unquoted token
    pub fn string(token: impl Into<String>) -> Self {
        Self::String(token.into())
    }

    /// Create a number literal
    pub fn number(token: impl Into<String>) -> Self {
        Self::Number(token.into())
    }

    /// Create an identifier
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a member invocation
    pub fn invocation(left: Atom, right: Atom) -> Self {
        Self::InvocationExpression {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a function call
    pub fn function(callee: Atom, args: Atom) -> Self {
        Self::Function {
            callee: Box::new(callee),
            args: Box::new(args),
        }
    }

    /// Create an argument list
    pub fn param_list(args: Option<Atom>) -> Self {
        Self::ParamList(args.map(Box::new))
    }

    /// Create a union
    pub fn union(left: Atom, right: Atom) -> Self {
        Self::Union {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Kind tag of this node
    pub fn kind(&self) -> AtomKind {
        match self {
            Atom::Boolean(_) => AtomKind::Boolean,
            Atom::String(_) => AtomKind::String,
            Atom::Number(_) => AtomKind::Number,
            Atom::Identifier(_) => AtomKind::Identifier,
            Atom::InvocationExpression { .. } => AtomKind::InvocationExpression,
            Atom::Function { .. } => AtomKind::Function,
            Atom::ParamList(_) => AtomKind::ParamList,
            Atom::Union { .. } => AtomKind::Union,
        }
    }

    /// Raw token of a leaf, or the punctuation that produced an inner node
    pub fn token(&self) -> &str {
        match self {
            Atom::Boolean(token)
            | Atom::String(token)
            | Atom::Number(token)
            | Atom::Identifier(token) => token,
            Atom::InvocationExpression { .. } => ".",
            Atom::Function { .. } => "(",
            Atom::ParamList(_) => ")",
            Atom::Union { .. } => ",",
        }
    }

    /// Whether this node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Atom::Boolean(_) | Atom::String(_) | Atom::Number(_) | Atom::Identifier(_)
        )
    }

    /// Identifier name, if this is an identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Atom::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Number of nodes in this tree
    pub fn node_count(&self) -> usize {
        match self {
            Atom::Boolean(_) | Atom::String(_) | Atom::Number(_) | Atom::Identifier(_) => 1,
            Atom::InvocationExpression { left, right } | Atom::Union { left, right } => {
                1 + left.node_count() + right.node_count()
            }
            Atom::Function { callee, args } => 1 + callee.node_count() + args.node_count(),
            Atom::ParamList(args) => 1 + args.as_ref().map_or(0, |a| a.node_count()),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Boolean(token) | Atom::Number(token) | Atom::Identifier(token) => {
                f.write_str(token)
            }
            Atom::String(token) => write!(f, "'{token}'"),
            Atom::InvocationExpression { left, right } => {
                write!(f, "{left}.")?;
                write_operand(f, right, right.kind() == AtomKind::InvocationExpression)
            }
            Atom::Function { callee, args } => match args.as_ref() {
                Atom::ParamList(_) => write!(f, "{callee}{args}"),
                other => write!(f, "{callee}({other})"),
            },
            Atom::ParamList(None) => f.write_str("()"),
            Atom::ParamList(Some(args)) => write!(f, "({args})"),
            Atom::Union { left, right } => {
                write_operand(f, left, left.kind() == AtomKind::InvocationExpression)?;
                f.write_str(", ")?;
                write_operand(f, right, !right.is_leaf())
            }
        }
    }
}

// `,` binds tighter than `.` and `(`, so operands it would capture are grouped
fn write_operand(f: &mut fmt::Formatter<'_>, atom: &Atom, grouped: bool) -> fmt::Result {
    if grouped {
        write!(f, "({atom})")
    } else {
        write!(f, "{atom}")
    }
}
