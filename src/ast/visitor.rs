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

//! Visitor pattern for AST traversal

use super::expression::Atom;

/// Trait for visiting AST nodes
pub trait Visitor: Sized {
    /// The result type of visiting a node
    type Result;

    /// Visit any node
    fn visit_atom(&mut self, atom: &Atom) -> Self::Result {
        walk_atom(self, atom)
    }

    /// Visit a boolean literal
    fn visit_boolean(&mut self, token: &str) -> Self::Result;

    /// Visit a string literal
    fn visit_string(&mut self, token: &str) -> Self::Result;

    /// Visit a number literal
    fn visit_number(&mut self, token: &str) -> Self::Result;

    /// Visit an identifier
    fn visit_identifier(&mut self, name: &str) -> Self::Result;

    /// Visit a member invocation
    fn visit_invocation(&mut self, left: &Atom, right: &Atom) -> Self::Result;

    /// Visit a function call
    fn visit_function(&mut self, callee: &Atom, args: &Atom) -> Self::Result;

    /// Visit an argument list outside of a function call
    fn visit_param_list(&mut self, args: Option<&Atom>) -> Self::Result;

    /// Visit a union
    fn visit_union(&mut self, left: &Atom, right: &Atom) -> Self::Result;
}

/// Dispatch `atom` to the matching visitor method
pub fn walk_atom<V: Visitor>(visitor: &mut V, atom: &Atom) -> V::Result {
    match atom {
        Atom::Boolean(token) => visitor.visit_boolean(token),
        Atom::String(token) => visitor.visit_string(token),
        Atom::Number(token) => visitor.visit_number(token),
        Atom::Identifier(name) => visitor.visit_identifier(name),
        Atom::InvocationExpression { left, right } => visitor.visit_invocation(left, right),
        Atom::Function { callee, args } => visitor.visit_function(callee, args),
        Atom::ParamList(args) => visitor.visit_param_list(args.as_deref()),
        Atom::Union { left, right } => visitor.visit_union(left, right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects identifier names in visiting order
    struct Identifiers(Vec<String>);

    impl Visitor for Identifiers {
        type Result = ();

        fn visit_boolean(&mut self, _token: &str) {}
        fn visit_string(&mut self, _token: &str) {}
        fn visit_number(&mut self, _token: &str) {}

        fn visit_identifier(&mut self, name: &str) {
            self.0.push(name.to_string());
        }

        fn visit_invocation(&mut self, left: &Atom, right: &Atom) {
            self.visit_atom(left);
            self.visit_atom(right);
        }

        fn visit_function(&mut self, callee: &Atom, args: &Atom) {
            self.visit_atom(callee);
            self.visit_atom(args);
        }

        fn visit_param_list(&mut self, args: Option<&Atom>) {
            if let Some(args) = args {
                self.visit_atom(args);
            }
        }

        fn visit_union(&mut self, left: &Atom, right: &Atom) {
            self.visit_atom(left);
            self.visit_atom(right);
        }
    }

    #[test]
    fn test_walk_order() {
        let atom = Atom::invocation(
            Atom::identifier("name"),
            Atom::function(
                Atom::identifier("exists"),
                Atom::param_list(Some(Atom::union(Atom::identifier("a"), Atom::string("b")))),
            ),
        );
        let mut collector = Identifiers(Vec::new());
        collector.visit_atom(&atom);
        assert_eq!(collector.0, vec!["name", "exists", "a"]);
    }
}
