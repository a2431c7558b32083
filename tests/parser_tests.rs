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

//! Parser integration tests: tree shapes, determinism and error reporting

use octofhir_fhirpath_lite::parser::{ParseError, parse, parse_bytes};
use octofhir_fhirpath_lite::{Atom, AtomKind, LexError};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn id(name: &str) -> Atom {
    Atom::identifier(name)
}

#[rstest]
#[case("Patient.name.given")]
#[case("'Willer'.replace('er', 'iams')")]
#[case("a, (b, c).d")]
#[case("f(g(h()), i.j)")]
#[case("  true ,  42.5 ")]
fn test_parse_is_deterministic(#[case] expression: &str) {
    let first = parse(expression).unwrap();
    let second = parse(expression).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, first.clone());
}

#[test]
fn test_member_chain_shape() {
    let expected = Atom::invocation(
        Atom::invocation(id("Patient"), id("name")),
        id("given"),
    );
    assert_eq!(parse("Patient.name.given").unwrap(), expected);
}

#[test]
fn test_function_call_shape() {
    let expected = Atom::invocation(
        Atom::string("Willer"),
        Atom::function(
            id("replace"),
            Atom::param_list(Some(Atom::union(Atom::string("er"), Atom::string("iams")))),
        ),
    );
    assert_eq!(parse("'Willer'.replace('er', 'iams')").unwrap(), expected);
    assert_eq!(
        parse("count()").unwrap(),
        Atom::function(id("count"), Atom::param_list(None))
    );
}

#[test]
fn test_union_grouping() {
    assert_eq!(
        parse("(x, y), z").unwrap(),
        Atom::union(Atom::union(id("x"), id("y")), id("z"))
    );
    assert_eq!(
        parse("x, (y, z)").unwrap(),
        Atom::union(id("x"), Atom::union(id("y"), id("z")))
    );
}

#[test]
fn test_literal_kinds() {
    let kinds: Vec<AtomKind> = ["true", "'s'", "1.5", "name"]
        .iter()
        .map(|e| parse(e).unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            AtomKind::Boolean,
            AtomKind::String,
            AtomKind::Number,
            AtomKind::Identifier
        ]
    );
}

#[rstest]
#[case("Patient.name.given")]
#[case("'it\\'s'.length()")]
#[case("f(a, b)")]
#[case("x, (y, z)")]
#[case("a.(b.c)")]
#[case("a.b, c")]
#[case("(a.b), c")]
#[case("a, (f())")]
#[case("f((a.b), (c.d))")]
fn test_display_reparses(#[case] expression: &str) {
    let atom = parse(expression).unwrap();
    assert_eq!(parse(&atom.to_string()).unwrap(), atom);
}

#[rstest]
#[case("", 0)]
#[case("a.", 2)]
#[case("a..b", 2)]
#[case("a,", 2)]
#[case("f(", 2)]
#[case("a b", 2)]
#[case(")", 0)]
fn test_error_positions(#[case] expression: &str, #[case] position: usize) {
    let err = parse(expression).unwrap_err();
    assert_eq!(err.position(), position, "{err}");
}

#[test]
fn test_lex_errors() {
    assert!(matches!(
        parse("'abc").unwrap_err(),
        ParseError::Lex(LexError::UnterminatedString { position: 0 })
    ));
    assert!(matches!(
        parse("a $ b").unwrap_err().root_cause(),
        ParseError::Lex(LexError::UnexpectedCharacter { character: '$', position: 2 })
    ));
    assert!(matches!(
        parse_bytes(b"a.\xffb").unwrap_err(),
        ParseError::Lex(LexError::UnexpectedCharacter { position: 2, .. })
    ));
}

#[test]
fn test_rule_names_are_kept() {
    let err = parse("a.b(c,)").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("error parsing invocation"), "{message}");
    assert!(message.contains("function invocation"), "{message}");

    assert!(parse("()").unwrap_err().to_string().contains("group"));
    assert!(matches!(
        parse("'a'(1)").unwrap_err(),
        ParseError::InvalidCallee { .. }
    ));
}
