//! Table-driven Pratt parser for FHIRPath expressions
//!
//! Every token kind maps to a [`Parselet`]: a binding precedence plus an
//! optional prefix rule and an optional infix rule. The parsing loop itself is
//! generic; all grammar lives in [`parselet`].
//!
//! ### Precedence Levels (lowest to highest):
//! - **Base** (0): entry level
//! - **Invocation** (1): `.`
//! - **Call** (2): `(`
//! - **Close** (3): `)`
//! - **Union** (4): `,`
//!
//! Because `,` binds tightest, `a.b, c` parses as `a.(b, c)` and `a, b.c`
//! parses as `(a, b).c`.

use super::error::{ParseError, ParseResult};
use super::tokenizer::{Token, TokenKind, Tokenizer};
use crate::ast::Atom;

/// Maximum nesting of groups and argument lists
pub const MAX_NESTING_DEPTH: usize = 100;

/// Binding precedence of a token (higher = tighter binding)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Entry level of a full expression
    Base = 0,
    /// Member invocation (`.`)
    Invocation = 1,
    /// Function call (`(`)
    Call = 2,
    /// Argument list close (`)`)
    Close = 3,
    /// Union (`,`)
    Union = 4,
}

impl Precedence {
    /// Raw level
    #[inline(always)]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Rule run when a token starts an expression
pub type PrefixRule = for<'input> fn(&mut PrattParser<'input>, Token<'input>) -> ParseResult<Atom>;

/// Rule run when a token follows an already parsed expression
pub type InfixRule =
    for<'input> fn(&mut PrattParser<'input>, Atom, Token<'input>) -> ParseResult<Atom>;

/// Parsing behaviour bundled with a token kind
#[derive(Clone, Copy)]
pub struct Parselet {
    /// Binding precedence
    pub precedence: Precedence,
    /// Behaviour at the start of an expression
    pub prefix: Option<PrefixRule>,
    /// Behaviour after a left operand
    pub infix: Option<InfixRule>,
}

/// The grammar: one parselet per token kind
pub fn parselet(kind: TokenKind) -> Parselet {
    match kind {
        TokenKind::Dot => Parselet {
            precedence: Precedence::Invocation,
            prefix: None,
            infix: Some(parse_invocation),
        },
        TokenKind::Comma => Parselet {
            precedence: Precedence::Union,
            prefix: None,
            infix: Some(parse_union),
        },
        TokenKind::LeftParen => Parselet {
            precedence: Precedence::Call,
            prefix: Some(parse_group),
            infix: Some(parse_function),
        },
        TokenKind::RightParen => Parselet {
            precedence: Precedence::Close,
            prefix: Some(parse_empty_params),
            infix: Some(parse_params),
        },
        TokenKind::Number | TokenKind::String | TokenKind::Identifier | TokenKind::Boolean => {
            Parselet {
                precedence: Precedence::Base,
                prefix: Some(parse_leaf),
                infix: None,
            }
        }
    }
}

/// Pratt parser over one expression
///
/// Single-owner: a parser borrows its input for the duration of one parse.
pub struct PrattParser<'input> {
    tokenizer: Tokenizer<'input>,
    current: Option<TokenKind>,
    previous: Option<TokenKind>,
    depth: usize,
}

impl<'input> PrattParser<'input> {
    /// Create a parser over `input`
    pub fn new(input: &'input str) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            current: None,
            previous: None,
            depth: 0,
        }
    }

    /// Parse the whole input as one expression
    pub fn parse(mut self) -> ParseResult<Atom> {
        let root = self.parse_expression(Precedence::Base)?;
        match self.tokenizer.next_token()? {
            None => Ok(root),
            Some(token) => Err(unexpected(token)),
        }
    }

    /// Parse one expression whose infix operators bind tighter than `min`
    pub fn parse_expression(&mut self, min: Precedence) -> ParseResult<Atom> {
        let token = self.advance()?.ok_or(ParseError::UnexpectedEof {
            position: self.tokenizer.input_len(),
        })?;
        let prefix = parselet(token.kind).prefix.ok_or_else(|| unexpected(token))?;
        let mut left = prefix(self, token)?;

        while let Some(next) = self.tokenizer.peek()? {
            // A `)` inside parentheses belongs to the enclosing argument list
            if next.kind == TokenKind::RightParen && self.depth > 0 {
                break;
            }
            let rule = parselet(next.kind);
            let Some(infix) = rule.infix else {
                break;
            };
            if rule.precedence <= min {
                break;
            }
            self.advance()?;
            left = infix(self, left, next)?;
        }

        Ok(left)
    }

    fn advance(&mut self) -> ParseResult<Option<Token<'input>>> {
        let token = self.tokenizer.next_token()?;
        self.previous = self.current;
        self.current = token.map(|t| t.kind);
        Ok(token)
    }

    /// Everything between `open` and its matching `)`, as a ParamList
    fn parse_arguments(&mut self, open: Token<'input>) -> ParseResult<Atom> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                position: open.offset,
            });
        }
        self.depth += 1;
        let result = self.parse_arguments_inner(open);
        self.depth -= 1;
        result
    }

    fn parse_arguments_inner(&mut self, open: Token<'input>) -> ParseResult<Atom> {
        let peeked = self.tokenizer.peek()?;
        if let Some(close) = peeked.filter(|t| t.kind == TokenKind::RightParen) {
            self.advance()?;
            return parse_empty_params(self, close);
        }

        let inner = self.parse_expression(Precedence::Base)?;
        match self.advance()? {
            Some(close) if close.kind == TokenKind::RightParen => parse_params(self, inner, close),
            Some(other) => Err(unexpected(other)),
            None => Err(ParseError::UnclosedParen {
                position: open.offset,
            }),
        }
    }
}

fn unexpected(token: Token<'_>) -> ParseError {
    ParseError::UnexpectedToken {
        token: token.to_string(),
        position: token.offset,
    }
}

fn parse_leaf<'input>(_parser: &mut PrattParser<'input>, token: Token<'input>) -> ParseResult<Atom> {
    Ok(match token.kind {
        TokenKind::Boolean => Atom::boolean(token.text),
        TokenKind::String => Atom::string(token.text),
        TokenKind::Number => Atom::number(token.text),
        TokenKind::Identifier => Atom::identifier(token.text),
        _ => return Err(unexpected(token)),
    })
}

fn parse_invocation<'input>(
    parser: &mut PrattParser<'input>,
    left: Atom,
    _token: Token<'input>,
) -> ParseResult<Atom> {
    let right = parser
        .parse_expression(Precedence::Invocation)
        .map_err(|e| ParseError::in_rule("invocation", e))?;
    Ok(Atom::invocation(left, right))
}

fn parse_union<'input>(
    parser: &mut PrattParser<'input>,
    left: Atom,
    _token: Token<'input>,
) -> ParseResult<Atom> {
    let right = parser
        .parse_expression(Precedence::Union)
        .map_err(|e| ParseError::in_rule("union", e))?;
    Ok(Atom::union(left, right))
}

fn parse_function<'input>(
    parser: &mut PrattParser<'input>,
    left: Atom,
    token: Token<'input>,
) -> ParseResult<Atom> {
    if left.as_identifier().is_none() {
        return Err(ParseError::InvalidCallee {
            found: left.kind().to_string(),
            position: token.offset,
        });
    }
    let args = parser
        .parse_arguments(token)
        .map_err(|e| ParseError::in_rule("function invocation", e))?;
    Ok(Atom::function(left, args))
}

/// `(expr)`: the argument list machinery, unwrapped to its single expression
fn parse_group<'input>(parser: &mut PrattParser<'input>, token: Token<'input>) -> ParseResult<Atom> {
    match parser.parse_arguments(token) {
        Ok(Atom::ParamList(Some(inner))) => Ok(*inner),
        Ok(_) => Err(ParseError::in_rule(
            "group",
            ParseError::UnexpectedToken {
                token: ")".to_string(),
                position: token.offset + 1,
            },
        )),
        Err(e) => Err(ParseError::in_rule("group", e)),
    }
}

/// `)` directly after `(`
fn parse_empty_params<'input>(
    parser: &mut PrattParser<'input>,
    token: Token<'input>,
) -> ParseResult<Atom> {
    if parser.depth == 0 || parser.previous != Some(TokenKind::LeftParen) {
        return Err(unexpected(token));
    }
    Ok(Atom::param_list(None))
}

/// `)` closing a non-empty argument list
fn parse_params<'input>(
    parser: &mut PrattParser<'input>,
    left: Atom,
    token: Token<'input>,
) -> ParseResult<Atom> {
    if parser.depth == 0 {
        return Err(unexpected(token));
    }
    Ok(Atom::param_list(Some(left)))
}

/// Parse `input` into its root atom
pub fn parse_expression_pratt(input: &str) -> ParseResult<Atom> {
    log::trace!("parsing '{input}'");
    PrattParser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Atom {
        parse_expression_pratt(input).unwrap()
    }

    fn id(name: &str) -> Atom {
        Atom::identifier(name)
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Base < Precedence::Invocation);
        assert!(Precedence::Invocation < Precedence::Call);
        assert!(Precedence::Call < Precedence::Close);
        assert!(Precedence::Close < Precedence::Union);
    }

    #[test]
    fn test_leaves() {
        assert_eq!(parse("Patient"), id("Patient"));
        assert_eq!(parse("true"), Atom::boolean("true"));
        assert_eq!(parse("1.5"), Atom::number("1.5"));
        assert_eq!(parse(" 'x' "), Atom::string("x"));
    }

    #[test]
    fn test_invocation_is_left_associative() {
        assert_eq!(
            parse("a.b.c"),
            Atom::invocation(Atom::invocation(id("a"), id("b")), id("c"))
        );
    }

    #[test]
    fn test_comma_binds_tightest() {
        assert_eq!(
            parse("a.b,c"),
            Atom::invocation(id("a"), Atom::union(id("b"), id("c")))
        );
        assert_eq!(
            parse("a,b.c"),
            Atom::invocation(Atom::union(id("a"), id("b")), id("c"))
        );
        assert_eq!(
            parse("a,b,c"),
            Atom::union(Atom::union(id("a"), id("b")), id("c"))
        );
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(
            parse("count()"),
            Atom::function(id("count"), Atom::param_list(None))
        );
        assert_eq!(
            parse("'Willer'.replace('er','iams')"),
            Atom::invocation(
                Atom::string("Willer"),
                Atom::function(
                    id("replace"),
                    Atom::param_list(Some(Atom::union(Atom::string("er"), Atom::string("iams"))))
                )
            )
        );
        assert_eq!(
            parse("name.first().given"),
            Atom::invocation(
                Atom::invocation(id("name"), Atom::function(id("first"), Atom::param_list(None))),
                id("given")
            )
        );
    }

    #[test]
    fn test_nested_arguments() {
        assert_eq!(
            parse("f(g(x), a.b)"),
            Atom::function(
                id("f"),
                Atom::param_list(Some(Atom::invocation(
                    Atom::union(
                        Atom::function(id("g"), Atom::param_list(Some(id("x")))),
                        id("a")
                    ),
                    id("b")
                )))
            )
        );
    }

    #[test]
    fn test_groups() {
        assert_eq!(
            parse("(x,y),z"),
            Atom::union(Atom::union(id("x"), id("y")), id("z"))
        );
        assert_eq!(
            parse("x,(y,z)"),
            Atom::union(id("x"), Atom::union(id("y"), id("z")))
        );
        assert_eq!(parse("(a.b).c"), Atom::invocation(Atom::invocation(id("a"), id("b")), id("c")));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_expression_pratt(""),
            Err(ParseError::UnexpectedEof { position: 0 })
        );
        assert!(matches!(
            parse_expression_pratt("a."),
            Err(ParseError::Rule { rule: "invocation", .. })
        ));
        assert!(matches!(
            parse_expression_pratt("a,"),
            Err(ParseError::Rule { rule: "union", .. })
        ));
        assert!(matches!(
            parse_expression_pratt("f(a"),
            Err(ParseError::Rule { rule: "function invocation", .. })
        ));
        assert!(matches!(
            parse_expression_pratt("()"),
            Err(ParseError::Rule { rule: "group", .. })
        ));
        assert!(matches!(
            parse_expression_pratt("'a'(1)"),
            Err(ParseError::InvalidCallee { .. })
        ));
        assert!(matches!(
            parse_expression_pratt("a b"),
            Err(ParseError::UnexpectedToken { position: 2, .. })
        ));
        assert!(matches!(
            parse_expression_pratt("a)"),
            Err(ParseError::UnexpectedToken { position: 1, .. })
        ));
        assert!(matches!(
            parse_expression_pratt(".a"),
            Err(ParseError::UnexpectedToken { position: 0, .. })
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let within = format!(
            "{}a{}",
            "(".repeat(MAX_NESTING_DEPTH),
            ")".repeat(MAX_NESTING_DEPTH)
        );
        assert_eq!(parse(&within), id("a"));

        let deep = "(".repeat(200_000);
        let err = parse_expression_pratt(&deep).unwrap_err();
        assert_eq!(
            err.root_cause(),
            &ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                position: MAX_NESTING_DEPTH,
            }
        );
        assert_eq!(err.position(), MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_ungrouped_argument_absorbs_comma() {
        assert_eq!(
            parse("replace('er', suffix.value)"),
            Atom::function(
                id("replace"),
                Atom::param_list(Some(Atom::invocation(
                    Atom::union(Atom::string("er"), id("suffix")),
                    id("value")
                )))
            )
        );
        assert_eq!(
            parse("replace('er', (suffix.value))"),
            Atom::function(
                id("replace"),
                Atom::param_list(Some(Atom::union(
                    Atom::string("er"),
                    Atom::invocation(id("suffix"), id("value"))
                )))
            )
        );
    }

    #[test]
    fn test_union_of_calls_needs_groups() {
        assert!(matches!(
            parse_expression_pratt("nope1(), nope2()"),
            Err(ParseError::InvalidCallee { position: 14, .. })
        ));
        assert_eq!(
            parse("(nope1()), (nope2())"),
            Atom::union(
                Atom::function(id("nope1"), Atom::param_list(None)),
                Atom::function(id("nope2"), Atom::param_list(None))
            )
        );
    }

    #[test]
    fn test_error_root_cause() {
        let err = parse_expression_pratt("a.f(b,").unwrap_err();
        assert_eq!(err.root_cause(), &ParseError::UnexpectedEof { position: 6 });
        assert!(err.to_string().starts_with("error parsing invocation"));
    }
}
