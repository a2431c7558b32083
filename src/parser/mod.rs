//! FHIRPath expression parser
//!
//! Converts expression text into an [`Atom`] tree with a table-driven Pratt
//! parser over a zero-copy tokenizer.

pub mod error;
pub mod escape;
pub mod pratt;
pub mod tokenizer;

pub use error::{LexError, LexResult, ParseError, ParseResult};
pub use escape::unescape_string;
pub use pratt::{Parselet, Precedence, PrattParser, parse_expression_pratt, parselet};
pub use tokenizer::{Token, TokenKind, Tokenizer};

use crate::ast::Atom;

/// Parse a FHIRPath expression string into an AST
pub fn parse(input: &str) -> ParseResult<Atom> {
    parse_expression_pratt(input)
}

/// Parse expression bytes, which must be UTF-8
pub fn parse_bytes(input: &[u8]) -> ParseResult<Atom> {
    match std::str::from_utf8(input) {
        Ok(text) => parse(text),
        Err(err) => {
            let position = err.valid_up_to();
            let character = char::REPLACEMENT_CHARACTER;
            Err(LexError::UnexpectedCharacter {
                character,
                position,
            }
            .into())
        }
    }
}
