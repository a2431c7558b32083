//! Parser error types

use thiserror::Error;

/// Result type for scanner operations
pub type LexResult<T> = Result<T, LexError>;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Scan error with byte offset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A byte that starts no token
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Byte offset of the character
        position: usize,
    },

    /// A string literal without its closing quote
    #[error("unterminated string literal starting at position {position}")]
    UnterminatedString {
        /// Byte offset of the opening quote
        position: usize,
    },
}

/// Parse error with location information
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The scanner rejected the input
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token that cannot start or continue an expression here
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// Token text
        token: String,
        /// Byte offset of the token
        position: usize,
    },

    /// Input ended where an expression was required
    #[error("unexpected end of input at position {position}")]
    UnexpectedEof {
        /// Byte offset of the end of input
        position: usize,
    },

    /// A `(` without its matching `)`
    #[error("unclosed '(' at position {position}")]
    UnclosedParen {
        /// Byte offset of the opening parenthesis
        position: usize,
    },

    /// A function call whose callee is not a plain identifier
    #[error("cannot call {found} at position {position}")]
    InvalidCallee {
        /// Kind of the node in callee position
        found: String,
        /// Byte offset of the opening parenthesis
        position: usize,
    },

    /// Parentheses nest deeper than the parser allows
    #[error("maximum nesting depth {limit} exceeded at position {position}")]
    TooDeep {
        /// Nesting limit
        limit: usize,
        /// Byte offset of the opening parenthesis that exceeded it
        position: usize,
    },

    /// A failure inside a grammar rule, wrapped with the rule's name
    #[error("error parsing {rule}: {source}")]
    Rule {
        /// Rule name (`invocation`, `union`, `function invocation`, `group`)
        rule: &'static str,
        /// Underlying failure
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Wrap `source` with the name of the rule it occurred in
    pub fn in_rule(rule: &'static str, source: ParseError) -> Self {
        ParseError::Rule {
            rule,
            source: Box::new(source),
        }
    }

    /// The innermost error, with all rule wrappers removed
    pub fn root_cause(&self) -> &ParseError {
        let mut current = self;
        while let ParseError::Rule { source, .. } = current {
            current = source;
        }
        current
    }

    /// Byte offset reported by the innermost error
    pub fn position(&self) -> usize {
        match self.root_cause() {
            ParseError::Lex(LexError::UnexpectedCharacter { position, .. })
            | ParseError::Lex(LexError::UnterminatedString { position })
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEof { position }
            | ParseError::UnclosedParen { position }
            | ParseError::InvalidCallee { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
            ParseError::Rule { .. } => 0,
        }
    }
}
