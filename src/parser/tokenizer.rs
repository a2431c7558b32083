//! Tokenizer for FHIRPath expressions
//!
//! Tokens are zero-copy slices of the input carrying their byte offset. The
//! tokenizer keeps one token of lookahead for the parser.

use std::fmt;

use super::error::{LexError, LexResult};

/// Token categories recognised by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Run of digits, with `.` allowed between digits
    Number,
    /// Single-quoted literal; the token text excludes the quotes
    String,
    /// ASCII alphanumeric run starting with a letter
    Identifier,
    /// `true` or `false`
    Boolean,
}

/// A scanned token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'input> {
    /// Token category
    pub kind: TokenKind,
    /// Token text (string literals without their quotes, escapes untouched)
    pub text: &'input str,
    /// Byte offset of the token start in the input
    pub offset: usize,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "'{}'", self.text),
            _ => f.write_str(self.text),
        }
    }
}

/// Scanner over an expression
#[derive(Debug, Clone)]
pub struct Tokenizer<'input> {
    input: &'input str,
    pos: usize,
    peeked: Option<Option<Token<'input>>>,
}

impl<'input> Tokenizer<'input> {
    /// Create a tokenizer at the start of `input`
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            pos: 0,
            peeked: None,
        }
    }

    /// Byte offset just past the last scanned token
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the input in bytes
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Consume the next token, `None` at end of input
    pub fn next_token(&mut self) -> LexResult<Option<Token<'input>>> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&mut self) -> LexResult<Option<Token<'input>>> {
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.scan()?;
        self.peeked = Some(token);
        Ok(token)
    }

    /// Scan the remaining input into a token list
    pub fn tokenize_all(mut self) -> LexResult<Vec<Token<'input>>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn scan(&mut self) -> LexResult<Option<Token<'input>>> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return Ok(None);
        }

        let start = self.pos;
        let (kind, text, end) = match bytes[start] {
            b'.' => (TokenKind::Dot, &self.input[start..start + 1], start + 1),
            b',' => (TokenKind::Comma, &self.input[start..start + 1], start + 1),
            b'(' => (TokenKind::LeftParen, &self.input[start..start + 1], start + 1),
            b')' => (TokenKind::RightParen, &self.input[start..start + 1], start + 1),
            b'\'' => {
                let close = self.find_closing_quote(start)?;
                (TokenKind::String, &self.input[start + 1..close], close + 1)
            }
            b'0'..=b'9' => {
                let end = self.scan_number(start);
                (TokenKind::Number, &self.input[start..end], end)
            }
            b if b.is_ascii_alphabetic() => {
                let end = start
                    + bytes[start..]
                        .iter()
                        .take_while(|b| b.is_ascii_alphanumeric())
                        .count();
                let text = &self.input[start..end];
                let kind = match text {
                    "true" | "false" => TokenKind::Boolean,
                    _ => TokenKind::Identifier,
                };
                (kind, text, end)
            }
            _ => {
                let character = self.input[start..].chars().next().unwrap_or('\u{FFFD}');
                return Err(LexError::UnexpectedCharacter {
                    character,
                    position: start,
                });
            }
        };

        self.pos = end;
        let token = Token {
            kind,
            text,
            offset: start,
        };
        log::trace!("token {:?} '{}' at {}", token.kind, token.text, token.offset);
        Ok(Some(token))
    }

    /// Digits, with a `.` taken only when a digit follows it so that
    /// `5.toString()` still scans as a number followed by an invocation.
    fn scan_number(&self, start: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut end = start;
        while end < bytes.len() {
            let continues = bytes[end].is_ascii_digit()
                || (bytes[end] == b'.' && bytes.get(end + 1).is_some_and(u8::is_ascii_digit));
            if !continues {
                break;
            }
            end += 1;
        }
        end
    }

    fn find_closing_quote(&self, open: usize) -> LexResult<usize> {
        let bytes = self.input.as_bytes();
        let mut i = open + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'\'' => return Ok(i),
                _ => i += 1,
            }
        }
        Err(LexError::UnterminatedString { position: open })
    }
}
