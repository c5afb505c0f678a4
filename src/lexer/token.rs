use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// All possible token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Maximal run of non-whitespace, non-paren characters
    Word,
}

/// A token located inside the buffer handed to [`scan`](super::scan)
///
/// Only valid for that buffer; [`Span::bytes`] borrows the token text back out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// The type of token
    pub kind: TokenKind,
    /// First byte of the token
    pub start: usize,
    /// One past the last byte of the token
    pub end: usize,
}

impl Span {
    /// Byte range of the token
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Token bytes within the buffer the span was scanned from
    pub fn bytes<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.range()]
    }
}

/// A single token, detached from the buffer it was scanned from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Token text; invalid UTF-8 is replaced with U+FFFD
    pub lexeme: String,
    /// Byte offset of the token in the input stream
    pub offset: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }

    /// Copies a span out of `buffer`, whose first byte sits at stream offset `base`
    pub fn from_span(span: Span, buffer: &[u8], base: usize) -> Self {
        Token {
            kind: span.kind,
            lexeme: String::from_utf8_lossy(span.bytes(buffer)).into_owned(),
            offset: base + span.start,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}
