use std::io::{ErrorKind, Read};

use super::token::{Span, Token, TokenKind};
use super::whitespace::{is_paren, is_whitespace};
use crate::config::ScannerConfig;
use crate::error::{Error, Result};

/// Outcome of one call to [`scan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// A token was found; `advance` counts skipped whitespace plus the token itself
    Token {
        /// Bytes consumed from the front of the buffer
        advance: usize,
        /// Location of the token in the buffer
        span: Span,
    },
    /// The buffer ends before the next token boundary; append input and retry
    NeedMoreInput,
    /// The final chunk holds nothing but whitespace
    Exhausted {
        /// Bytes consumed from the front of the buffer
        advance: usize,
    },
}

impl Scan {
    /// Bytes the caller should drop from the front of its buffer
    pub fn advance(&self) -> usize {
        match self {
            Scan::Token { advance, .. } | Scan::Exhausted { advance } => *advance,
            Scan::NeedMoreInput => 0,
        }
    }

    /// The token, if one was found
    pub fn span(&self) -> Option<Span> {
        match self {
            Scan::Token { span, .. } => Some(*span),
            _ => None,
        }
    }

    /// True when the caller must supply more bytes before scanning again
    pub fn needs_more_input(&self) -> bool {
        matches!(self, Scan::NeedMoreInput)
    }
}

/// Result of decoding one code point from the front of a byte slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoded {
    Char(char, usize),
    /// A byte that cannot begin a valid sequence here
    Invalid,
    /// A valid multi-byte prefix cut off by the end of the slice
    Truncated,
    Empty,
}

fn decode(data: &[u8]) -> Decoded {
    let Some(&first) = data.first() else {
        return Decoded::Empty;
    };
    if first.is_ascii() {
        return Decoded::Char(first as char, 1);
    }

    let prefix = &data[..data.len().min(4)];
    let valid = match std::str::from_utf8(prefix) {
        Ok(s) => s,
        Err(e) if e.valid_up_to() > 0 => {
            std::str::from_utf8(&prefix[..e.valid_up_to()]).unwrap_or_default()
        }
        Err(e) if e.error_len().is_none() => return Decoded::Truncated,
        Err(_) => return Decoded::Invalid,
    };
    match valid.chars().next() {
        Some(c) => Decoded::Char(c, c.len_utf8()),
        None => Decoded::Invalid,
    }
}

/// Finds the next token in `data`.
///
/// Leading whitespace is skipped. A `(` or `)` is a token by itself; anything
/// else starts a word that runs up to the next whitespace or paren. When
/// `at_eof` is false the scanner never guesses: a buffer that ends in
/// whitespace, mid-word, or mid-code-point yields [`Scan::NeedMoreInput`] and
/// nothing is consumed. When `at_eof` is true the end of the buffer also ends
/// a word.
///
/// Bytes that are not valid UTF-8 count as one non-whitespace unit each.
pub fn scan(data: &[u8], at_eof: bool) -> Scan {
    let mut start = 0;
    loop {
        match decode(&data[start..]) {
            Decoded::Char(c, width) if is_whitespace(c) => start += width,
            Decoded::Truncated if !at_eof => return Scan::NeedMoreInput,
            Decoded::Empty if at_eof => {
                return Scan::Exhausted {
                    advance: data.len(),
                }
            }
            Decoded::Empty => return Scan::NeedMoreInput,
            _ => break,
        }
    }

    if let Decoded::Char(c, width) = decode(&data[start..]) {
        if is_paren(c) {
            let kind = if c == '(' {
                TokenKind::LeftParen
            } else {
                TokenKind::RightParen
            };
            return Scan::Token {
                advance: start + width,
                span: Span {
                    kind,
                    start,
                    end: start + width,
                },
            };
        }
    }

    scan_word(data, start, at_eof)
}

fn scan_word(data: &[u8], start: usize, at_eof: bool) -> Scan {
    let word = |end: usize| Scan::Token {
        advance: end,
        span: Span {
            kind: TokenKind::Word,
            start,
            end,
        },
    };

    let mut i = start;
    while i < data.len() {
        match decode(&data[i..]) {
            Decoded::Char(c, _) if is_whitespace(c) || is_paren(c) => return word(i),
            Decoded::Char(_, width) => i += width,
            Decoded::Truncated if !at_eof => return Scan::NeedMoreInput,
            Decoded::Truncated | Decoded::Invalid => i += 1,
            Decoded::Empty => break,
        }
    }

    if at_eof {
        word(data.len())
    } else {
        Scan::NeedMoreInput
    }
}

/// Anything the list builder can pull tokens from
pub trait TokenSource {
    /// Returns the next token, or `None` once the input is exhausted
    fn next_token(&mut self) -> Result<Option<Token>>;
}

impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        Ok(self.next())
    }
}

/// Scanner for a complete in-memory source string
pub struct SExprScanner {
    /// Source code as bytes
    source: Vec<u8>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Current position in source
    current: usize,
}

impl SExprScanner {
    /// Creates a new S-expression scanner from source code
    pub fn new(source: &str) -> Self {
        SExprScanner {
            source: source.as_bytes().to_vec(),
            tokens: Vec::new(),
            current: 0,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while self.current < self.source.len() {
            let rest = &self.source[self.current..];
            match scan(rest, true) {
                Scan::Token { advance, span } => {
                    self.tokens
                        .push(Token::from_span(span, rest, self.current));
                    self.current += advance;
                }
                Scan::Exhausted { advance } => self.current += advance,
                // Whole input is present, so the scanner never asks for more.
                Scan::NeedMoreInput => break,
            }
        }

        self.tokens.clone()
    }
}

/// Pulls tokens out of a byte stream, refilling a growable buffer on demand
///
/// Tokens may straddle `read` boundaries arbitrarily: the reader keeps the
/// unconsumed tail, reads more and rescans until [`scan`] can decide.
pub struct TokenReader<R> {
    reader: R,
    buf: Vec<u8>,
    /// First unconsumed byte of `buf`
    start: usize,
    /// End of valid data in `buf`
    end: usize,
    /// Stream offset of `buf[start]`
    offset: usize,
    at_eof: bool,
    done: bool,
    config: ScannerConfig,
}

impl<R: Read> TokenReader<R> {
    /// Creates a reader with default buffer sizes
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ScannerConfig::default())
    }

    /// Creates a reader with explicit buffer sizes
    pub fn with_config(reader: R, config: ScannerConfig) -> Self {
        TokenReader {
            reader,
            buf: Vec::new(),
            start: 0,
            end: 0,
            offset: 0,
            at_eof: false,
            done: false,
            config,
        }
    }

    /// Byte offset of the next unconsumed byte in the stream
    pub fn position(&self) -> usize {
        self.offset
    }

    fn consume(&mut self, n: usize) {
        self.start += n;
        self.offset += n;
    }

    /// Drops whitespace from the front of the buffer
    ///
    /// Only whole code points are dropped, so a cut-off whitespace character
    /// stays until the rest of it arrives.
    fn skip_whitespace(&mut self) {
        while let Decoded::Char(c, width) = decode(&self.buf[self.start..self.end]) {
            if !is_whitespace(c) {
                break;
            }
            self.consume(width);
        }
    }

    /// Makes room and reads at least one more byte, or records end of input
    fn fill(&mut self) -> Result<()> {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }

        if self.end == self.buf.len() {
            let limit = self.config.max_token_size;
            if self.buf.len() >= limit {
                return Err(Error::TokenTooLong { limit });
            }
            let grown = if self.buf.is_empty() {
                self.config.initial_buffer_size
            } else {
                self.buf.len() * 2
            };
            self.buf.resize(grown.clamp(1, limit), 0);
            tracing::trace!(capacity = self.buf.len(), "token buffer grown");
        }

        loop {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    tracing::trace!(offset = self.offset, "end of input");
                    self.at_eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    tracing::trace!(bytes = n, "buffer refilled");
                    self.end += n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> TokenSource for TokenReader<R> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        while !self.done {
            let data = &self.buf[self.start..self.end];
            match scan(data, self.at_eof) {
                Scan::Token { advance, span } => {
                    let token = Token::from_span(span, data, self.offset);
                    self.consume(advance);
                    return Ok(Some(token));
                }
                Scan::Exhausted { advance } => {
                    self.consume(advance);
                    self.done = true;
                }
                Scan::NeedMoreInput if self.at_eof => self.done = true,
                Scan::NeedMoreInput => {
                    // Whitespace between tokens must not count against the
                    // token size limit.
                    self.skip_whitespace();
                    self.fill()?;
                }
            }
        }
        Ok(None)
    }
}
