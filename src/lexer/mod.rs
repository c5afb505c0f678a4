//! Lexical analysis for Lillisp
//!
//! Splits a byte stream into parens and words. [`scan`] is the pure,
//! resumable core; [`SExprScanner`] and [`TokenReader`] drive it over a
//! complete string and over an [`std::io::Read`] respectively.

mod sexpr_scanner;
mod token;
mod whitespace;

pub use sexpr_scanner::{scan, SExprScanner, Scan, TokenReader, TokenSource};
pub use token::{Span, Token, TokenKind};
pub use whitespace::{is_paren, is_whitespace};
