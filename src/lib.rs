//! # Lillisp - a tiny S-expression reader and evaluator
//!
//! Lillisp reads parenthesized text into cons trees and reduces binary
//! integer arithmetic over them. The interesting part is the reader: an
//! incremental scanner that can be fed a buffer a few bytes at a time and
//! tells the caller when it needs more.
//!
//! ## Quick Start
//!
//! ```rust
//! use lillisp::{Evaluator, Parser, Scanner, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = "(+ (+ 4 3) (+ 5 2))";
//!
//! // Tokenize (scan)
//! let tokens = Scanner::new(code).scan_tokens();
//!
//! // Build the cons tree
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse()?;
//!
//! // Evaluate
//! let evaluator = Evaluator::new();
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result, Value::Int(14));
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading from a stream
//!
//! [`TokenReader`] refills its buffer from any [`std::io::Read`], so tokens
//! may be split across reads:
//!
//! ```rust
//! use lillisp::{Expression, SExprParser, TokenReader};
//!
//! # fn main() -> lillisp::Result<()> {
//! let input = "(a  b)\n  (c (d))".as_bytes();
//! let mut parser = SExprParser::from_source(TokenReader::new(input));
//!
//! let first = parser.read_top_level_item()?.unwrap();
//! assert_eq!(first.to_string(), "(a b)");
//! let second = parser.read_top_level_item()?.unwrap();
//! assert_eq!(second.to_string(), "(c (d))");
//! assert_eq!(parser.read_top_level_item()?, None);
//! # Ok(())
//! # }
//! ```
//!
//! ## The scanning protocol
//!
//! [`scan`] is pure: it looks at a buffer and either reports a token and how
//! many bytes to drop, or asks for more input.
//!
//! ```rust
//! use lillisp::{scan, Scan};
//!
//! assert_eq!(scan(b"   a", true).advance(), 4);
//! assert_eq!(scan(b"   a", false), Scan::NeedMoreInput);
//! ```
//!
//! ## Error Handling
//!
//! Malformed input and failing arithmetic come back as [`Error`] values;
//! nothing panics or exits:
//!
//! ```rust
//! # use lillisp::{Error, Evaluator, Parser, Scanner};
//! let tokens = Scanner::new("(/ 4 0)").scan_tokens();
//! let program = Parser::new(tokens).parse().unwrap();
//!
//! match Evaluator::new().execute(&program) {
//!     Ok(_) => panic!("Should have failed"),
//!     Err(e) => assert_eq!(e, Error::DivisionByZero),
//! }
//! ```

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runtime;

// Re-export main types
pub use config::{Config, ParserConfig, ReplConfig, ScannerConfig};
pub use error::{Error, ErrorSeverity, Result};
pub use lexer::{
    is_whitespace, scan, SExprScanner, Scan, Span, Token, TokenKind, TokenReader, TokenSource,
};
pub use parser::{render, Expression, SExprParser};
pub use repl::{Repl, Step};
pub use runtime::{LispEvaluator, Operator, Value};

/// Type alias for the S-expression scanner (lexer).
/// Converts source text into tokens for the parser.
pub type Scanner = SExprScanner;

/// Type alias for the list builder over pre-scanned tokens.
pub type Parser = SExprParser;

/// Type alias for the arithmetic evaluator.
pub type Evaluator = LispEvaluator;
