//! Error types for the Lillisp reader and evaluator

use thiserror::Error;

/// Lillisp errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Parse errors
    /// The token stream ended inside an open list
    ///
    /// **Triggered by:** Input that opens more lists than it closes
    /// **Example:** `(a` or `(+ 1 (+ 2 3)`
    #[error("Unmatched '(': input ended inside a list")]
    UnmatchedOpenParen,

    /// A close paren appeared at top level
    ///
    /// **Triggered by:** A `)` with no corresponding `(`
    /// **Example:** `)` or `a)`
    #[error("Unmatched ')': no list is open")]
    UnmatchedCloseParen,

    /// Lists nested deeper than the configured parser limit
    #[error("Nesting too deep (limit: {limit})")]
    NestingTooDeep {
        /// Maximum allowed nesting depth
        limit: usize,
    },

    /// A single token did not fit in the scanner's largest buffer
    #[error("Token too long (limit: {limit} bytes)")]
    TokenTooLong {
        /// Maximum buffer size in bytes
        limit: usize,
    },

    // Evaluation errors
    /// Operand of an arithmetic operator is not an integer
    ///
    /// **Triggered by:** Operands that are symbols, `()`, or malformed numerals
    /// **Example:** `(+ 1 x)`, `(* 2 3.5)`
    #[error("Not a number: {text}")]
    NotANumber {
        /// Rendered form of the offending operand
        text: String,
    },

    /// Division by zero error
    ///
    /// **Triggered by:** A `/` form whose second operand evaluates to zero
    /// **Example:** `(/ 4 0)`
    #[error("Division by zero")]
    DivisionByZero,

    /// Integer result does not fit in 64 bits
    #[error("Arithmetic overflow in '{op}'")]
    Overflow {
        /// Operator symbol
        op: String,
    },

    /// A list the evaluator has no rule for
    ///
    /// **Triggered by:** Unknown operator, wrong arity, improper argument list
    /// **Example:** `(foo 1 2)`, `(+ 1)`, `(+ 1 2 3)`
    #[error("Unsupported expression: {form}")]
    UnsupportedExpression {
        /// Rendered form of the expression
        form: String,
    },

    // Environment errors
    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The session cannot continue
    Fatal,
    /// The failing read or evaluation is abandoned and the session may continue
    Recoverable,
}

impl Error {
    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::Io(_) => ErrorSeverity::Fatal,
            Error::Config(_) => ErrorSeverity::Fatal,
            Error::TokenTooLong { .. } => ErrorSeverity::Fatal,

            _ => ErrorSeverity::Recoverable,
        }
    }

    /// True for errors raised while reading, as opposed to evaluating
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Error::UnmatchedOpenParen
                | Error::UnmatchedCloseParen
                | Error::NestingTooDeep { .. }
                | Error::TokenTooLong { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type for Lillisp operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            Error::NotANumber { text: "x".into() }.to_string(),
            "Not a number: x"
        );
        assert!(Error::UnmatchedOpenParen.to_string().contains("'('"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(Error::DivisionByZero.classify(), ErrorSeverity::Recoverable);
        assert_eq!(Error::UnmatchedCloseParen.classify(), ErrorSeverity::Recoverable);
        assert_eq!(Error::Io("closed".into()).classify(), ErrorSeverity::Fatal);
        assert!(Error::UnmatchedOpenParen.is_parse_error());
        assert!(!Error::DivisionByZero.is_parse_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io.into();
        assert_eq!(err, Error::Io("pipe closed".into()));
    }
}
