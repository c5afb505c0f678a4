//! Runtime configuration
//!
//! Every section has defaults, so a JSON file only needs the keys it changes:
//!
//! ```json
//! { "repl": { "prompt": "> " }, "parser": { "max_depth": 64 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Token reader buffering
    pub scanner: ScannerConfig,
    /// List builder limits
    pub parser: ParserConfig,
    /// Interactive session settings
    pub repl: ReplConfig,
}

/// Buffer sizing for [`TokenReader`](crate::lexer::TokenReader)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Size of the first buffer allocation, in bytes
    pub initial_buffer_size: usize,
    /// Largest buffer the reader will grow to; bounds the size of one token
    pub max_token_size: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            initial_buffer_size: 4096,
            max_token_size: 64 * 1024,
        }
    }
}

/// Limits for [`SExprParser`](crate::parser::SExprParser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum list nesting depth
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig { max_depth: 1024 }
    }
}

/// Settings for [`Repl`](crate::repl::Repl)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt written before each read
    pub prompt: String,
    /// Top-level atom that ends the session
    pub exit_word: String,
    /// Echo each item read as `atom: ...` or `list: ...`
    pub echo: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: "lillisp> ".to_string(),
            exit_word: "quit".to_string(),
            echo: true,
        }
    }
}

impl Config {
    /// Parses and validates a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Checks that the values are usable
    pub fn validate(&self) -> Result<()> {
        let scanner = &self.scanner;
        if scanner.initial_buffer_size == 0 {
            return Err(Error::config("scanner.initial_buffer_size must be positive"));
        }
        if scanner.initial_buffer_size > scanner.max_token_size {
            return Err(Error::config(format!(
                "scanner.initial_buffer_size ({}) exceeds scanner.max_token_size ({})",
                scanner.initial_buffer_size, scanner.max_token_size
            )));
        }
        if self.parser.max_depth == 0 {
            return Err(Error::config("parser.max_depth must be positive"));
        }
        if self.repl.exit_word.is_empty() {
            return Err(Error::config("repl.exit_word must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scanner.max_token_size, 65536);
        assert_eq!(config.repl.exit_word, "quit");
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json_str(r#"{"repl": {"prompt": "> "}}"#).unwrap();
        assert_eq!(config.repl.prompt, "> ");
        assert_eq!(config.repl.exit_word, "quit");
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_json_str(r#"{"parser": {"max_depth": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_json_str(
            r#"{"scanner": {"initial_buffer_size": 10, "max_token_size": 4}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_malformed_json() {
        let err = Config::from_json_str("{").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
