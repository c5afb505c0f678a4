use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::Expression;

/// Runtime value representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// 64-bit integer produced by arithmetic
    Int(i64),
    /// Self-evaluating atom, text unchanged
    Atom(String),
    /// The empty list
    Nil,
}

impl Value {
    /// Coerces to an integer, parsing atom text as a decimal numeral
    pub fn to_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Atom(text) => text.parse().map_err(|_| Error::NotANumber {
                text: text.clone(),
            }),
            Value::Nil => Err(Error::NotANumber {
                text: "()".to_string(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Atom(text) => f.write_str(text),
            Value::Nil => f.write_str("()"),
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        match value {
            Value::Int(n) => Expression::Atom(n.to_string()),
            Value::Atom(text) => Expression::Atom(text),
            Value::Nil => Expression::Nil,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_int() {
        assert_eq!(Value::Int(7).to_int(), Ok(7));
        assert_eq!(Value::Atom("-12".into()).to_int(), Ok(-12));
        assert_eq!(Value::Atom("+5".into()).to_int(), Ok(5));
    }

    #[test]
    fn test_malformed_numerals_fail() {
        for text in ["abc", "1.5", "", "12x", "0x10", " 1"] {
            assert_eq!(
                Value::Atom(text.into()).to_int(),
                Err(Error::NotANumber { text: text.into() })
            );
        }
        assert_eq!(
            Value::Nil.to_int(),
            Err(Error::NotANumber { text: "()".into() })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Atom("foo".into()).to_string(), "foo");
        assert_eq!(Value::Nil.to_string(), "()");
    }

    #[test]
    fn test_into_expression() {
        assert_eq!(Expression::from(Value::Int(14)), Expression::atom("14"));
        assert_eq!(Expression::from(Value::Nil), Expression::Nil);
    }
}
