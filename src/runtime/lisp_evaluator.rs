use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use crate::error::{Error, Result};
use crate::parser::{render, Expression};
use crate::runtime::Value;

/// Binary integer operators understood by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, truncating toward zero
    Div,
}

impl Operator {
    /// Every operator, in table order
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Symbol that names the operator in source text
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }

    /// Looks an operator up by symbol
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        OPERATORS.get(symbol).copied()
    }

    /// Applies the operator with checked 64-bit arithmetic
    pub fn apply(self, left: i64, right: i64) -> Result<i64> {
        let result = match self {
            Operator::Add => left.checked_add(right),
            Operator::Sub => left.checked_sub(right),
            Operator::Mul => left.checked_mul(right),
            Operator::Div => {
                if right == 0 {
                    return Err(Error::DivisionByZero);
                }
                left.checked_div(right)
            }
        };
        result.ok_or_else(|| Error::Overflow {
            op: self.symbol().to_string(),
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

lazy_static! {
    /// Symbol to operator table; built once and never mutated
    static ref OPERATORS: HashMap<&'static str, Operator> = Operator::ALL
        .iter()
        .map(|op| (op.symbol(), *op))
        .collect();
}

/// Evaluator for binary arithmetic over cons trees
///
/// - Atoms and `()` evaluate to themselves.
/// - `(op a b)` with `op` one of `+ - * /` evaluates `a` then `b`, coerces
///   both to integers and applies `op`.
/// - Any other list is an [`Error::UnsupportedExpression`].
///
/// The evaluator holds no state; operators come from a process-wide table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LispEvaluator;

impl LispEvaluator {
    /// Creates a new evaluator
    pub fn new() -> Self {
        LispEvaluator
    }

    /// Evaluates a sequence of expressions, returning the last value
    ///
    /// An empty sequence evaluates to `()`.
    pub fn execute(&self, program: &[Expression]) -> Result<Value> {
        let mut last = Value::Nil;
        for expr in program {
            last = self.evaluate(expr)?;
        }
        Ok(last)
    }

    /// Evaluates one expression
    pub fn evaluate(&self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Nil => Ok(Value::Nil),
            Expression::Atom(text) => Ok(Value::Atom(text.clone())),
            Expression::Pair(..) => self.evaluate_form(expr),
        }
    }

    fn evaluate_form(&self, form: &Expression) -> Result<Value> {
        let unsupported = || Error::UnsupportedExpression { form: render(form) };

        let op = form
            .first()
            .and_then(Expression::as_atom)
            .and_then(Operator::from_symbol)
            .ok_or_else(unsupported)?;

        let args = match form.proper_elements() {
            Some(items) if items.len() == 3 => items,
            _ => return Err(unsupported()),
        };

        // Left operand is fully evaluated and coerced first so its failure wins.
        let left = self.evaluate(args[1])?.to_int()?;
        let right = self.evaluate(args[2])?.to_int()?;
        let result = op.apply(left, right)?;

        tracing::debug!(op = op.symbol(), left, right, result, "applied operator");
        Ok(Value::Int(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::SExprScanner;
    use crate::parser::SExprParser;

    fn eval_str(source: &str) -> Result<Value> {
        let mut scanner = SExprScanner::new(source);
        let tokens = scanner.scan_tokens();
        let mut parser = SExprParser::new(tokens);
        let program = parser.parse()?;
        let evaluator = LispEvaluator::new();
        evaluator.execute(&program)
    }

    #[test]
    fn test_simple_arithmetic() {
        assert_eq!(eval_str("(+ 4 3)").unwrap(), Value::Int(7));
        assert_eq!(eval_str("(- 4 10)").unwrap(), Value::Int(-6));
        assert_eq!(eval_str("(* 6 7)").unwrap(), Value::Int(42));
        assert_eq!(eval_str("(/ 9 2)").unwrap(), Value::Int(4));
    }

    #[test]
    fn test_nested_arithmetic() {
        assert_eq!(eval_str("(+ (+ 4 3) (+ 5 2))").unwrap(), Value::Int(14));
        assert_eq!(eval_str("(* (- 10 4) (/ 20 (+ 2 3)))").unwrap(), Value::Int(24));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(eval_str("(/ -7 2)").unwrap(), Value::Int(-3));
        assert_eq!(eval_str("(/ 7 -2)").unwrap(), Value::Int(-3));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval_str("(/ 4 0)"), Err(Error::DivisionByZero));
        assert_eq!(eval_str("(/ 4 (- 2 2))"), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_atoms_self_evaluate() {
        assert_eq!(eval_str("foo").unwrap(), Value::Atom("foo".into()));
        assert_eq!(eval_str("42").unwrap(), Value::Atom("42".into()));
        assert_eq!(eval_str("()").unwrap(), Value::Nil);
        assert_eq!(eval_str("").unwrap(), Value::Nil);
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(
            eval_str("(+ 1 x)"),
            Err(Error::NotANumber { text: "x".into() })
        );
        assert_eq!(
            eval_str("(+ () 1)"),
            Err(Error::NotANumber { text: "()".into() })
        );
    }

    #[test]
    fn test_leftmost_failure_wins() {
        assert_eq!(
            eval_str("(+ a b)"),
            Err(Error::NotANumber { text: "a".into() })
        );
        assert_eq!(
            eval_str("(+ (/ 1 0) b)"),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn test_unsupported_forms() {
        for source in ["(foo 1 2)", "(+ 1)", "(+ 1 2 3)", "((+) 1 2)", "(1 2 3)"] {
            match eval_str(source) {
                Err(Error::UnsupportedExpression { form }) => assert_eq!(form, source),
                other => panic!("{}: expected UnsupportedExpression, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_improper_argument_list() {
        let form = Expression::list_with_tail(
            vec!["+".into(), "1".into(), "2".into()],
            "3".into(),
        );
        let err = LispEvaluator::new().evaluate(&form).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedExpression {
                form: "(+ 1 2 . 3)".into()
            }
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let max = i64::MAX.to_string();
        assert_eq!(
            eval_str(&format!("(+ {} 1)", max)),
            Err(Error::Overflow { op: "+".into() })
        );
        let min = i64::MIN.to_string();
        assert_eq!(
            eval_str(&format!("(/ {} -1)", min)),
            Err(Error::Overflow { op: "/".into() })
        );
    }

    #[test]
    fn test_execute_returns_last_value() {
        assert_eq!(eval_str("(+ 1 1) (* 3 3)").unwrap(), Value::Int(9));
    }

    #[test]
    fn test_operators_resolve_through_table() {
        let evaluator = LispEvaluator::default();
        let form = SExprParser::new(SExprScanner::new("(- 10 4)").scan_tokens())
            .parse()
            .unwrap();
        assert_eq!(evaluator.evaluate(&form[0]), Ok(Value::Int(6)));
        assert!(matches!(
            evaluator.evaluate(&Expression::list(vec!["%".into(), "1".into(), "2".into()])),
            Err(Error::UnsupportedExpression { .. })
        ));
    }

    #[test]
    fn test_operator_table() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol("%"), None);
        assert_eq!(Operator::Mul.to_string(), "*");
    }
}
