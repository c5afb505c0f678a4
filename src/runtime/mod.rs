//! Runtime evaluation for Lillisp expressions

mod lisp_evaluator;
mod value;

pub use lisp_evaluator::{LispEvaluator, Operator};
pub use value::Value;
