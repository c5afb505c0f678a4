//! Lillisp Parser Module
//!
//! Builds cons trees from tokens and renders them back to text.

mod ast;
mod printer;
mod sexpr_parser;

pub use ast::Expression;
pub use printer::{render, write_expr};
pub use sexpr_parser::SExprParser;
