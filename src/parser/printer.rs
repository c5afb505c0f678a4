//! Renders expressions back to text
//!
//! Output is canonical: one space between elements, no space inside parens.
//! An improper tail is written in dotted form, `(a b . c)`.

use std::fmt::{self, Write};

use super::ast::Expression;

/// Renders `expr` as a string
pub fn render(expr: &Expression) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_expr(&mut out, expr);
    out
}

/// Writes `expr` to any formatter sink
pub fn write_expr<W: Write>(out: &mut W, expr: &Expression) -> fmt::Result {
    match expr {
        Expression::Nil => out.write_str("()"),
        Expression::Atom(text) => out.write_str(text),
        Expression::Pair(..) => {
            let (items, tail) = expr.elements();
            out.write_char('(')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(' ')?;
                }
                write_expr(out, item)?;
            }
            if !tail.is_nil() {
                out.write_str(" . ")?;
                write_expr(out, tail)?;
            }
            out.write_char(')')
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self)
    }
}
