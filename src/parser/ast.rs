use std::mem;

use serde::{Deserialize, Serialize};

/// A parsed S-expression
///
/// Lists are chains of [`Expression::Pair`] cells whose last `rest` is
/// [`Expression::Nil`]. A chain ending in an atom is an improper list; the
/// parser never builds one, but every consumer tolerates it.
///
/// Dropping, cloning and comparing walk the `rest` chain in a loop, so their
/// stack use grows with nesting depth only. `Debug` and the serde impls are
/// derived and recurse once per list element.
#[derive(Debug, Default, Serialize, Deserialize)]
pub enum Expression {
    /// The empty list
    #[default]
    Nil,
    /// Symbol or numeral, kept as text
    Atom(String),
    /// Cons cell
    Pair(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Creates an atom
    pub fn atom(text: impl Into<String>) -> Self {
        Expression::Atom(text.into())
    }

    /// Creates a cons cell
    pub fn cons(first: Expression, rest: Expression) -> Self {
        Expression::Pair(Box::new(first), Box::new(rest))
    }

    /// Builds a proper list from its elements
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Expression>,
        I::IntoIter: DoubleEndedIterator,
    {
        Self::list_with_tail(items, Expression::Nil)
    }

    /// Builds a list from its elements, terminated by `tail` instead of `Nil`
    pub fn list_with_tail<I>(items: I, tail: Expression) -> Self
    where
        I: IntoIterator<Item = Expression>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(tail, |rest, item| Expression::cons(item, rest))
    }

    /// Head of a pair
    pub fn first(&self) -> Option<&Expression> {
        match self {
            Expression::Pair(first, _) => Some(first.as_ref()),
            _ => None,
        }
    }

    /// Tail of a pair
    pub fn rest(&self) -> Option<&Expression> {
        match self {
            Expression::Pair(_, rest) => Some(rest.as_ref()),
            _ => None,
        }
    }

    /// True for cons cells
    pub fn is_pair(&self) -> bool {
        matches!(self, Expression::Pair(..))
    }

    /// True for the empty list
    pub fn is_nil(&self) -> bool {
        matches!(self, Expression::Nil)
    }

    /// Atom text, if this is an atom
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Expression::Atom(text) => Some(text),
            _ => None,
        }
    }

    /// Walks the `rest` chain, returning the elements and whatever ends it
    ///
    /// The tail is `Nil` for a proper list. For a non-pair the element list
    /// is empty and the tail is `self`.
    pub fn elements(&self) -> (Vec<&Expression>, &Expression) {
        let mut items = Vec::new();
        let mut cursor = self;
        while let Expression::Pair(first, rest) = cursor {
            items.push(first.as_ref());
            cursor = rest.as_ref();
        }
        (items, cursor)
    }

    /// Elements of a proper list, or `None` if the chain ends in an atom
    pub fn proper_elements(&self) -> Option<Vec<&Expression>> {
        match self.elements() {
            (items, Expression::Nil) => Some(items),
            _ => None,
        }
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        match self {
            Expression::Nil => Expression::Nil,
            Expression::Atom(text) => Expression::Atom(text.clone()),
            Expression::Pair(..) => {
                let (items, tail) = self.elements();
                // `tail` is never a pair, so this does not come back here
                Expression::list_with_tail(items.into_iter().map(Expression::clone), tail.clone())
            }
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let (mut left, mut right) = (self, other);
        loop {
            match (left, right) {
                (Expression::Pair(a, rest_a), Expression::Pair(b, rest_b)) => {
                    if a != b {
                        return false;
                    }
                    left = rest_a.as_ref();
                    right = rest_b.as_ref();
                }
                (Expression::Atom(a), Expression::Atom(b)) => return a == b,
                (Expression::Nil, Expression::Nil) => return true,
                _ => return false,
            }
        }
    }
}

impl Eq for Expression {}

impl Drop for Expression {
    fn drop(&mut self) {
        let Expression::Pair(first, rest) = self else {
            return;
        };
        if !first.is_pair() && !rest.is_pair() {
            return;
        }

        // Detach children before they drop so no cell frees a deep subtree.
        let mut pending = vec![mem::take(first.as_mut()), mem::take(rest.as_mut())];
        while let Some(mut expr) = pending.pop() {
            if let Expression::Pair(first, rest) = &mut expr {
                pending.push(mem::take(first.as_mut()));
                pending.push(mem::take(rest.as_mut()));
            }
        }
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::atom(text)
    }
}
