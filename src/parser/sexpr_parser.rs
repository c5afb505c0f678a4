use super::ast::Expression;
use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind, TokenSource};

/// Recursive-descent list builder
///
/// Pulls tokens on demand, so it works the same over a pre-scanned vector
/// and over a [`TokenReader`](crate::lexer::TokenReader) attached to a stream.
pub struct SExprParser<S = std::vec::IntoIter<Token>> {
    source: S,
    max_depth: usize,
}

impl SExprParser {
    /// Creates a parser over already-scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        SExprParser::from_source(tokens.into_iter())
    }
}

impl<S: TokenSource> SExprParser<S> {
    /// Creates a parser over any token source with default limits
    pub fn from_source(source: S) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Creates a parser with explicit limits
    pub fn with_config(source: S, config: ParserConfig) -> Self {
        SExprParser {
            source,
            max_depth: config.max_depth,
        }
    }

    /// Reads every remaining top-level item
    pub fn parse(&mut self) -> Result<Vec<Expression>> {
        let mut items = Vec::new();
        while let Some(item) = self.read_top_level_item()? {
            items.push(item);
        }
        Ok(items)
    }

    /// Reads one atom or one balanced list
    ///
    /// Returns `Ok(None)` at end of input. A stray `)` fails with
    /// [`Error::UnmatchedCloseParen`] and input ending inside a list fails
    /// with [`Error::UnmatchedOpenParen`].
    pub fn read_top_level_item(&mut self) -> Result<Option<Expression>> {
        let Some(token) = self.pull()? else {
            return Ok(None);
        };

        match token.kind {
            TokenKind::LeftParen => self.read_list_at(1).map(Some),
            TokenKind::RightParen => Err(Error::UnmatchedCloseParen),
            TokenKind::Word => Ok(Some(Expression::Atom(token.lexeme))),
        }
    }

    /// Reads the rest of a list whose `(` has already been consumed
    pub fn read_list(&mut self) -> Result<Expression> {
        self.read_list_at(1)
    }

    fn read_list_at(&mut self, depth: usize) -> Result<Expression> {
        if depth > self.max_depth {
            self.skip_open_lists(depth)?;
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        // Elements are collected and consed from the right, so long flat
        // lists cost no stack; only nesting recurses.
        let mut items = Vec::new();
        loop {
            let Some(token) = self.pull()? else {
                return Err(Error::UnmatchedOpenParen);
            };
            match token.kind {
                TokenKind::LeftParen => items.push(self.read_list_at(depth + 1)?),
                TokenKind::RightParen => return Ok(Expression::list(items)),
                TokenKind::Word => items.push(Expression::Atom(token.lexeme)),
            }
        }
    }

    /// Discards tokens until `open` already-consumed `(` are balanced
    ///
    /// Leaves the source at the next top-level item, or at end of input.
    fn skip_open_lists(&mut self, mut open: usize) -> Result<()> {
        while open > 0 {
            let Some(token) = self.pull()? else {
                break;
            };
            match token.kind {
                TokenKind::LeftParen => open += 1,
                TokenKind::RightParen => open -= 1,
                TokenKind::Word => {}
            }
        }
        Ok(())
    }

    fn pull(&mut self) -> Result<Option<Token>> {
        let token = self.source.next_token()?;
        if let Some(token) = &token {
            tracing::debug!(token = %token, offset = token.offset, "pulled token");
        }
        Ok(token)
    }
}
