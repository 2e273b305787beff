//! Position into a token sequence
//!
//! The cursor borrows the tokens and is `Copy`, so the parser can take a
//! snapshot, probe ahead on the copy and drop it without touching the
//! real position.

use super::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Token at the current position, `None` past the end
    pub fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    /// Token one past the current position
    pub fn peek_next(&self) -> Option<&'t Token> {
        self.tokens.get(self.position + 1)
    }

    /// Current token, or the final one once the cursor has run past it
    pub fn current_or_last(&self) -> Option<&'t Token> {
        self.current().or_else(|| self.tokens.last())
    }

    /// Move forward one token; a no-op once past the end
    pub fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub fn matches(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    /// Advance past the current token if it is of `kind`
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.matches(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True at the end-of-input token or past the end of the sequence
    pub fn is_at_end(&self) -> bool {
        self.current().map_or(true, |t| t.kind == TokenKind::Eof)
    }
}
