//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use pyc_ir::{LineIndex, Span};

use crate::token::{Token, TokenKind};
use crate::ParseError;

/// Cursor over a lexed token list.
///
/// The list always ends with `Eof`, so `current()` is valid at every
/// position; advancing past `Eof` is a no-op.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    source: &'a str,
    lines: &'a LineIndex,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(tokens: &'a [Token], source: &'a str, lines: &'a LineIndex) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token stream must end with Eof"
        );
        Cursor {
            tokens,
            source,
            lines,
            pos: 0,
        }
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> Token {
        self.peek(0)
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Look `n` tokens ahead. Past the end this is the `Eof` token.
    pub fn peek(&self, n: usize) -> Token {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens
            .get((self.pos + n).min(last))
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY))
    }

    /// Kind of the token `n` ahead.
    #[inline]
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.peek(n).kind
    }

    /// Get the previous token's span.
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span,
            None => Span::DUMMY,
        }
    }

    /// Check if at end of input.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Check if the current token is exactly `kind`.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Advance to the next token, returning the consumed one.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or report what was found instead.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Consume an identifier and return its text.
    pub fn expect_ident(&mut self) -> Result<&'a str, ParseError> {
        let token = self.expect(TokenKind::Ident)?;
        Ok(self.text(token.span))
    }

    /// Syntax error at the current token.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        ParseError::syntax(
            format!("expected {expected}, found {}", token.kind.describe()),
            self.location(token.span),
        )
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> &'a str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    /// 1-based (line, column) where `span` starts.
    pub fn location(&self, span: Span) -> (u32, u32) {
        self.lines.line_col(span.start)
    }
}
