//! Recursive descent grammar for function bodies.
//!
//! The parser accepts the statement and expression subset that the C
//! translator can express and rejects everything else with
//! [`ParseError::Unsupported`], naming the construct. Nodes are allocated
//! into a [`NodeArena`] in the order their parse completes, so children
//! always have smaller ids than their parents.
//!
//! # Layout
//!
//! - `stmt.rs`: statements, suites and `for` iterables
//! - `expr.rs`: expressions by precedence level

mod expr;
mod stmt;

use pyc_ir::{Body, LineIndex, Name, NodeArena, NodeId, NodeKind, NodeRange, Span, StringInterner};

use crate::cursor::Cursor;
use crate::token::Token;
use crate::ParseError;

/// Parser state for one function body.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: NodeArena,
    names: StringInterner,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token], source: &'a str, lines: &'a LineIndex) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source, lines),
            arena: NodeArena::with_capacity(source.len()),
            names: StringInterner::new(),
        }
    }

    /// Parse statements until end of input.
    ///
    /// The returned body has an empty line index; the caller owns the index
    /// the cursor borrows and installs it afterwards.
    pub(crate) fn parse_body(mut self) -> Result<Body, ParseError> {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            self.parse_statement(&mut stmts)?;
        }
        Ok(Body {
            arena: self.arena,
            names: self.names,
            stmts,
            lines: LineIndex::default(),
        })
    }

    fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.arena.alloc(kind, span)
    }

    fn alloc_list(&mut self, ids: &[NodeId]) -> NodeRange {
        self.arena.alloc_list(ids)
    }

    fn intern(&mut self, text: &str) -> Name {
        self.names.intern(text)
    }

    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }

    fn unsupported(&self, construct: &str, span: Span) -> ParseError {
        ParseError::unsupported(construct, self.cursor.location(span))
    }

    fn syntax(&self, message: impl Into<String>, span: Span) -> ParseError {
        ParseError::syntax(message, self.cursor.location(span))
    }
}
