//! pyc parse - Parser for the annotated Python subset
//!
//! Turns the text of a function body into a [`Body`] of arena-allocated
//! nodes, and a `def` line into a [`FunctionHeader`].
//!
//! # Accepted subset
//!
//! - Assignment to `name`, `name.field` or `name[index]`, and augmented
//!   assignment
//! - `if`/`elif`/`else`, `while`, `for NAME in range(...)`, `for NAME in NAME`
//! - `return [expr]`, `pass`, `break`, `continue`, calls as statements
//! - Integer, float, boolean and list literals
//! - Arithmetic, bitwise, comparison, boolean and conditional expressions
//!
//! Docstrings are dropped. Everything else valid in the host language is
//! rejected with [`ParseError::Unsupported`] rather than guessed at.
//!
//! # Design
//!
//! The lexer emits explicit `Indent`/`Dedent`/`Newline` tokens, so the
//! recursive descent grammar never looks at whitespace.

mod cursor;
mod error;
mod grammar;
mod header;
mod lexer;
mod token;

use pyc_ir::{Body, LineIndex};

pub use error::ParseError;
pub use header::{parse_header, Annotation, FunctionHeader, HeaderParam};
pub use lexer::lex;
pub use token::{Token, TokenKind};

/// Parse the text of a function body (header already removed).
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn parse_body(text: &str) -> Result<Body, ParseError> {
    let lines = LineIndex::new(text);
    let tokens = lex(text, &lines)?;
    let mut body = grammar::Parser::new(&tokens, text, &lines).parse_body()?;
    body.lines = lines;
    tracing::debug!(
        stmts = body.stmts.len(),
        nodes = body.arena.len(),
        "parsed body"
    );
    Ok(body)
}

/// The host-language parser as a value, for code that takes the parser as a
/// pluggable collaborator.
#[derive(Copy, Clone, Debug, Default)]
pub struct PythonParser;

impl PythonParser {
    /// See [`parse_body`].
    pub fn parse_body(self, text: &str) -> Result<Body, ParseError> {
        parse_body(text)
    }

    /// See [`parse_header`].
    pub fn parse_header(self, text: &str) -> Result<FunctionHeader, ParseError> {
        parse_header(text)
    }
}
