//! Pluggable collaborators of the translation pipeline.
//!
//! The pipeline only needs two things from the outside world: something
//! that turns source text into nodes, and something that turns nodes into
//! target text. Both are traits so either side can be swapped without
//! touching the analysis passes.

use pyc_ir::{Body, NodeId};
use pyc_parse::{FunctionHeader, ParseError, PythonParser};

use crate::context::{ListTable, Variable};
use crate::{TranslateError, TranslationContext};

/// Converts host source text into a [`Body`] and a header.
pub trait StatementParser {
    /// Parse a function body whose header has already been removed.
    fn parse_body(&self, text: &str) -> Result<Body, ParseError>;

    /// Parse a `def` header.
    fn parse_header(&self, text: &str) -> Result<FunctionHeader, ParseError>;
}

impl StatementParser for PythonParser {
    fn parse_body(&self, text: &str) -> Result<Body, ParseError> {
        pyc_parse::parse_body(text)
    }

    fn parse_header(&self, text: &str) -> Result<FunctionHeader, ParseError> {
        pyc_parse::parse_header(text)
    }
}

/// Renders nodes as target-language text.
pub trait NodeRenderer {
    /// Render one statement at `indent` levels of four spaces.
    ///
    /// `lists` is the list table for loops that iterate list variables;
    /// compound statements forward it to their nested statements.
    fn render(
        &self,
        body: &Body,
        id: NodeId,
        lists: Option<&ListTable>,
        indent: usize,
    ) -> Result<String, TranslateError>;

    /// Render the declaration line of one local.
    fn render_declaration(
        &self,
        body: &Body,
        ctx: &TranslationContext,
        var: &Variable,
    ) -> Result<String, TranslateError>;
}
