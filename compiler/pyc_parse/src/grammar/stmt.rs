//! Statement parsing.
//!
//! Compound statements (`if`, `while`, `for`) own suites; everything else is
//! a simple statement, and several simple statements may share a line when
//! separated by `;`.

use pyc_ir::{ensure_sufficient_stack, LoopIter, NodeId, NodeKind, NodeRange, Span};

use super::Parser;
use crate::token::TokenKind;
use crate::ParseError;

impl Parser<'_> {
    /// Parse one statement (or one `;`-separated line) into `out`.
    pub(super) fn parse_statement(&mut self, out: &mut Vec<NodeId>) -> Result<(), ParseError> {
        let span = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Newline => {
                self.cursor.advance();
                Ok(())
            }
            TokenKind::Indent => Err(self.syntax("unexpected indent", span)),
            TokenKind::Dedent => Err(self.syntax("unexpected dedent", span)),
            TokenKind::If => {
                let id = self.parse_if()?;
                out.push(id);
                Ok(())
            }
            TokenKind::While => {
                let id = self.parse_while()?;
                out.push(id);
                Ok(())
            }
            TokenKind::For => {
                let id = self.parse_for()?;
                out.push(id);
                Ok(())
            }
            TokenKind::Elif | TokenKind::Else => {
                Err(self.cursor.unexpected("a statement"))
            }
            TokenKind::At => Err(self.unsupported("decorator", span)),
            _ => self.parse_simple_statements(out),
        }
    }

    /// Parse `simple (';' simple)* [';'] NEWLINE`.
    fn parse_simple_statements(&mut self, out: &mut Vec<NodeId>) -> Result<(), ParseError> {
        loop {
            if let Some(id) = self.parse_simple()? {
                out.push(id);
            }
            if !self.cursor.eat(TokenKind::Semicolon) {
                break;
            }
            if matches!(
                self.cursor.current_kind(),
                TokenKind::Newline | TokenKind::Eof
            ) {
                break;
            }
        }
        if self.cursor.is_at_end() {
            return Ok(());
        }
        self.cursor.expect(TokenKind::Newline)?;
        Ok(())
    }

    /// Parse a simple statement. Docstrings parse to `None`.
    fn parse_simple(&mut self) -> Result<Option<NodeId>, ParseError> {
        let span = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Pass => NodeKind::Pass,
            TokenKind::Break => NodeKind::Break,
            TokenKind::Continue => NodeKind::Continue,
            TokenKind::Return => return self.parse_return().map(Some),
            TokenKind::Def => return Err(self.unsupported("nested function definition", span)),
            TokenKind::Reserved(word) => {
                return Err(self.unsupported(&format!("`{word}` statement"), span));
            }
            TokenKind::Str if self.at_docstring() => {
                while self.cursor.eat(TokenKind::Str) {}
                return Ok(None);
            }
            _ => return self.parse_expression_statement().map(Some),
        };
        self.cursor.advance();
        Ok(Some(self.alloc(kind, span)))
    }

    /// A string-only statement is a docstring and is dropped.
    fn at_docstring(&self) -> bool {
        let mut n = 0;
        while self.cursor.peek_kind(n) == TokenKind::Str {
            n += 1;
        }
        is_statement_end(self.cursor.peek_kind(n))
    }

    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.advance().span;
        let value = if is_statement_end(self.cursor.current_kind()) {
            None
        } else if self.cursor.check(TokenKind::None) && is_statement_end(self.cursor.peek_kind(1))
        {
            self.cursor.advance();
            None
        } else {
            let value = self.parse_expr()?;
            self.reject_tuple()?;
            Some(value)
        };
        Ok(self.alloc(NodeKind::Return(value), self.span_from(start)))
    }

    fn parse_expression_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let target = self.parse_expr()?;
        self.reject_tuple()?;
        match self.cursor.current_kind() {
            TokenKind::Assign => {
                self.cursor.advance();
                self.check_target(target)?;
                let value = self.parse_expr()?;
                self.reject_tuple()?;
                if self.cursor.check(TokenKind::Assign) {
                    return Err(
                        self.unsupported("chained assignment", self.cursor.current_span())
                    );
                }
                Ok(self.alloc(NodeKind::Assign { target, value }, self.span_from(start)))
            }
            TokenKind::AugAssign(op) => {
                self.cursor.advance();
                self.check_target(target)?;
                let value = self.parse_expr()?;
                self.reject_tuple()?;
                Ok(self.alloc(
                    NodeKind::AugAssign { op, target, value },
                    self.span_from(start),
                ))
            }
            TokenKind::Colon => {
                Err(self.unsupported("annotated assignment", self.cursor.current_span()))
            }
            _ if matches!(self.arena.kind(target), NodeKind::Call { .. }) => {
                let span = self.span_from(start);
                Ok(self.alloc(NodeKind::ExprStmt(target), span))
            }
            _ => Err(self.unsupported("bare expression statement", start)),
        }
    }

    /// Targets are a variable, a field of a variable, or a subscript chain
    /// rooted at one of those.
    fn check_target(&self, target: NodeId) -> Result<(), ParseError> {
        let span = self.arena.span(target);
        match *self.arena.kind(target) {
            NodeKind::Var(_) | NodeKind::Attr { .. } => Ok(()),
            NodeKind::Subscript { value, .. } => match self.arena.kind(value) {
                NodeKind::Var(_) | NodeKind::Attr { .. } | NodeKind::Subscript { .. } => {
                    self.check_target(value)
                }
                _ => Err(self.unsupported("assignment to a subscripted expression", span)),
            },
            ref other => Err(self.syntax(format!("cannot assign to {}", other.describe()), span)),
        }
    }

    fn reject_tuple(&self) -> Result<(), ParseError> {
        if self.cursor.check(TokenKind::Comma) {
            return Err(self.unsupported("tuple", self.cursor.current_span()));
        }
        Ok(())
    }

    /// Parse `if`/`elif`. An `elif` chain nests as the sole statement of the
    /// else branch.
    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.advance().span;
        let test = self.parse_expr()?;
        let then_branch = self.parse_suite()?;
        let else_branch = match self.cursor.current_kind() {
            TokenKind::Elif => {
                let nested = self.parse_if()?;
                self.alloc_list(&[nested])
            }
            TokenKind::Else => {
                self.cursor.advance();
                self.parse_suite()?
            }
            _ => NodeRange::EMPTY,
        };
        Ok(self.alloc(
            NodeKind::If {
                test,
                then_branch,
                else_branch,
            },
            self.span_from(start),
        ))
    }

    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.advance().span;
        let test = self.parse_expr()?;
        let body = self.parse_suite()?;
        self.reject_loop_else()?;
        Ok(self.alloc(NodeKind::While { test, body }, self.span_from(start)))
    }

    fn parse_for(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.advance().span;
        let name = self.cursor.expect_ident()?;
        let target = self.intern(name);
        match self.cursor.current_kind() {
            TokenKind::In => {
                self.cursor.advance();
            }
            TokenKind::Comma => {
                return Err(self.unsupported(
                    "tuple unpacking in a `for` target",
                    self.cursor.current_span(),
                ));
            }
            _ => return Err(self.cursor.unexpected("`in`")),
        }
        let iter = self.parse_loop_iter()?;
        let body = self.parse_suite()?;
        self.reject_loop_else()?;
        Ok(self.alloc(
            NodeKind::For { target, iter, body },
            self.span_from(start),
        ))
    }

    /// `range(...)` with up to three arguments, or a bare list variable.
    fn parse_loop_iter(&mut self) -> Result<LoopIter, ParseError> {
        let span = self.cursor.current_span();
        if self.cursor.check(TokenKind::Ident) {
            let text = self.cursor.text(span);
            match self.cursor.peek_kind(1) {
                TokenKind::LParen if text == "range" => return self.parse_range(),
                TokenKind::Colon => {
                    self.cursor.advance();
                    return Ok(LoopIter::List(self.intern(text)));
                }
                _ => {}
            }
        }
        Err(self.unsupported(
            "`for` iterable other than `range(...)` or a list variable",
            span,
        ))
    }

    fn parse_range(&mut self) -> Result<LoopIter, ParseError> {
        let start = self.cursor.advance().span;
        self.cursor.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            args.push(self.parse_call_arg()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        let span = self.span_from(start);

        match *args.as_slice() {
            [stop] => {
                let at = self.arena.span(stop);
                let zero = self.alloc(NodeKind::Int(0), Span::new(at.start, at.start));
                Ok(LoopIter::Range {
                    start: zero,
                    stop,
                    step: 1,
                })
            }
            [start, stop] => Ok(LoopIter::Range {
                start,
                stop,
                step: 1,
            }),
            [start, stop, step] => match *self.arena.kind(step) {
                NodeKind::Int(0) => Err(self.syntax(
                    "`range` step must not be zero",
                    self.arena.span(step),
                )),
                NodeKind::Int(step) => Ok(LoopIter::Range { start, stop, step }),
                _ => Err(self.unsupported("non-literal `range` step", self.arena.span(step))),
            },
            _ => Err(self.syntax(
                format!("`range` expects 1 to 3 arguments, got {}", args.len()),
                span,
            )),
        }
    }

    fn reject_loop_else(&self) -> Result<(), ParseError> {
        if self.cursor.check(TokenKind::Else) {
            return Err(self.unsupported("loop `else` clause", self.cursor.current_span()));
        }
        Ok(())
    }

    /// Parse `':' (NEWLINE INDENT stmt+ DEDENT | simple_statements)`.
    fn parse_suite(&mut self) -> Result<NodeRange, ParseError> {
        ensure_sufficient_stack(|| self.parse_suite_inner())
    }

    fn parse_suite_inner(&mut self) -> Result<NodeRange, ParseError> {
        self.cursor.expect(TokenKind::Colon)?;
        let mut stmts = Vec::new();
        if self.cursor.eat(TokenKind::Newline) {
            if !self.cursor.eat(TokenKind::Indent) {
                return Err(self.cursor.unexpected("an indented block"));
            }
            while !self.cursor.check(TokenKind::Dedent) && !self.cursor.is_at_end() {
                self.parse_statement(&mut stmts)?;
            }
            self.cursor.eat(TokenKind::Dedent);
        } else {
            self.parse_simple_statements(&mut stmts)?;
        }
        Ok(self.alloc_list(&stmts))
    }
}

fn is_statement_end(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof
    )
}
