//! Statement Code Generation
//!
//! Renders one statement, with any nested blocks, as indented C lines.

use pyc_ir::visitor::{walk_node, walk_range, Visitor};
use pyc_ir::{ensure_sufficient_stack, BinaryOp, Body, LoopIter, Name, NodeId, NodeKind, NodeRange};

use super::{list_len, render_expr};
use crate::context::{ListBinding, ListTable};
use crate::types::list_element;
use crate::TranslateError;

/// Line writer for one statement.
pub(super) struct StmtWriter<'a> {
    body: &'a Body,
    lists: Option<&'a ListTable>,
    indent: usize,
    output: String,
}

impl<'a> StmtWriter<'a> {
    pub(super) fn new(body: &'a Body, lists: Option<&'a ListTable>, indent: usize) -> Self {
        StmtWriter {
            body,
            lists,
            indent,
            output: String::new(),
        }
    }

    /// Take the output without its final newline.
    pub(super) fn finish(mut self) -> String {
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        self.output
    }

    fn writeln(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn expr(&self, id: NodeId) -> String {
        render_expr(self.body, id)
    }

    /// Write `stmts` one level deeper.
    fn block(&mut self, stmts: NodeRange) -> Result<(), TranslateError> {
        let body = self.body;
        self.indent += 1;
        for &id in body.arena.get_list(stmts) {
            self.stmt(id)?;
        }
        self.indent -= 1;
        Ok(())
    }

    pub(super) fn stmt(&mut self, id: NodeId) -> Result<(), TranslateError> {
        ensure_sufficient_stack(|| self.stmt_inner(id))
    }

    fn stmt_inner(&mut self, id: NodeId) -> Result<(), TranslateError> {
        match *self.body.arena.kind(id) {
            NodeKind::Assign { target, value } => self.assign(target, value),
            NodeKind::AugAssign { op, target, value } => {
                let target = self.expr(target);
                let value = self.expr(value);
                let line = match op {
                    BinaryOp::Pow => format!("{target} = pow({target}, {value});"),
                    BinaryOp::FloorDiv => format!("{target} /= {value};"),
                    _ => format!("{target} {}= {value};", op.as_str()),
                };
                self.writeln(&line);
            }
            NodeKind::If {
                test,
                then_branch,
                else_branch,
            } => self.if_chain(test, then_branch, else_branch)?,
            NodeKind::While { test, body } => {
                let line = format!("while ({}) {{", self.expr(test));
                self.writeln(&line);
                self.block(body)?;
                self.writeln("}");
            }
            NodeKind::For { target, iter, body } => {
                match iter {
                    LoopIter::Range { start, stop, step } => {
                        let rebind = writes_to(self.body, body, target);
                        self.range_header(target, start, stop, step, rebind);
                    }
                    LoopIter::List(list) => self.list_header(id, target, list)?,
                }
                self.block(body)?;
                self.writeln("}");
            }
            NodeKind::Return(None) => self.writeln("return;"),
            NodeKind::Return(Some(value)) => {
                let line = format!("return {};", self.expr(value));
                self.writeln(&line);
            }
            NodeKind::ExprStmt(value) => {
                let line = format!("{};", self.expr(value));
                self.writeln(&line);
            }
            NodeKind::Pass => self.writeln(";"),
            NodeKind::Break => self.writeln("break;"),
            NodeKind::Continue => self.writeln("continue;"),
            _ => {
                let line = format!("{};", self.expr(id));
                self.writeln(&line);
            }
        }
        Ok(())
    }

    /// `x = e;`, or one store per element for a list value.
    fn assign(&mut self, target: NodeId, value: NodeId) {
        let target = self.expr(target);
        match *self.body.arena.kind(value) {
            NodeKind::List(elements) if elements.is_empty() => self.writeln(";"),
            NodeKind::List(elements) => {
                let body = self.body;
                for (i, &element) in body.arena.get_list(elements).iter().enumerate() {
                    let line = format!("{target}[{i}] = {};", self.expr(element));
                    self.writeln(&line);
                }
            }
            _ => {
                let line = format!("{target} = {};", self.expr(value));
                self.writeln(&line);
            }
        }
    }

    fn if_chain(
        &mut self,
        test: NodeId,
        then_branch: NodeRange,
        else_branch: NodeRange,
    ) -> Result<(), TranslateError> {
        let line = format!("if ({}) {{", self.expr(test));
        self.writeln(&line);
        self.block(then_branch)?;

        let body = self.body;
        let mut rest = else_branch;
        loop {
            match body.arena.get_list(rest) {
                [] => break,
                // `elif` arrives as a lone nested `if`.
                &[only] => {
                    if let NodeKind::If {
                        test,
                        then_branch,
                        else_branch,
                    } = *body.arena.kind(only)
                    {
                        let line = format!("}} else if ({}) {{", self.expr(test));
                        self.writeln(&line);
                        self.block(then_branch)?;
                        rest = else_branch;
                        continue;
                    }
                    self.writeln("} else {");
                    self.block(rest)?;
                    break;
                }
                _ => {
                    self.writeln("} else {");
                    self.block(rest)?;
                    break;
                }
            }
        }
        self.writeln("}");
        Ok(())
    }

    /// `for` header over a range.
    ///
    /// When the loop body writes the target, the loop runs on a hidden
    /// counter and the target is a fresh copy each iteration, so the writes
    /// cannot change the iteration count.
    fn range_header(&mut self, target: Name, start: NodeId, stop: NodeId, step: i64, rebind: bool) {
        let var = self.body.name(target);
        let counter = if rebind {
            format!("_{var}_i")
        } else {
            var.to_owned()
        };
        let (cmp, update) = match step {
            1 => ("<", format!("{counter}++")),
            s if s > 0 => ("<", format!("{counter} += {s}")),
            s => (">", format!("{counter} -= {}", s.unsigned_abs())),
        };
        let line = format!(
            "for (int64_t {counter} = {}; {counter} {cmp} {}; {update}) {{",
            self.expr(start),
            self.expr(stop)
        );
        self.writeln(&line);
        if rebind {
            self.indent += 1;
            self.writeln(&format!("int64_t {var} = {counter};"));
            self.indent -= 1;
        }
    }

    /// Counter loop over a list variable, binding each element to `target`.
    ///
    /// The bound is the length of the last list literal assigned to the
    /// variable before the loop, or of the first one when none precedes it.
    fn list_header(&mut self, loop_id: NodeId, target: Name, list: Name) -> Result<(), TranslateError> {
        let body = self.body;
        let name = body.name(list);
        let unresolved =
            || TranslateError::unresolved_variable(name, "loop iterable", body.line_col(loop_id));

        let bindings: Vec<&ListBinding> = self
            .lists
            .ok_or_else(unresolved)?
            .for_name(list)
            .collect();
        let first = *bindings.first().ok_or_else(unresolved)?;

        let loop_span = body.arena.span(loop_id);
        let bound = bindings
            .iter()
            .rev()
            .find(|b| body.arena.span(b.list).precedes(loop_span))
            .copied()
            .unwrap_or(first);
        let len = list_len(body, bound.list);

        let element = bindings
            .iter()
            .find_map(|b| match *body.arena.kind(b.list) {
                NodeKind::List(elements) => list_element(body, elements),
                _ => None,
            })
            .ok_or_else(|| TranslateError::unresolved_type(name, body.line_col(loop_id)))?;

        let var = body.name(target);
        let counter = format!("_{var}_i");
        self.writeln(&format!(
            "for (int64_t {counter} = 0; {counter} < {len}; {counter}++) {{"
        ));
        self.indent += 1;
        self.writeln(&format!("{element} {var} = {name}[{counter}];"));
        self.indent -= 1;
        Ok(())
    }
}

/// Whether a statement in `block`, at any depth, assigns to the name `var`.
fn writes_to(body: &Body, block: NodeRange, var: Name) -> bool {
    struct FindWrite(Name);

    impl Visitor for FindWrite {
        type Error = NodeId;

        fn visit_node(&mut self, id: NodeId, body: &Body) -> Result<(), NodeId> {
            if let NodeKind::Assign { target, .. } | NodeKind::AugAssign { target, .. } =
                *body.arena.kind(id)
            {
                if *body.arena.kind(target) == NodeKind::Var(self.0) {
                    return Err(id);
                }
            }
            walk_node(self, id, body)
        }
    }

    walk_range(&mut FindWrite(var), block, body).is_err()
}
