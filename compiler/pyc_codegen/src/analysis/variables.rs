//! Variable type inference.
//!
//! Registers every local on its first assignment, in depth-first source
//! order, with the type of the assigned literal. Later assignments to a
//! registered name are not re-evaluated. Loop targets are tracked by scope
//! and never registered.

use pyc_ir::visitor::{walk_body, walk_node, walk_range, Visitor};
use pyc_ir::{Body, LoopIter, Name, NodeId, NodeKind, NodeRange};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::context::Variable;
use crate::types::CType;
use crate::{TranslateError, TranslationContext};

/// Register a declared type for every first-assigned name.
///
/// A `for` target is in scope inside its loop body only. It needs no
/// declaration there, and reading it after the loop is an error until a
/// plain assignment rebinds it.
///
/// Errors:
/// - `UnresolvedType` when a first assignment's value is not a literal the
///   type table covers, or when a list literal is stored through a subscript
///   or attribute
/// - `UnresolvedVariable` when a subscript or augmented assignment targets a
///   name that was never assigned, or a loop target is read after its loop
#[tracing::instrument(level = "debug", skip_all)]
pub fn infer_variables(
    ctx: TranslationContext,
    body: &Body,
) -> Result<TranslationContext, TranslateError> {
    let mut pass = VariableInference {
        ctx,
        loop_targets: SmallVec::new(),
        ended_loops: FxHashSet::default(),
    };
    walk_body(&mut pass, body)?;
    tracing::debug!(count = pass.ctx.variables.len(), "inferred variables");
    Ok(pass.ctx)
}

struct VariableInference {
    ctx: TranslationContext,
    /// Targets of the enclosing `for` loops, innermost last.
    loop_targets: SmallVec<[Name; 4]>,
    /// Loop targets whose loop has ended and that have not been rebound.
    ended_loops: FxHashSet<Name>,
}

impl VariableInference {
    fn in_scope(&self, name: Name) -> bool {
        self.ctx.is_known(name) || self.loop_targets.contains(&name)
    }

    fn assign(&mut self, target: NodeId, value: NodeId, body: &Body) -> Result<(), TranslateError> {
        let list_value = matches!(body.arena.kind(value), NodeKind::List(_));
        match *body.arena.kind(target) {
            NodeKind::Var(name) => {
                self.ended_loops.remove(&name);
                self.declare(name, target, value, body)
            }
            NodeKind::Attr { var, attr } if list_value => Err(TranslateError::unresolved_type(
                format!("{}.{}", body.name(var), body.name(attr)),
                body.line_col(target),
            )),
            NodeKind::Attr { var, .. } => self.declare(var, target, value, body),
            _ if list_value => {
                let name = body.root_name(target).map_or("subscript", |n| body.name(n));
                Err(TranslateError::unresolved_type(name, body.line_col(target)))
            }
            _ => self.require_known(target, "subscript assignment", body),
        }
    }

    /// Register `name` with the literal type of `value` unless it is already
    /// in scope.
    fn declare(
        &mut self,
        name: Name,
        target: NodeId,
        value: NodeId,
        body: &Body,
    ) -> Result<(), TranslateError> {
        if self.in_scope(name) {
            return Ok(());
        }
        let Some(ty) = CType::of_literal(body, body.arena.kind(value)) else {
            return Err(TranslateError::unresolved_type(
                body.name(name),
                body.line_col(target),
            ));
        };
        self.ctx.variables.register(Variable {
            name,
            decl: target,
            ty,
        });
        tracing::debug!(name = body.name(name), %ty, "registered variable");
        Ok(())
    }

    /// The root of `target` must already be a local, a parameter or an
    /// enclosing loop target.
    fn require_known(
        &self,
        target: NodeId,
        usage: &'static str,
        body: &Body,
    ) -> Result<(), TranslateError> {
        match body.root_name(target) {
            Some(name) if !self.in_scope(name) => Err(TranslateError::unresolved_variable(
                body.name(name),
                usage,
                body.line_col(target),
            )),
            _ => Ok(()),
        }
    }

    fn for_loop(
        &mut self,
        target: Name,
        iter: LoopIter,
        block: NodeRange,
        body: &Body,
    ) -> Result<(), TranslateError> {
        if let LoopIter::Range { start, stop, .. } = iter {
            self.visit_node(start, body)?;
            self.visit_node(stop, body)?;
        }
        self.loop_targets.push(target);
        walk_range(self, block, body)?;
        self.loop_targets.pop();
        if !self.loop_targets.contains(&target) {
            self.ended_loops.insert(target);
        }
        Ok(())
    }
}

impl Visitor for VariableInference {
    type Error = TranslateError;

    fn visit_node(&mut self, id: NodeId, body: &Body) -> Result<(), Self::Error> {
        match *body.arena.kind(id) {
            // The value is read before the target is bound.
            NodeKind::Assign { target, value } => {
                self.visit_node(value, body)?;
                self.assign(target, value, body)?;
                return self.visit_node(target, body);
            }
            NodeKind::AugAssign { target, .. } => {
                self.require_known(target, "augmented assignment", body)?;
            }
            NodeKind::For {
                target,
                iter,
                body: block,
            } => return self.for_loop(target, iter, block, body),
            NodeKind::Var(name)
                if self.ended_loops.contains(&name) && !self.loop_targets.contains(&name) =>
            {
                return Err(TranslateError::unresolved_variable(
                    body.name(name),
                    "code after its loop",
                    body.line_col(id),
                ));
            }
            _ => {}
        }
        walk_node(self, id, body)
    }
}

#[cfg(test)]
mod tests;
