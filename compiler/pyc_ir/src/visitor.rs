//! Node Visitor Pattern
//!
//! Provides generic depth-first traversal of a [`Body`]. Analysis passes
//! implement [`Visitor`] and override `visit_node` to act on the kinds they
//! care about, calling [`walk_node`] to continue into children.
//!
//! # Design
//!
//! Visiting is fallible: a pass stops at the first error it reports and the
//! error propagates out of [`walk_body`]. The visitor may mutate its own
//! state; the body itself is only borrowed.
//!
//! Children are visited in source order, so a pre-order visitor sees nodes in
//! the order they appear in the text.
//!
//! # Example
//!
//! ```text
//! struct CountAssignments {
//!     count: usize,
//! }
//!
//! impl Visitor for CountAssignments {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_node(&mut self, id: NodeId, body: &Body) -> Result<(), Self::Error> {
//!         if let NodeKind::Assign { .. } = body.arena.kind(id) {
//!             self.count += 1;
//!         }
//!         walk_node(self, id, body)
//!     }
//! }
//! ```

use super::{ensure_sufficient_stack, Body, LoopIter, NodeId, NodeKind, NodeRange};

/// Fallible node visitor.
pub trait Visitor {
    /// Error a visit can fail with.
    type Error;

    /// Visit a node. The default walks its children.
    fn visit_node(&mut self, id: NodeId, body: &Body) -> Result<(), Self::Error> {
        walk_node(self, id, body)
    }
}

/// Visit every top-level statement in order.
pub fn walk_body<V: Visitor + ?Sized>(visitor: &mut V, body: &Body) -> Result<(), V::Error> {
    for &id in &body.stmts {
        visitor.visit_node(id, body)?;
    }
    Ok(())
}

/// Visit the children of `id` in source order.
pub fn walk_node<V: Visitor + ?Sized>(
    visitor: &mut V,
    id: NodeId,
    body: &Body,
) -> Result<(), V::Error> {
    ensure_sufficient_stack(|| walk_children(visitor, id, body))
}

fn walk_children<V: Visitor + ?Sized>(
    visitor: &mut V,
    id: NodeId,
    body: &Body,
) -> Result<(), V::Error> {
    match *body.arena.kind(id) {
        NodeKind::Int(_)
        | NodeKind::Float(_)
        | NodeKind::Bool(_)
        | NodeKind::Var(_)
        | NodeKind::Attr { .. }
        | NodeKind::Pass
        | NodeKind::Break
        | NodeKind::Continue
        | NodeKind::Return(None) => Ok(()),

        NodeKind::List(elements) | NodeKind::Call { args: elements, .. } => {
            walk_range(visitor, elements, body)
        }
        NodeKind::Subscript { value, index } => {
            visitor.visit_node(value, body)?;
            visitor.visit_node(index, body)
        }
        NodeKind::Unary { operand, .. } => visitor.visit_node(operand, body),
        NodeKind::Binary { left, right, .. }
        | NodeKind::Compare { left, right, .. }
        | NodeKind::Logical { left, right, .. } => {
            visitor.visit_node(left, body)?;
            visitor.visit_node(right, body)
        }
        // Source order is `then if test else otherwise`.
        NodeKind::Conditional {
            test,
            then,
            otherwise,
        } => {
            visitor.visit_node(then, body)?;
            visitor.visit_node(test, body)?;
            visitor.visit_node(otherwise, body)
        }
        NodeKind::Assign { target, value } | NodeKind::AugAssign { target, value, .. } => {
            visitor.visit_node(target, body)?;
            visitor.visit_node(value, body)
        }
        NodeKind::If {
            test,
            then_branch,
            else_branch,
        } => {
            visitor.visit_node(test, body)?;
            walk_range(visitor, then_branch, body)?;
            walk_range(visitor, else_branch, body)
        }
        NodeKind::While { test, body: block } => {
            visitor.visit_node(test, body)?;
            walk_range(visitor, block, body)
        }
        NodeKind::For {
            iter, body: block, ..
        } => {
            if let LoopIter::Range { start, stop, .. } = iter {
                visitor.visit_node(start, body)?;
                visitor.visit_node(stop, body)?;
            }
            walk_range(visitor, block, body)
        }
        NodeKind::Return(Some(value)) | NodeKind::ExprStmt(value) => {
            visitor.visit_node(value, body)
        }
    }
}

/// Visit every node of a child list in order.
pub fn walk_range<V: Visitor + ?Sized>(
    visitor: &mut V,
    range: NodeRange,
    body: &Body,
) -> Result<(), V::Error> {
    for &id in body.arena.get_list(range) {
        visitor.visit_node(id, body)?;
    }
    Ok(())
}
