//! List binding.
//!
//! `collect_lists` pairs every list-valued assignment with its own target
//! node. `tie_lists` then points each pair at the variable's canonical
//! declaration node, so that all literals assigned to one name share a
//! single declaration.

use std::convert::Infallible;

use pyc_ir::visitor::{walk_body, walk_node, Visitor};
use pyc_ir::{Body, NodeId, NodeKind};

use crate::context::ListBinding;
use crate::{TranslateError, TranslationContext};

/// Append a binding for every assignment of a list literal to a plain name,
/// at any depth, in source order.
#[tracing::instrument(level = "debug", skip_all)]
pub fn collect_lists(ctx: TranslationContext, body: &Body) -> TranslationContext {
    let mut pass = ListCollector { ctx };
    walk_body(&mut pass, body).unwrap_or_else(|never| match never {});
    tracing::debug!(count = pass.ctx.lists.len(), "collected list bindings");
    pass.ctx
}

/// Replace each binding's declaration with the variable's declaration node.
#[tracing::instrument(level = "debug", skip_all)]
pub fn tie_lists(
    mut ctx: TranslationContext,
    body: &Body,
) -> Result<TranslationContext, TranslateError> {
    let TranslationContext {
        variables, lists, ..
    } = &mut ctx;
    for binding in lists.bindings_mut() {
        let Some(var) = variables.get(binding.name) else {
            return Err(TranslateError::unresolved_variable(
                body.name(binding.name),
                "list assignment",
                body.line_col(binding.list),
            ));
        };
        if binding.decl != var.decl {
            tracing::trace!(name = body.name(binding.name), from = ?binding.decl, to = ?var.decl, "tie");
            binding.decl = var.decl;
        }
    }
    Ok(ctx)
}

struct ListCollector {
    ctx: TranslationContext,
}

impl Visitor for ListCollector {
    type Error = Infallible;

    fn visit_node(&mut self, id: NodeId, body: &Body) -> Result<(), Self::Error> {
        if let NodeKind::Assign { target, value } = *body.arena.kind(id) {
            if let (NodeKind::List(_), &NodeKind::Var(name)) =
                (body.arena.kind(value), body.arena.kind(target))
            {
                self.ctx.lists.push(ListBinding {
                    name,
                    decl: target,
                    list: value,
                });
            }
        }
        walk_node(self, id, body)
    }
}
