//! Attribute collection.

use pyc_ir::visitor::{walk_body, walk_node, Visitor};
use pyc_ir::{Body, NodeId, NodeKind};

use crate::{TranslateError, TranslationContext};

/// Record the field names accessed on each variable, in source order.
///
/// Every `name.field` node, whether read or written, must refer to a
/// registered local; anything else is `UnresolvedVariable`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn collect_attributes(
    ctx: TranslationContext,
    body: &Body,
) -> Result<TranslationContext, TranslateError> {
    let mut pass = AttributeCollector { ctx };
    walk_body(&mut pass, body)?;
    Ok(pass.ctx)
}

struct AttributeCollector {
    ctx: TranslationContext,
}

impl Visitor for AttributeCollector {
    type Error = TranslateError;

    fn visit_node(&mut self, id: NodeId, body: &Body) -> Result<(), Self::Error> {
        if let NodeKind::Attr { var, attr } = *body.arena.kind(id) {
            if !self.ctx.variables.contains(var) {
                return Err(TranslateError::unresolved_variable(
                    body.name(var),
                    "attribute access",
                    body.line_col(id),
                ));
            }
            if self.ctx.attributes.record(var, attr) {
                tracing::trace!(var = body.name(var), field = body.name(attr), "field");
            }
        }
        walk_node(self, id, body)
    }
}
