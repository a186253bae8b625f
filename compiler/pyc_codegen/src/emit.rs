//! Body text emission.
//!
//! Produces the declaration block followed by the statement block. Every
//! registered local gets exactly one declaration line, in first-assignment
//! order. Loops and conditionals receive the list table so that loops over
//! list variables, at any depth, can find their bounds.

use pyc_ir::{Body, NodeKind};

use crate::frontend::NodeRenderer;
use crate::{TranslateError, TranslationContext};

/// Render `body` using the analysed context.
///
/// Lines are joined with `\n`; there is no trailing newline.
#[tracing::instrument(level = "debug", skip_all)]
pub fn emit<R: NodeRenderer + ?Sized>(
    body: &Body,
    ctx: &TranslationContext,
    renderer: &R,
) -> Result<String, TranslateError> {
    let mut blocks = Vec::with_capacity(ctx.variables.len() + body.stmts.len());
    for var in ctx.variables.iter() {
        blocks.push(renderer.render_declaration(body, ctx, var)?);
    }
    for &id in &body.stmts {
        let lists = match body.arena.kind(id) {
            NodeKind::While { .. } | NodeKind::For { .. } | NodeKind::If { .. } => Some(&ctx.lists),
            _ => None,
        };
        let text = renderer.render(body, id, lists, 0)?;
        tracing::trace!(node = ?id, text = %text, "emitted statement");
        blocks.push(text);
    }
    tracing::debug!(
        declarations = ctx.variables.len(),
        statements = body.stmts.len(),
        "emitted body"
    );
    Ok(blocks.join("\n"))
}

#[cfg(test)]
mod tests;
