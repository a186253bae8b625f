//! C Code Generation
//!
//! [`CRenderer`] implements [`NodeRenderer`] for C99:
//!
//! - `expr.rs`: expressions, parenthesized by C precedence
//! - `stmt.rs`: statements and nested blocks
//!
//! Output assumes `<stdint.h>`, `<stdbool.h>` and `<math.h>` are in scope
//! (`int64_t`, `bool`, `pow`).

mod expr;
mod stmt;

use pyc_ir::{Body, NodeId};

use crate::context::{ListTable, Variable};
use crate::frontend::NodeRenderer;
use crate::types::CType;
use crate::{TranslateError, TranslationContext};

pub(crate) use expr::render_expr;

/// C99 node renderer.
#[derive(Copy, Clone, Debug, Default)]
pub struct CRenderer;

impl NodeRenderer for CRenderer {
    fn render(
        &self,
        body: &Body,
        id: NodeId,
        lists: Option<&ListTable>,
        indent: usize,
    ) -> Result<String, TranslateError> {
        let mut writer = stmt::StmtWriter::new(body, lists, indent);
        writer.stmt(id)?;
        Ok(writer.finish())
    }

    fn render_declaration(
        &self,
        body: &Body,
        ctx: &TranslationContext,
        var: &Variable,
    ) -> Result<String, TranslateError> {
        let name = body.name(var.name);
        let fields = ctx.attributes.fields(var.name);
        if !fields.is_empty() {
            let Some(field_ty) = var.ty.scalar() else {
                return Err(TranslateError::unresolved_type(name, body.line_col(var.decl)));
            };
            let members: Vec<String> = fields
                .iter()
                .map(|&field| format!("{field_ty} {};", body.name(field)))
                .collect();
            return Ok(format!("struct {{ {} }} {name};", members.join(" ")));
        }

        let len = match var.ty {
            CType::Array(_) => ctx
                .lists
                .bindings()
                .iter()
                .filter(|b| b.decl == var.decl)
                .map(|b| list_len(body, b.list))
                .max()
                .ok_or_else(|| {
                    TranslateError::unresolved_variable(
                        name,
                        "array declaration",
                        body.line_col(var.decl),
                    )
                })?,
            _ => 0,
        };
        Ok(format!("{};", var.ty.declare(name, len)))
    }
}

/// Element count of a list literal node.
pub(crate) fn list_len(body: &Body, list: NodeId) -> usize {
    match *body.arena.kind(list) {
        pyc_ir::NodeKind::List(elements) => elements.len(),
        _ => 0,
    }
}
