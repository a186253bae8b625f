//! Parsed function body.

use super::{LineIndex, Name, NodeArena, NodeId, NodeKind, StringInterner};

/// The node sequence of one function body, with the arena and interner that
/// own its nodes and names.
///
/// `stmts` holds the top-level statements in source order. It is built once
/// by the parser; analysis passes only read it.
#[derive(Clone, Debug, Default)]
pub struct Body {
    pub arena: NodeArena,
    pub names: StringInterner,
    pub stmts: Vec<NodeId>,
    pub lines: LineIndex,
}

impl Body {
    /// Resolve an interned name.
    #[inline]
    pub fn name(&self, name: Name) -> &str {
        self.names.lookup(name)
    }

    /// 1-based (line, column) where a node starts.
    pub fn line_col(&self, id: NodeId) -> (u32, u32) {
        self.lines.line_col(self.arena.span(id).start)
    }

    /// Root variable of an assignment target or reference.
    ///
    /// `x`, `x.field` and `x[i][j]` all have root `x`. Other kinds have none.
    pub fn root_name(&self, mut id: NodeId) -> Option<Name> {
        loop {
            match *self.arena.kind(id) {
                NodeKind::Var(name) | NodeKind::Attr { var: name, .. } => return Some(name),
                NodeKind::Subscript { value, .. } => id = value,
                _ => return None,
            }
        }
    }
}
