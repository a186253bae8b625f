//! Node arena.
//!
//! Nodes live in one contiguous `Vec` indexed by [`NodeId`]; child lists
//! (statement blocks, call arguments, list elements) live in a second flat
//! `Vec<NodeId>` indexed by [`NodeRange`].

use super::span::to_u32;
use super::{Node, NodeId, NodeKind, NodeRange, Span};

/// Arena owning every node of one function body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeArena {
    nodes: Vec<Node>,
    node_lists: Vec<NodeId>,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena pre-allocated based on source length.
    ///
    /// Heuristic: roughly one node per 8 bytes of body text.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        NodeArena {
            nodes: Vec::with_capacity(estimated),
            node_lists: Vec::with_capacity(estimated / 2),
        }
    }

    /// Allocate a node, returning its ID.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(to_u32(self.nodes.len()));
        self.nodes.push(Node::new(kind, span));
        id
    }

    /// Get a node.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a node's kind.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    /// Get a node's span.
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).span
    }

    /// Allocate a contiguous child list.
    pub fn alloc_list(&mut self, ids: &[NodeId]) -> NodeRange {
        if ids.is_empty() {
            return NodeRange::EMPTY;
        }
        let start = to_u32(self.node_lists.len());
        self.node_lists.extend_from_slice(ids);
        NodeRange::new(start, to_u32(ids.len()))
    }

    /// Get the ids of a child list.
    pub fn get_list(&self, range: NodeRange) -> &[NodeId] {
        if range.is_empty() {
            return &[];
        }
        let start = range.start as usize;
        &self.node_lists[start..start + range.len()]
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes have been allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
