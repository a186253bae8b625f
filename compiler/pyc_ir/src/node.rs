//! Node catalogue.
//!
//! Statements and expressions share one closed enumeration so every analysis
//! pass can match exhaustively. Children are referenced by [`NodeId`] and
//! child lists by [`NodeRange`], both resolved through the
//! [`NodeArena`](crate::NodeArena).

use std::fmt;

use super::{Name, Span};

/// Index into the node arena.
///
/// Two references denote the same node instance exactly when their ids are
/// equal.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Range of node ids in the arena's flattened child lists.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct NodeRange {
    pub start: u32,
    pub len: u32,
}

impl NodeRange {
    /// Empty range.
    pub const EMPTY: NodeRange = NodeRange { start: 0, len: 0 };

    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        NodeRange { start, len }
    }

    /// Check if the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of ids in the range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

/// Arithmetic and bitwise operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// Host-language spelling, used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }
}

/// Comparison operators. Comparisons never chain.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

/// Short-circuit boolean operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOp {
    And,
    Or,
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
}

/// What a `for` loop iterates over.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LoopIter {
    /// `range(start, stop, step)`; `step` is a nonzero literal.
    Range {
        start: NodeId,
        stop: NodeId,
        step: i64,
    },
    /// A list-valued variable.
    List(Name),
}

/// Node kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    // Literals
    /// Integer literal.
    Int(i64),
    /// Float literal, stored as `f64::to_bits`.
    Float(u64),
    /// `True` / `False`.
    Bool(bool),
    /// List literal.
    List(NodeRange),

    // References
    /// Variable reference.
    Var(Name),
    /// Attribute reference `var.attr`.
    Attr { var: Name, attr: Name },
    /// Subscript `value[index]`.
    Subscript { value: NodeId, index: NodeId },

    // Operators
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Compare {
        op: CompareOp,
        left: NodeId,
        right: NodeId,
    },
    Logical {
        op: LogicalOp,
        left: NodeId,
        right: NodeId,
    },
    /// `then if test else otherwise`.
    Conditional {
        test: NodeId,
        then: NodeId,
        otherwise: NodeId,
    },
    /// Call of a plain function name.
    Call { func: Name, args: NodeRange },

    // Statements
    Assign {
        target: NodeId,
        value: NodeId,
    },
    AugAssign {
        op: BinaryOp,
        target: NodeId,
        value: NodeId,
    },
    /// `elif` chains are nested `If` nodes in `else_branch`.
    If {
        test: NodeId,
        then_branch: NodeRange,
        else_branch: NodeRange,
    },
    While {
        test: NodeId,
        body: NodeRange,
    },
    For {
        target: Name,
        iter: LoopIter,
        body: NodeRange,
    },
    Return(Option<NodeId>),
    /// Expression evaluated for its effect (a call).
    ExprStmt(NodeId),
    Pass,
    Break,
    Continue,
}

impl NodeKind {
    /// Float literal value, if this is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            NodeKind::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }

    /// Returns `true` for the scalar literal kinds.
    pub fn is_scalar_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::Int(_) | NodeKind::Float(_) | NodeKind::Bool(_)
        )
    }

    /// Short description of the kind, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Int(_) => "integer literal",
            NodeKind::Float(_) => "float literal",
            NodeKind::Bool(_) => "boolean literal",
            NodeKind::List(_) => "list literal",
            NodeKind::Var(_) => "variable",
            NodeKind::Attr { .. } => "attribute",
            NodeKind::Subscript { .. } => "subscript",
            NodeKind::Unary { .. } => "unary expression",
            NodeKind::Binary { .. } => "binary expression",
            NodeKind::Compare { .. } => "comparison",
            NodeKind::Logical { .. } => "boolean expression",
            NodeKind::Conditional { .. } => "conditional expression",
            NodeKind::Call { .. } => "call",
            NodeKind::Assign { .. } => "assignment",
            NodeKind::AugAssign { .. } => "augmented assignment",
            NodeKind::If { .. } => "if statement",
            NodeKind::While { .. } => "while loop",
            NodeKind::For { .. } => "for loop",
            NodeKind::Return(_) => "return",
            NodeKind::ExprStmt(_) => "expression statement",
            NodeKind::Pass => "pass",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
        }
    }
}

/// A node: kind plus source location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    /// Create a new node.
    #[inline]
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }
}
