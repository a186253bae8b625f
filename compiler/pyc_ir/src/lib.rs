//! pyc IR - Internal Node Representation
//!
//! This crate contains the data structures shared by the pyc parser and the
//! C code generator:
//! - Spans and line/column lookup for source locations
//! - Names for interned identifiers
//! - A closed catalogue of node kinds (statements and expressions)
//! - Arena allocation for nodes, addressed by `NodeId`
//! - A fallible visitor with exhaustive child traversal
//! - Stack growth for recursion over deeply nested nodes
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers become `Name(u32)`
//! - **Flatten Everything**: no `Box<Node>`, children are `NodeId` indices and
//!   child lists are `NodeRange`s into one flat list
//! - **Identity is an index**: two references denote the same node exactly
//!   when their `NodeId`s are equal
//!
//! Float literals are stored as `u64` bits so every node kind is `Eq + Hash`.

mod arena;
mod body;
mod interner;
mod name;
mod node;
mod span;
mod stack;
pub mod visitor;

pub use arena::NodeArena;
pub use body::Body;
pub use interner::StringInterner;
pub use name::Name;
pub use node::{
    BinaryOp, CompareOp, LogicalOp, LoopIter, Node, NodeId, NodeKind, NodeRange, UnaryOp,
};
pub use span::{LineIndex, Span};
pub use stack::ensure_sufficient_stack;
