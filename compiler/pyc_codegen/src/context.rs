//! Translation context.
//!
//! One [`TranslationContext`] exists per function translation. It is created
//! empty, passed by value through the analysis passes, read by the emitter
//! and then dropped.
//!
//! # Registries
//!
//! - [`Variables`]: declared locals in first-assignment order
//! - [`Attributes`]: distinct field names accessed on each variable
//! - [`ListTable`]: (declaration, list literal) pairs in source order

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use pyc_ir::{Name, NodeId};

use crate::types::CType;

/// A declared local.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: Name,
    /// Target node of the first assignment.
    pub decl: NodeId,
    pub ty: CType,
}

/// Declared locals, in first-assignment order.
///
/// Registration never overwrites: the first assignment wins.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    order: Vec<Variable>,
    index: FxHashMap<Name, usize>,
}

impl Variables {
    /// Register a variable unless the name is already present.
    ///
    /// Returns `true` if it was newly registered.
    pub fn register(&mut self, var: Variable) -> bool {
        if self.index.contains_key(&var.name) {
            return false;
        }
        self.index.insert(var.name, self.order.len());
        self.order.push(var);
        true
    }

    pub fn get(&self, name: Name) -> Option<&Variable> {
        self.index.get(&name).map(|&i| &self.order[i])
    }

    pub fn contains(&self, name: Name) -> bool {
        self.index.contains_key(&name)
    }

    /// Variables in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Field names accessed per variable.
///
/// Each set keeps first-access order and holds no duplicates.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    fields: FxHashMap<Name, SmallVec<[Name; 4]>>,
}

impl Attributes {
    /// Record `field` for `var`. Returns `true` if it was new.
    pub fn record(&mut self, var: Name, field: Name) -> bool {
        let fields = self.fields.entry(var).or_default();
        if fields.contains(&field) {
            return false;
        }
        fields.push(field);
        true
    }

    /// Fields of `var` in first-access order; empty if none.
    pub fn fields(&self, var: Name) -> &[Name] {
        self.fields.get(&var).map_or(&[], |fields| fields.as_slice())
    }

    /// Number of variables with at least one field.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A list-valued assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListBinding {
    /// Root variable of the assignment target.
    pub name: Name,
    /// Declaration node. Starts as the assignment's own target and is
    /// replaced by the canonical declaration when lists are tied.
    pub decl: NodeId,
    /// The list literal node.
    pub list: NodeId,
}

/// List bindings in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListTable {
    bindings: Vec<ListBinding>,
}

impl ListTable {
    pub fn push(&mut self, binding: ListBinding) {
        self.bindings.push(binding);
    }

    /// All bindings in source order.
    pub fn bindings(&self) -> &[ListBinding] {
        &self.bindings
    }

    pub(crate) fn bindings_mut(&mut self) -> &mut [ListBinding] {
        &mut self.bindings
    }

    /// Bindings of one variable, in source order.
    pub fn for_name(&self, name: Name) -> impl Iterator<Item = &ListBinding> {
        self.bindings.iter().filter(move |b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Per-function registries filled by the analysis passes.
#[derive(Clone, Debug, Default)]
pub struct TranslationContext {
    pub variables: Variables,
    pub attributes: Attributes,
    pub lists: ListTable,
    /// Function parameters. They are declared by the signature, so
    /// assignments to them never register a local.
    pub parameters: FxHashSet<Name>,
}

impl TranslationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context that knows the function's parameters.
    pub fn with_parameters(parameters: impl IntoIterator<Item = Name>) -> Self {
        TranslationContext {
            parameters: parameters.into_iter().collect(),
            ..Self::default()
        }
    }

    /// `true` if `name` is a registered local or a parameter.
    pub fn is_known(&self, name: Name) -> bool {
        self.variables.contains(name) || self.parameters.contains(&name)
    }
}
