//! C type model.
//!
//! Covers the handful of types the translator can produce: the fixed literal
//! table (`int64_t`, `double`, `bool`), `void` returns, pointer parameters for
//! list annotations, and fixed-size arrays for list-valued locals.

use std::fmt;

use pyc_ir::{Body, NodeKind, NodeRange};

/// Element type of pointers and arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    Int64,
    Double,
    Bool,
}

impl Scalar {
    /// C spelling.
    pub fn c_name(self) -> &'static str {
        match self {
            Scalar::Int64 => "int64_t",
            Scalar::Double => "double",
            Scalar::Bool => "bool",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

/// A C type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CType {
    Void,
    Scalar(Scalar),
    /// Pointer parameter (`int64_t *xs`).
    Pointer(Scalar),
    /// Fixed-size local array. The length is chosen at emission.
    Array(Scalar),
}

impl CType {
    pub const INT64: CType = CType::Scalar(Scalar::Int64);
    pub const DOUBLE: CType = CType::Scalar(Scalar::Double);
    pub const BOOL: CType = CType::Scalar(Scalar::Bool);

    /// Element or scalar type; `None` for `void`.
    pub fn scalar(self) -> Option<Scalar> {
        match self {
            CType::Void => None,
            CType::Scalar(s) | CType::Pointer(s) | CType::Array(s) => Some(s),
        }
    }

    /// Type of an assignment's right-hand side, when it is a literal.
    ///
    /// Scalars follow the fixed table. A non-empty list of numeric literals
    /// is an array of `double` if any element is a float, else of `int64_t`.
    pub fn of_literal(body: &Body, kind: &NodeKind) -> Option<CType> {
        match *kind {
            NodeKind::Int(_) => Some(CType::INT64),
            NodeKind::Float(_) => Some(CType::DOUBLE),
            NodeKind::Bool(_) => Some(CType::BOOL),
            NodeKind::List(elements) => list_element(body, elements).map(CType::Array),
            _ => None,
        }
    }

    /// Map a header annotation onto a parameter or return type.
    ///
    /// `None` maps to `void`, which is only meaningful as a return type.
    pub fn from_annotation(text: &str) -> Option<CType> {
        let ty = match text {
            "int" => CType::INT64,
            "float" => CType::DOUBLE,
            "bool" => CType::BOOL,
            "None" => CType::Void,
            _ => {
                let inner = text
                    .strip_prefix("list[")
                    .or_else(|| text.strip_prefix("List["))?
                    .strip_suffix(']')?;
                match CType::from_annotation(inner)? {
                    CType::Scalar(s) => CType::Pointer(s),
                    _ => return None,
                }
            }
        };
        Some(ty)
    }

    /// Render a declarator: `int64_t x`, `double *xs`, `int64_t y[3]`.
    ///
    /// `len` is the array length and is ignored for other types.
    pub fn declare(self, name: &str, len: usize) -> String {
        match self {
            CType::Void => format!("void {name}"),
            CType::Scalar(s) => format!("{s} {name}"),
            CType::Pointer(s) => format!("{s} *{name}"),
            CType::Array(s) => format!("{s} {name}[{len}]"),
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CType::Void => f.write_str("void"),
            CType::Scalar(s) => write!(f, "{s}"),
            CType::Pointer(s) => write!(f, "{s} *"),
            CType::Array(s) => write!(f, "{s}[]"),
        }
    }
}

/// Element type of a list literal: numeric literals only, at least one.
pub fn list_element(body: &Body, elements: NodeRange) -> Option<Scalar> {
    let elements = body.arena.get_list(elements);
    if elements.is_empty() {
        return None;
    }
    let mut scalar = Scalar::Int64;
    for &element in elements {
        match body.arena.kind(element) {
            NodeKind::Int(_) => {}
            NodeKind::Float(_) => scalar = Scalar::Double,
            _ => return None,
        }
    }
    Some(scalar)
}
