//! Expression Code Generation
//!
//! Renders expression nodes as C expressions. Parentheses are inserted only
//! where C precedence would otherwise regroup the operands, so `x + 1` stays
//! `x + 1` and `(a + b) * c` keeps its parentheses.

use pyc_ir::{ensure_sufficient_stack, BinaryOp, Body, CompareOp, LogicalOp, NodeId, NodeKind, UnaryOp};

// C binding strength, higher binds tighter.
const CONDITIONAL: u8 = 1;
const LOGICAL_OR: u8 = 2;
const LOGICAL_AND: u8 = 3;
const BIT_OR: u8 = 4;
const BIT_XOR: u8 = 5;
const BIT_AND: u8 = 6;
const EQUALITY: u8 = 7;
const RELATIONAL: u8 = 8;
const SHIFT: u8 = 9;
const ADDITIVE: u8 = 10;
const MULTIPLICATIVE: u8 = 11;
const UNARY: u8 = 12;
const POSTFIX: u8 = 13;
const PRIMARY: u8 = 14;

/// Render an expression node as C.
pub(crate) fn render_expr(body: &Body, id: NodeId) -> String {
    expr(body, id).0
}

/// Rendered text plus the binding strength of its outermost operator.
fn expr(body: &Body, id: NodeId) -> (String, u8) {
    ensure_sufficient_stack(|| expr_inner(body, id))
}

fn expr_inner(body: &Body, id: NodeId) -> (String, u8) {
    match *body.arena.kind(id) {
        NodeKind::Int(i64::MIN) => ("INT64_MIN".to_owned(), PRIMARY),
        NodeKind::Int(n) if n < 0 => (n.to_string(), UNARY),
        NodeKind::Int(n) => (n.to_string(), PRIMARY),
        NodeKind::Float(bits) => float(f64::from_bits(bits)),
        NodeKind::Bool(b) => (if b { "true" } else { "false" }.to_owned(), PRIMARY),
        NodeKind::List(elements) => {
            let elements: Vec<String> = body
                .arena
                .get_list(elements)
                .iter()
                .map(|&e| render_expr(body, e))
                .collect();
            (format!("{{{}}}", elements.join(", ")), PRIMARY)
        }

        NodeKind::Var(name) => (body.name(name).to_owned(), PRIMARY),
        NodeKind::Attr { var, attr } => (
            format!("{}.{}", body.name(var), body.name(attr)),
            POSTFIX,
        ),
        NodeKind::Subscript { value, index } => (
            format!(
                "{}[{}]",
                operand(body, value, POSTFIX),
                render_expr(body, index)
            ),
            POSTFIX,
        ),
        NodeKind::Call { func, args } => {
            let args: Vec<String> = body
                .arena
                .get_list(args)
                .iter()
                .map(|&a| render_expr(body, a))
                .collect();
            (format!("{}({})", body.name(func), args.join(", ")), POSTFIX)
        }

        NodeKind::Unary { op, operand: inner } => {
            let sign = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Plus => "+",
                UnaryOp::Not => "!",
                UnaryOp::BitNot => "~",
            };
            let mut text = operand(body, inner, UNARY);
            // `- -x` must not collapse into the decrement token.
            if text.starts_with(sign) && matches!(op, UnaryOp::Neg | UnaryOp::Plus) {
                text = format!("({text})");
            }
            (format!("{sign}{text}"), UNARY)
        }
        NodeKind::Binary { op, left, right } => match binary_op(op) {
            Some((sym, prec)) => infix(body, left, sym, right, prec),
            None => (
                format!("pow({}, {})", render_expr(body, left), render_expr(body, right)),
                POSTFIX,
            ),
        },
        NodeKind::Compare { op, left, right } => {
            let (sym, prec) = match op {
                CompareOp::Eq => ("==", EQUALITY),
                CompareOp::NotEq => ("!=", EQUALITY),
                CompareOp::Lt => ("<", RELATIONAL),
                CompareOp::LtEq => ("<=", RELATIONAL),
                CompareOp::Gt => (">", RELATIONAL),
                CompareOp::GtEq => (">=", RELATIONAL),
            };
            infix(body, left, sym, right, prec)
        }
        NodeKind::Logical { op, left, right } => match op {
            LogicalOp::And => infix(body, left, "&&", right, LOGICAL_AND),
            LogicalOp::Or => infix(body, left, "||", right, LOGICAL_OR),
        },
        NodeKind::Conditional {
            test,
            then,
            otherwise,
        } => (
            format!(
                "{} ? {} : {}",
                operand(body, test, LOGICAL_OR),
                render_expr(body, then),
                operand(body, otherwise, CONDITIONAL)
            ),
            CONDITIONAL,
        ),

        // Statements never appear in expression position.
        NodeKind::Assign { .. }
        | NodeKind::AugAssign { .. }
        | NodeKind::If { .. }
        | NodeKind::While { .. }
        | NodeKind::For { .. }
        | NodeKind::Return(_)
        | NodeKind::ExprStmt(_)
        | NodeKind::Pass
        | NodeKind::Break
        | NodeKind::Continue => (String::new(), PRIMARY),
    }
}

/// Render `id`, parenthesized if it binds looser than `min`.
fn operand(body: &Body, id: NodeId, min: u8) -> String {
    let (text, prec) = expr(body, id);
    if prec < min {
        format!("({text})")
    } else {
        text
    }
}

/// Left-associative infix operator.
fn infix(body: &Body, left: NodeId, sym: &str, right: NodeId, prec: u8) -> (String, u8) {
    (
        format!(
            "{} {sym} {}",
            operand(body, left, prec),
            operand(body, right, prec + 1)
        ),
        prec,
    )
}

/// C operator and strength; `None` for `**`, which has no C operator.
fn binary_op(op: BinaryOp) -> Option<(&'static str, u8)> {
    let pair = match op {
        BinaryOp::Add => ("+", ADDITIVE),
        BinaryOp::Sub => ("-", ADDITIVE),
        BinaryOp::Mul => ("*", MULTIPLICATIVE),
        // Floor division lowers to C division, which truncates.
        BinaryOp::Div | BinaryOp::FloorDiv => ("/", MULTIPLICATIVE),
        BinaryOp::Mod => ("%", MULTIPLICATIVE),
        BinaryOp::Shl => ("<<", SHIFT),
        BinaryOp::Shr => (">>", SHIFT),
        BinaryOp::BitAnd => ("&", BIT_AND),
        BinaryOp::BitXor => ("^", BIT_XOR),
        BinaryOp::BitOr => ("|", BIT_OR),
        BinaryOp::Pow => return None,
    };
    Some(pair)
}

fn float(f: f64) -> (String, u8) {
    let text = if f.is_nan() {
        "NAN".to_owned()
    } else if f.is_infinite() {
        if f.is_sign_positive() { "INFINITY" } else { "-INFINITY" }.to_owned()
    } else {
        format!("{f:?}")
    };
    let prec = if text.starts_with('-') { UNARY } else { PRIMARY };
    (text, prec)
}
