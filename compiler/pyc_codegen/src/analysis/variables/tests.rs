use pretty_assertions::assert_eq;

use pyc_ir::Body;

use super::*;
use crate::types::Scalar;

fn parse(source: &str) -> Body {
    pyc_parse::parse_body(source).unwrap_or_else(|err| panic!("parse failed: {err}"))
}

fn infer(source: &str) -> (Body, Result<TranslationContext, TranslateError>) {
    let body = parse(source);
    let result = infer_variables(TranslationContext::new(), &body);
    (body, result)
}

/// (name, type) pairs in registration order.
fn declared(source: &str) -> Vec<(String, CType)> {
    let (body, result) = infer(source);
    let ctx = result.unwrap_or_else(|err| panic!("inference failed: {err}"));
    ctx.variables
        .iter()
        .map(|v| (body.name(v.name).to_owned(), v.ty))
        .collect()
}

#[test]
fn reference_function_registers_only_x() {
    let source = "x = 0\nwhile x < 3:\n    if a == b:\n        x = x + 1\nreturn x\n";
    assert_eq!(declared(source), vec![("x".to_owned(), CType::INT64)]);
}

#[test]
fn literal_table() {
    assert_eq!(
        declared("i = 1\nf = 2.5\nb = False\ny = [1, 2, 3]\nz = [1, 2.0]"),
        vec![
            ("i".to_owned(), CType::INT64),
            ("f".to_owned(), CType::DOUBLE),
            ("b".to_owned(), CType::BOOL),
            ("y".to_owned(), CType::Array(Scalar::Int64)),
            ("z".to_owned(), CType::Array(Scalar::Double)),
        ]
    );
}

#[test]
fn first_assignment_wins() {
    let (body, result) = infer("x = 1\nx = 2.0\nx = y");
    let ctx = result.unwrap_or_else(|err| panic!("{err}"));
    let x = body.names.get("x").unwrap_or_else(|| panic!("x not interned"));
    let var = ctx.variables.get(x).unwrap_or_else(|| panic!("x not registered"));
    let NodeKind::Assign { target, .. } = *body.arena.kind(body.stmts[0]) else {
        panic!("expected assignment");
    };
    assert_eq!(var.ty, CType::INT64);
    assert_eq!(var.decl, target);
}

#[test]
fn nested_assignments_register_in_source_order() {
    assert_eq!(
        declared("if c:\n    b = 1.0\nelse:\n    a = 1\nwhile c:\n    d = True\n"),
        vec![
            ("b".to_owned(), CType::DOUBLE),
            ("a".to_owned(), CType::INT64),
            ("d".to_owned(), CType::BOOL),
        ]
    );
}

#[test]
fn attribute_target_registers_the_variable() {
    assert_eq!(
        declared("p.x = 1.0\np.y = 2"),
        vec![("p".to_owned(), CType::DOUBLE)]
    );
}

#[test]
fn non_literal_value_is_unresolved_type() {
    let (_, result) = infer("x = 1\n\nw = x");
    assert_eq!(
        result.err(),
        Some(TranslateError::UnresolvedType {
            name: "w".to_owned(),
            line: 3,
            column: 1,
        })
    );
}

#[test]
fn empty_or_mixed_list_is_unresolved_type() {
    let (_, result) = infer("y = []");
    assert!(matches!(result, Err(TranslateError::UnresolvedType { ref name, .. }) if name == "y"));
    let (_, result) = infer("y = [1, x]");
    assert!(matches!(result, Err(TranslateError::UnresolvedType { ref name, .. }) if name == "y"));
}

#[test]
fn subscript_on_unassigned_name_is_unresolved_variable() {
    let (_, result) = infer("y[0] = 1");
    assert_eq!(
        result.err(),
        Some(TranslateError::UnresolvedVariable {
            name: "y".to_owned(),
            usage: "subscript assignment",
            line: 1,
            column: 1,
        })
    );
}

#[test]
fn augmented_assignment_needs_a_declaration() {
    let (_, result) = infer("x += 1");
    assert!(matches!(
        result,
        Err(TranslateError::UnresolvedVariable { usage: "augmented assignment", .. })
    ));
    assert_eq!(declared("x = 0\nx += 1"), vec![("x".to_owned(), CType::INT64)]);
}

#[test]
fn parameters_are_never_declared() {
    let body = parse("a = 5\nxs[0] = 1.0\na += 1");
    let params = ["a", "xs"].map(|p| body.names.get(p).unwrap_or_else(|| panic!("{p}")));
    let ctx = infer_variables(TranslationContext::with_parameters(params), &body)
        .unwrap_or_else(|err| panic!("{err}"));
    assert!(ctx.variables.is_empty());
}

// === Loop targets ===

#[test]
fn loop_target_is_in_scope_inside_its_loop() {
    assert_eq!(
        declared("t = 0\nfor i in range(n):\n    i += 1\n    t = i\n    i = 7\n"),
        vec![("t".to_owned(), CType::INT64)]
    );
    assert_eq!(
        declared("s = 0.0\nfor y in ys:\n    y *= 2.0\n    s += y\n"),
        vec![("s".to_owned(), CType::DOUBLE)]
    );
}

#[test]
fn reading_a_loop_target_after_its_loop_is_unresolved_variable() {
    let (_, result) = infer("t = 0\nfor i in range(n):\n    t = i\nreturn i\n");
    assert_eq!(
        result.err(),
        Some(TranslateError::UnresolvedVariable {
            name: "i".to_owned(),
            usage: "code after its loop",
            line: 4,
            column: 8,
        })
    );

    // A local of the same name is shadowed by the loop, so it is stale too.
    let (_, result) = infer("i = 0\nfor i in range(n):\n    pass\nx = i + 1\n");
    assert!(matches!(
        result,
        Err(TranslateError::UnresolvedVariable { usage: "code after its loop", .. })
    ));

    let (_, result) = infer("for i in range(n):\n    pass\ni += 1\n");
    assert!(matches!(result, Err(TranslateError::UnresolvedVariable { .. })));
}

#[test]
fn rebinding_after_the_loop_declares_a_local() {
    assert_eq!(
        declared("for i in range(n):\n    pass\ni = 3\nreturn i\n"),
        vec![("i".to_owned(), CType::INT64)]
    );
    // An inner loop reusing the name leaves the outer one in scope.
    assert_eq!(
        declared("for i in range(n):\n    for i in range(2):\n        pass\n    t = 1\n    t += i\n"),
        vec![("t".to_owned(), CType::INT64)]
    );
}

// === List values on element and field targets ===

#[test]
fn list_stored_into_an_element_is_unresolved_type() {
    let (_, result) = infer("ys = [1, 2]\nys[0] = [3, 4, 5]\n");
    assert_eq!(
        result.err(),
        Some(TranslateError::UnresolvedType {
            name: "ys".to_owned(),
            line: 2,
            column: 1,
        })
    );
}

#[test]
fn list_stored_into_a_field_is_unresolved_type() {
    let (_, result) = infer("p.lo = 0.0\np.xs = [1.0, 2.0]\n");
    assert_eq!(
        result.err(),
        Some(TranslateError::UnresolvedType {
            name: "p.xs".to_owned(),
            line: 2,
            column: 1,
        })
    );
}
