use pretty_assertions::assert_eq;

use super::*;

fn parse_ok(text: &str) -> FunctionHeader {
    parse_header(text).unwrap_or_else(|err| panic!("header failed: {err}"))
}

/// (name, annotation text) pairs.
fn params(header: &FunctionHeader) -> Vec<(&str, Option<&str>)> {
    header
        .params
        .iter()
        .map(|p| {
            (
                p.name.as_str(),
                p.annotation.as_ref().map(|a| a.text.as_str()),
            )
        })
        .collect()
}

#[test]
fn annotated_header() {
    let header = parse_ok("def test_fun(a: int, b: int) -> int:");
    assert_eq!(header.name, "test_fun");
    assert_eq!(params(&header), vec![("a", Some("int")), ("b", Some("int"))]);
    assert_eq!(
        header.returns,
        Some(Annotation {
            text: "int".to_owned(),
            location: (1, 33),
        })
    );
}

#[test]
fn parameter_locations() {
    let header = parse_ok("def f(a: int,\n      b: float):");
    assert_eq!(header.params[0].location, (1, 7));
    assert_eq!(header.params[1].location, (2, 7));
    assert_eq!(
        header.params[1].annotation.as_ref().map(|a| a.location),
        Some((2, 10))
    );
}

#[test]
fn no_params_no_return() {
    assert_eq!(parse_ok("def f():"), FunctionHeader {
        name: "f".to_owned(),
        params: Vec::new(),
        returns: None,
    });
}

#[test]
fn multiline_header_with_generic_annotations() {
    let header = parse_ok("def g(\n    xs: list[ float ],  # samples\n    n,\n) -> None:\n");
    assert_eq!(params(&header), vec![("xs", Some("list[float]")), ("n", None)]);
    assert_eq!(header.returns.map(|a| a.text), Some("None".to_owned()));
}

#[test]
fn defaults_are_skipped() {
    let header = parse_ok("def h(a: float = 1.0, b=(1, 2)) -> float:");
    assert_eq!(params(&header), vec![("a", Some("float")), ("b", None)]);
}

#[test]
fn variadic_parameters_are_unsupported() {
    let err = parse_header("def f(*args):");
    assert!(err.is_err_and(|e| e.is_unsupported()));
    let err = parse_header("def f(a, /, b):");
    assert!(err.is_err_and(|e| e.is_unsupported()));
}

#[test]
fn missing_colon_is_a_syntax_error() {
    let err = parse_header("def f(a)");
    assert!(err.is_err_and(|e| !e.is_unsupported()));
}

#[test]
fn trailing_statement_is_rejected() {
    let err = parse_header("def f(a): return a");
    assert!(err.is_err_and(|e| !e.is_unsupported()));
}
