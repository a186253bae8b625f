use pretty_assertions::assert_eq;

use super::*;
use crate::types::Scalar;

fn from_text(text: &str) -> Result<FunctionSignature, TranslateError> {
    let header = pyc_parse::parse_header(text).unwrap_or_else(|err| panic!("{err}"));
    FunctionSignature::from_header(&header)
}

#[test]
fn annotated_header() {
    let sig = from_text("def test_fun(a: int, b: int) -> int:").unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(
        sig,
        FunctionSignature::new(
            "test_fun",
            vec![Param::new("a", CType::INT64), Param::new("b", CType::INT64)],
            CType::INT64,
        )
    );
    assert_eq!(sig.declaration(), "int64_t test_fun(int64_t a, int64_t b)");
}

#[test]
fn list_parameters_become_pointers() {
    let sig = from_text("def total(xs: list[float], n: int) -> float:")
        .unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(sig.params[0].ty, CType::Pointer(Scalar::Double));
    assert_eq!(sig.declaration(), "double total(double *xs, int64_t n)");
}

#[test]
fn void_returns() {
    let none = from_text("def f(flag: bool) -> None:").unwrap_or_else(|err| panic!("{err}"));
    let absent = from_text("def f(flag: bool):").unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(none, absent);
    assert_eq!(none.declaration(), "void f(bool flag)");
}

#[test]
fn no_parameters() {
    let sig = FunctionSignature::new("tick", Vec::new(), CType::Void);
    assert_eq!(sig.declaration(), "void tick(void)");
}

#[test]
fn missing_parameter_annotation() {
    assert_eq!(
        from_text("def f(a: int, b) -> int:").err(),
        Some(TranslateError::UnresolvedType {
            name: "b".to_owned(),
            line: 1,
            column: 15,
        })
    );
}

#[test]
fn unknown_annotations() {
    assert!(matches!(
        from_text("def f(s: str):"),
        Err(TranslateError::UnresolvedType { ref name, .. }) if name == "s"
    ));
    assert!(matches!(
        from_text("def f(a: None):"),
        Err(TranslateError::UnresolvedType { ref name, .. }) if name == "a"
    ));
    assert!(matches!(
        from_text("def f(a: int) -> list[int]:"),
        Err(TranslateError::UnresolvedType { ref name, .. }) if name == "f"
    ));
}
