use pretty_assertions::assert_eq;

use super::*;

fn extract(source: &str) -> ExtractedBody {
    extract_body(source, 1).unwrap_or_else(|err| panic!("extraction failed: {err}"))
}

#[test]
fn single_line_header() {
    let extracted = extract("def f(a: int, b: int) -> int:\n    x = 0\n    return x\n");
    assert_eq!(
        extracted,
        ExtractedBody {
            header: Some("def f(a: int, b: int) -> int:".to_owned()),
            body: "x = 0\nreturn x".to_owned(),
        }
    );
}

#[test]
fn multi_line_header_with_nested_defaults() {
    let source = "def g(a: int = max(1, (2)),\n      b: float = (3.0)) -> float:\n    if a:\n        return a + b\n    return b\n";
    let extracted = extract(source);
    assert_eq!(
        extracted.header.as_deref(),
        Some("def g(a: int = max(1, (2)),\n      b: float = (3.0)) -> float:")
    );
    assert_eq!(extracted.body, "if a:\n    return a + b\nreturn b");
}

#[test]
fn parens_in_strings_and_comments_are_ignored() {
    let source = "def h(s=\")\",  # (\n      t='(') -> None:\n    pass\n";
    assert_eq!(extract(source).body, "pass");
}

#[test]
fn leading_comments_and_decorators_are_skipped() {
    let source = "# helper\n\n@cache(\n    size=1)\n@trace\ndef f(a: int):\n    pass\n";
    assert_eq!(extract(source).header.as_deref(), Some("def f(a: int):"));
}

#[test]
fn comment_after_header_colon() {
    assert_eq!(extract("def f(a):  # note\n    return a").body, "return a");
}

#[test]
fn body_without_header_is_unchanged() {
    let source = "x = 1\n    y = 2\n";
    assert_eq!(
        extract(source),
        ExtractedBody {
            header: None,
            body: source.to_owned(),
        }
    );
}

#[test]
fn indent_level_controls_dedent_width() {
    let source = "def f():\n        x = 1\n            y = 2\n\n      z = 3";
    let two = extract_body(source, 2).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(two.body, "x = 1\n    y = 2\n\nz = 3");
    let zero = extract_body(source, 0).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(zero.body, "        x = 1\n            y = 2\n\n      z = 3");
}

#[test]
fn missing_paren() {
    assert_eq!(
        extract_body("\ndef f:\n    pass\n", 1),
        Err(ExtractError::MissingParen { line: 2, column: 1 })
    );
}

#[test]
fn header_missing_its_closing_paren() {
    assert_eq!(
        extract_body("def f(a: int,\n      b: int:\n    pass\n", 1),
        Err(ExtractError::UnbalancedParens { line: 1, column: 6 })
    );
}

#[test]
fn statement_on_header_line() {
    assert_eq!(
        extract_body("def f(a): return a\n", 1),
        Err(ExtractError::SingleLineBody { line: 1, column: 11 })
    );
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_extract {
    use super::super::extract_body;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extraction_is_idempotent(body in "[a-ce-z0-9 =+:#()\n]{0,200}") {
            let source = format!("def f(a, b):\n{body}");
            let once = extract_body(&source, 1);
            prop_assert!(once.is_ok());
            let once = once.map(|e| e.body).unwrap_or_default();
            let twice = extract_body(&once, 1).map(|e| e.body);
            prop_assert_eq!(twice, Ok(once));
        }

        #[test]
        fn input_without_def_is_unchanged(source in "[^d]{0,200}") {
            let extracted = extract_body(&source, 1);
            prop_assert_eq!(
                extracted.map(|e| (e.header, e.body)),
                Ok((None, source.clone()))
            );
        }
    }
}
