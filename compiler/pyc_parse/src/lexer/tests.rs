use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let lines = LineIndex::new(source);
    lex(source, &lines)
        .unwrap_or_else(|err| panic!("lex failed: {err}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn lex_err(source: &str) -> ParseError {
    let lines = LineIndex::new(source);
    match lex(source, &lines) {
        Ok(tokens) => panic!("expected an error, got {tokens:?}"),
        Err(err) => err,
    }
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    assert_eq!(kinds("\n\n   \n# only a comment\n"), vec![TokenKind::Eof]);
}

#[test]
fn simple_assignment() {
    assert_eq!(
        kinds("x = 1"),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Int(1),
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn indentation_produces_layout_tokens() {
    let source = "while x:\n    x = 0\n    if x:\n        pass\ny = 1\n";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::While,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Int(0),
            TokenKind::Newline,
            TokenKind::If,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Pass,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Dedent,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Int(1),
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn pending_dedents_close_at_eof() {
    assert_eq!(
        kinds("if a:\n    pass"),
        vec![
            TokenKind::If,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Pass,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn blank_and_comment_lines_do_not_affect_indentation() {
    let source = "if a:\n\n        # deep comment\n    pass\n";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::If,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Pass,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn brackets_join_lines() {
    assert_eq!(
        kinds("y = [1,\n        2]\n"),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::LBracket,
            TokenKind::Int(1),
            TokenKind::Comma,
            TokenKind::Int(2),
            TokenKind::RBracket,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn backslash_joins_lines() {
    assert_eq!(
        kinds("x = 1 + \\\n    2\n"),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Int(1),
            TokenKind::Plus,
            TokenKind::Int(2),
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn numbers() {
    assert_eq!(
        kinds("1_000 0x1F 0b101 0o17 2.5 .5 1e3 1.5e-2"),
        vec![
            TokenKind::Int(1000),
            TokenKind::Int(31),
            TokenKind::Int(5),
            TokenKind::Int(15),
            TokenKind::Float(2.5f64.to_bits()),
            TokenKind::Float(0.5f64.to_bits()),
            TokenKind::Float(1000.0f64.to_bits()),
            TokenKind::Float(0.015f64.to_bits()),
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn int_magnitude_beyond_i64_is_kept() {
    assert_eq!(
        kinds("9223372036854775808")[0],
        TokenKind::Int(9_223_372_036_854_775_808)
    );
}

#[test]
fn operators_use_maximal_munch() {
    assert_eq!(
        kinds("a **= b // c -> d <= e << f != g"),
        vec![
            TokenKind::Ident,
            TokenKind::AugAssign(BinaryOp::Pow),
            TokenKind::Ident,
            TokenKind::DoubleSlash,
            TokenKind::Ident,
            TokenKind::Arrow,
            TokenKind::Ident,
            TokenKind::LtEq,
            TokenKind::Ident,
            TokenKind::Shl,
            TokenKind::Ident,
            TokenKind::NotEq,
            TokenKind::Ident,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_and_reserved_words() {
    assert_eq!(
        kinds("def True None try lambda"),
        vec![
            TokenKind::Def,
            TokenKind::True,
            TokenKind::None,
            TokenKind::Reserved("try"),
            TokenKind::Reserved("lambda"),
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn strings_hide_their_contents() {
    assert_eq!(
        kinds("\"\"\"doc ( with\nparens\"\"\"\nr'a\\'b' f\"x\""),
        vec![
            TokenKind::Str,
            TokenKind::Newline,
            TokenKind::Str,
            TokenKind::Str,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn identifier_that_looks_like_a_prefix() {
    assert_eq!(
        kinds("rb = b"),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Ident,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_point_into_source() {
    let source = "xy = 42";
    let lines = LineIndex::new(source);
    let tokens = lex(source, &lines).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(tokens[0].span, Span::new(0, 2));
    assert_eq!(tokens[2].span, Span::new(5, 7));
}

#[test]
fn inconsistent_dedent_is_an_error() {
    let err = lex_err("if a:\n        x = 1\n    y = 2\n");
    assert_eq!(
        err,
        ParseError::syntax(
            "unindent does not match any outer indentation level",
            (3, 5)
        )
    );
}

#[test]
fn unterminated_string_is_an_error() {
    let err = lex_err("x = 'abc\n");
    assert_eq!(err.location(), (1, 5));
    assert!(!err.is_unsupported());
}

#[test]
fn walrus_and_complex_are_unsupported() {
    assert!(lex_err("(x := 1)").is_unsupported());
    assert!(lex_err("x = 2j").is_unsupported());
}

#[test]
fn leading_zero_decimal_is_an_error() {
    assert!(!lex_err("x = 012").is_unsupported());
    assert_eq!(kinds("000")[0], TokenKind::Int(0));
}
