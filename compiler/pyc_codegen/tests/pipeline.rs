//! End-to-end translation tests.

use pretty_assertions::assert_eq;

use pyc_codegen::analysis::analyze;
use pyc_codegen::{
    extract_body, init_tracing, translate_batch, translate_body, translate_function,
    ExtractError, FunctionSource, PythonParser, TranslateConfig, TranslateError,
    TranslationContext,
};

const TEST_FUN: &str = "\
def test_fun(a: int, b: int) -> int:
    x = 0
    while x < 3:
        if a == b:
            x = x + 1
    return x
";

fn translate(source: &str) -> Result<String, TranslateError> {
    init_tracing();
    translate_function(&FunctionSource::new(source), &TranslateConfig::default())
        .map(|f| f.definition())
}

#[test]
fn reference_function() {
    let expected = "\
int64_t test_fun(int64_t a, int64_t b)
{
    int64_t x;
    x = 0;
    while (x < 3) {
        if (a == b) {
            x = x + 1;
        }
    }
    return x;
}";
    assert_eq!(translate(TEST_FUN), Ok(expected.to_owned()));
}

#[test]
fn reference_function_context() {
    let extracted = extract_body(TEST_FUN, 1).unwrap_or_else(|err| panic!("{err}"));
    let body = PythonParser
        .parse_body(&extracted.body)
        .unwrap_or_else(|err| panic!("{err}"));
    let ctx = analyze(TranslationContext::new(), &body).unwrap_or_else(|err| panic!("{err}"));
    let names: Vec<&str> = ctx.variables.iter().map(|v| body.name(v.name)).collect();
    assert_eq!(names, vec!["x"]);
    assert!(ctx.attributes.is_empty());
    assert!(ctx.lists.is_empty());
}

#[test]
fn translation_is_deterministic() {
    let source = "\
def mix(n: int, scale: float) -> float:
    total = 0.0
    ys = [1.0, 2.0, 3.0]
    for i in range(n):
        for y in ys:
            total += y * scale
    return total
";
    let first = translate(source);
    assert!(first.is_ok());
    assert_eq!(first, translate(source));
}

#[test]
fn lists_loops_and_structs() {
    let source = "\
def stats(n: int) -> float:
    p.lo = 0.0
    p.hi = 0.0
    ys = [1.5, 2.5]
    for k in range(n, 0, -1):
        if k % 2 == 0:
            continue
        elif k > 10:
            break
        else:
            p.hi = p.hi + 1.0
    ys = [0.5, 1.0, 2.0]
    for y in ys:
        p.lo = p.lo - y
    return p.hi - p.lo
";
    let expected = "\
double stats(int64_t n)
{
    struct { double lo; double hi; } p;
    double ys[3];
    p.lo = 0.0;
    p.hi = 0.0;
    ys[0] = 1.5;
    ys[1] = 2.5;
    for (int64_t k = n; k > 0; k -= 1) {
        if (k % 2 == 0) {
            continue;
        } else if (k > 10) {
            break;
        } else {
            p.hi = p.hi + 1.0;
        }
    }
    ys[0] = 0.5;
    ys[1] = 1.0;
    ys[2] = 2.0;
    for (int64_t _y_i = 0; _y_i < 3; _y_i++) {
        double y = ys[_y_i];
        p.lo = p.lo - y;
    }
    return p.hi - p.lo;
}";
    assert_eq!(translate(source), Ok(expected.to_owned()));
}

#[test]
fn pointer_parameters() {
    let source = "\
def scale(xs: list[float], n: int, k: float) -> None:
    for i in range(n):
        xs[i] *= k
";
    let expected = "\
void scale(double *xs, int64_t n, double k)
{
    for (int64_t i = 0; i < n; i++) {
        xs[i] *= k;
    }
}";
    assert_eq!(translate(source), Ok(expected.to_owned()));
}

#[test]
fn header_missing_its_closing_paren_fails_before_parsing() {
    let source = "def broken(a: int, b: int -> int:\n    return a +\n";
    assert_eq!(
        translate(source),
        Err(TranslateError::StructuralExtraction(
            ExtractError::UnbalancedParens { line: 1, column: 11 }
        ))
    );
}

#[test]
fn non_literal_first_assignment() {
    let source = "def f(y: int) -> int:\n    x = y\n    return x\n";
    assert_eq!(
        translate(source),
        Err(TranslateError::UnresolvedType {
            name: "x".to_owned(),
            line: 1,
            column: 1,
        })
    );
}

#[test]
fn unsupported_construct_is_a_parse_error() {
    let source = "def f(a: int) -> int:\n    try:\n        pass\n    except:\n        pass\n    return a\n";
    let err = translate(source).err();
    assert!(
        matches!(err, Some(TranslateError::Parse(ref parse)) if parse.is_unsupported()),
        "got {err:?}"
    );
}

#[test]
fn body_text_without_signature() {
    let text = translate_body("x = 1.0\nx = x * 2.0\n", &TranslateConfig::default())
        .unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(text, "double x;\nx = 1.0;\nx = x * 2.0;");
}

#[test]
fn batch_matches_sequential_translation() {
    let sources: Vec<FunctionSource> = (0..16)
        .map(|i| {
            FunctionSource::new(format!(
                "def f{i}(a: int) -> int:\n    x = {i}\n    while x < a:\n        x += {i}\n    return x\n"
            ))
        })
        .collect();
    let config = TranslateConfig::default();
    let parallel = translate_batch(&sources, &config);
    let sequential: Vec<_> = sources
        .iter()
        .map(|s| translate_function(s, &config))
        .collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn deep_nesting_translates_without_exhausting_the_stack() {
    let depth = 2_000;
    let config = TranslateConfig::default();
    let source = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(
        translate_body(&source, &config),
        Ok("int64_t x;\nx = 1;".to_owned())
    );

    let source = format!(
        "x = 0\nx = {}x{}\nreturn x\n",
        "(x + ".repeat(depth),
        ")".repeat(depth)
    );
    let text = translate_body(&source, &config).unwrap_or_else(|err| panic!("{err}"));
    assert!(text.starts_with("int64_t x;\nx = 0;\nx = x + (x + (x + "));
    assert!(text.ends_with("x + x));\nreturn x;"));
}

#[test]
fn loop_variable_written_in_the_loop() {
    let source = "\
def skip(n: int) -> int:
    t = 0
    for i in range(n):
        i += 1
        t += i
    return t
";
    let expected = "\
int64_t skip(int64_t n)
{
    int64_t t;
    t = 0;
    for (int64_t _i_i = 0; _i_i < n; _i_i++) {
        int64_t i = _i_i;
        i += 1;
        t += i;
    }
    return t;
}";
    assert_eq!(translate(source), Ok(expected.to_owned()));
}

#[test]
fn loop_variable_read_after_the_loop() {
    let source = "\
def last(n: int) -> int:
    t = 0
    for i in range(n):
        t = i
    return i
";
    assert_eq!(
        translate(source),
        Err(TranslateError::UnresolvedVariable {
            name: "i".to_owned(),
            usage: "code after its loop",
            line: 4,
            column: 8,
        })
    );
}

#[test]
fn list_literals_only_bind_whole_variables() {
    let element = "def f() -> int:\n    ys = [1, 2]\n    ys[0] = [3, 4, 5]\n    return ys[0]\n";
    assert!(matches!(
        translate(element),
        Err(TranslateError::UnresolvedType { ref name, line: 2, .. }) if name == "ys"
    ));

    let field = "def g() -> float:\n    p.xs = [1.0, 2.0]\n    return p.xs\n";
    assert!(matches!(
        translate(field),
        Err(TranslateError::UnresolvedType { ref name, line: 1, .. }) if name == "p.xs"
    ));
}
