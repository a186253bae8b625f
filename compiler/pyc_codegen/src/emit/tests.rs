use std::cell::RefCell;

use pretty_assertions::assert_eq;

use pyc_ir::NodeId;

use super::*;
use crate::analysis::analyze;
use crate::c::CRenderer;
use crate::context::{ListTable, Variable};

fn analyzed(source: &str, params: &[&str]) -> (Body, TranslationContext) {
    let body = pyc_parse::parse_body(source).unwrap_or_else(|err| panic!("parse failed: {err}"));
    let params = params.iter().filter_map(|p| body.names.get(p));
    let ctx = analyze(TranslationContext::with_parameters(params), &body)
        .unwrap_or_else(|err| panic!("{err}"));
    (body, ctx)
}

#[test]
fn reference_function_body() {
    let source = "x = 0\nwhile x < 3:\n    if a == b:\n        x = x + 1\nreturn x\n";
    let (body, ctx) = analyzed(source, &["a", "b"]);
    let text = emit(&body, &ctx, &CRenderer).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(
        text,
        "int64_t x;\nx = 0;\nwhile (x < 3) {\n    if (a == b) {\n        x = x + 1;\n    }\n}\nreturn x;"
    );
}

#[test]
fn every_declaration_is_kept() {
    let (body, ctx) = analyzed("a = 1\nb = 2.0\nc = True\n", &[]);
    let text = emit(&body, &ctx, &CRenderer).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(
        text,
        "int64_t a;\ndouble b;\nbool c;\na = 1;\nb = 2.0;\nc = true;"
    );
}

#[test]
fn nested_list_loop_reaches_the_list_table() {
    let source = "s = 0\ny = [1, 2]\nwhile s < 10:\n    for v in y:\n        s += v\n";
    let (body, ctx) = analyzed(source, &[]);
    let text = emit(&body, &ctx, &CRenderer).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(
        text,
        "int64_t s;\nint64_t y[2];\ns = 0;\ny[0] = 1;\ny[1] = 2;\nwhile (s < 10) {\n    \
         for (int64_t _v_i = 0; _v_i < 2; _v_i++) {\n        int64_t v = y[_v_i];\n        s += v;\n    }\n}"
    );
}

#[test]
fn empty_body() {
    let (body, ctx) = analyzed("pass\n", &[]);
    let text = emit(&body, &ctx, &CRenderer).unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(text, ";");
}

/// Records which statements received the list table.
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<(NodeId, bool)>>,
}

impl NodeRenderer for Recorder {
    fn render(
        &self,
        _body: &Body,
        id: NodeId,
        lists: Option<&ListTable>,
        _indent: usize,
    ) -> Result<String, TranslateError> {
        self.calls.borrow_mut().push((id, lists.is_some()));
        Ok(String::new())
    }

    fn render_declaration(
        &self,
        body: &Body,
        _ctx: &TranslationContext,
        var: &Variable,
    ) -> Result<String, TranslateError> {
        Ok(body.name(var.name).to_owned())
    }
}

#[test]
fn only_compound_statements_receive_lists() {
    let source = "x = 0\nif x:\n    pass\nwhile x:\n    break\nfor i in range(3):\n    pass\nreturn x\n";
    let (body, ctx) = analyzed(source, &[]);
    let recorder = Recorder::default();
    let text = emit(&body, &ctx, &recorder).unwrap_or_else(|err| panic!("{err}"));
    assert!(text.starts_with("x\n"));
    let flags: Vec<bool> = recorder.calls.borrow().iter().map(|&(_, f)| f).collect();
    assert_eq!(flags, vec![false, true, true, true, false]);
}
