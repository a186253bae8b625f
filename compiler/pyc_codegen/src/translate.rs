//! Translation driver.
//!
//! Wires the stages together for one function:
//!
//! ```text
//! extract_body → parse_body → analyze → emit
//! ```
//!
//! Each call owns its body, interner and context; nothing is shared between
//! translations, which is what lets [`translate_batch`] run them in parallel.

use rayon::prelude::*;

use crate::analysis::analyze;
use crate::c::CRenderer;
use crate::emit::emit;
use crate::frontend::{NodeRenderer, StatementParser};
use crate::header::extract_body;
use crate::signature::FunctionSignature;
use crate::{ExtractError, TranslateError, TranslationContext};
use pyc_parse::PythonParser;

/// Translation settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TranslateConfig {
    /// Indentation levels, of four columns each, stripped from body lines.
    pub indent_level: usize,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        TranslateConfig { indent_level: 1 }
    }
}

/// A function to translate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSource {
    pub source: String,
    /// Explicit signature. When absent it is derived from the header.
    pub signature: Option<FunctionSignature>,
}

impl FunctionSource {
    pub fn new(source: impl Into<String>) -> Self {
        FunctionSource {
            source: source.into(),
            signature: None,
        }
    }

    #[must_use]
    pub fn with_signature(mut self, signature: FunctionSignature) -> Self {
        self.signature = Some(signature);
        self
    }
}

/// A translated function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TranslatedFunction {
    pub name: String,
    /// `int64_t f(int64_t a)`, without a semicolon.
    pub declaration: String,
    /// Declaration block then statement block, unindented.
    pub body: String,
}

impl TranslatedFunction {
    /// Full C definition with the body indented one level.
    pub fn definition(&self) -> String {
        if self.body.is_empty() {
            return format!("{}\n{{\n}}", self.declaration);
        }
        let body: Vec<String> = self
            .body
            .lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("    {line}")
                }
            })
            .collect();
        format!("{}\n{{\n{}\n}}", self.declaration, body.join("\n"))
    }
}

/// Translate a function body to C body text.
///
/// `source` may include its `def` header, which is stripped. No signature
/// is derived, so parameters are unknown names: assigning to one declares
/// it as a local.
#[tracing::instrument(level = "debug", skip_all)]
pub fn translate_body(source: &str, config: &TranslateConfig) -> Result<String, TranslateError> {
    let extracted = extract_body(source, config.indent_level)?;
    let body = PythonParser.parse_body(&extracted.body)?;
    let ctx = analyze(TranslationContext::new(), &body)?;
    emit(&body, &ctx, &CRenderer)
}

/// Translate a function to a C declaration and body.
pub fn translate_function(
    input: &FunctionSource,
    config: &TranslateConfig,
) -> Result<TranslatedFunction, TranslateError> {
    translate_with(input, config, &PythonParser, &CRenderer)
}

/// Translate a function with a custom parser and renderer.
#[tracing::instrument(level = "debug", skip_all)]
pub fn translate_with<P, R>(
    input: &FunctionSource,
    config: &TranslateConfig,
    parser: &P,
    renderer: &R,
) -> Result<TranslatedFunction, TranslateError>
where
    P: StatementParser + ?Sized,
    R: NodeRenderer + ?Sized,
{
    let extracted = extract_body(&input.source, config.indent_level)?;
    let signature = match &input.signature {
        Some(signature) => signature.clone(),
        None => {
            let header = extracted.header.as_deref().ok_or(ExtractError::MissingHeader)?;
            FunctionSignature::from_header(&parser.parse_header(header)?)?
        }
    };
    tracing::debug!(name = %signature.name, "translating function");

    let body = parser.parse_body(&extracted.body)?;
    let params = signature.params.iter().filter_map(|p| body.names.get(&p.name));
    let ctx = analyze(TranslationContext::with_parameters(params), &body)?;
    let text = emit(&body, &ctx, renderer)?;

    Ok(TranslatedFunction {
        declaration: signature.declaration(),
        name: signature.name,
        body: text,
    })
}

/// Translate many functions in parallel. Results keep the input order.
#[tracing::instrument(level = "debug", skip_all, fields(count = inputs.len()))]
pub fn translate_batch(
    inputs: &[FunctionSource],
    config: &TranslateConfig,
) -> Vec<Result<TranslatedFunction, TranslateError>> {
    inputs
        .par_iter()
        .map(|input| translate_function(input, config))
        .collect()
}
