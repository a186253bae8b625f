//! Translation error types.

use pyc_parse::ParseError;
use thiserror::Error;

/// Error locating the function body inside its source text.
///
/// Locations are 1-based and refer to the source given to the extractor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("{line}:{column}: function header has no parameter list")]
    MissingParen { line: u32, column: u32 },
    #[error("{line}:{column}: parameter list is never closed")]
    UnbalancedParens { line: u32, column: u32 },
    #[error("{line}:{column}: statement on the header line; the body must start on its own line")]
    SingleLineBody { line: u32, column: u32 },
    #[error("source has no function header to derive a signature from")]
    MissingHeader,
}

/// Error translating one function.
///
/// Every error aborts the translation of that function; nothing partial is
/// returned. Body locations are relative to the extracted body text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("structural extraction failed: {0}")]
    StructuralExtraction(#[from] ExtractError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("{line}:{column}: cannot infer a C type for `{name}`")]
    UnresolvedType { name: String, line: u32, column: u32 },
    #[error("{line}:{column}: `{name}` is used in {usage} but never assigned")]
    UnresolvedVariable {
        name: String,
        usage: &'static str,
        line: u32,
        column: u32,
    },
}

impl TranslateError {
    pub(crate) fn unresolved_type(name: impl Into<String>, (line, column): (u32, u32)) -> Self {
        TranslateError::UnresolvedType {
            name: name.into(),
            line,
            column,
        }
    }

    pub(crate) fn unresolved_variable(
        name: impl Into<String>,
        usage: &'static str,
        (line, column): (u32, u32),
    ) -> Self {
        TranslateError::UnresolvedVariable {
            name: name.into(),
            usage,
            line,
            column,
        }
    }
}
