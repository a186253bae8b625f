//! Parse error types.

use thiserror::Error;

/// Error produced while lexing or parsing host source.
///
/// `Unsupported` marks syntax that is valid in the host language but outside
/// the translatable subset. `Syntax` marks malformed input. Both carry the
/// 1-based line and column of the offending token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{line}:{column}: unsupported {construct}")]
    Unsupported {
        construct: String,
        line: u32,
        column: u32,
    },
    #[error("{line}:{column}: {message}")]
    Syntax {
        message: String,
        line: u32,
        column: u32,
    },
}

impl ParseError {
    /// Create an unsupported-construct error.
    pub fn unsupported(construct: impl Into<String>, (line, column): (u32, u32)) -> Self {
        ParseError::Unsupported {
            construct: construct.into(),
            line,
            column,
        }
    }

    /// Create a syntax error.
    pub fn syntax(message: impl Into<String>, (line, column): (u32, u32)) -> Self {
        ParseError::Syntax {
            message: message.into(),
            line,
            column,
        }
    }

    /// Returns `true` for constructs outside the supported subset.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ParseError::Unsupported { .. })
    }

    /// 1-based (line, column) of the error.
    pub fn location(&self) -> (u32, u32) {
        match self {
            ParseError::Unsupported { line, column, .. }
            | ParseError::Syntax { line, column, .. } => (*line, *column),
        }
    }
}
