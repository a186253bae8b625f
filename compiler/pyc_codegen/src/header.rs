//! Function header extraction.
//!
//! Splits a function's source text into its `def` header and its body. The
//! header may span several lines and carry parenthesized defaults; its end is
//! the line on which the parameter list's parentheses balance. Parentheses
//! inside string literals and comments do not count.
//!
//! Input whose first significant line is not a `def` header is taken to be
//! a body already and comes back unchanged, so extracting twice is the same
//! as extracting once.

use pyc_ir::LineIndex;

use crate::ExtractError;

/// A function split into header and body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedBody {
    /// Header text from `def` to the end of the line holding the closing
    /// parenthesis; `None` when the input had no header.
    pub header: Option<String>,
    /// Body lines, dedented and joined with `\n`.
    pub body: String,
}

/// Remove the header from `source` and dedent the remaining lines.
///
/// Each body line loses up to `indent_level * 4` leading spaces or tabs.
/// Blank lines, comments and decorators before the header are skipped.
#[tracing::instrument(level = "debug", skip_all)]
pub fn extract_body(source: &str, indent_level: usize) -> Result<ExtractedBody, ExtractError> {
    let Some(def_start) = find_def(source) else {
        tracing::trace!("no header, input is already a body");
        return Ok(ExtractedBody {
            header: None,
            body: source.to_owned(),
        });
    };

    let index = LineIndex::new(source);
    let bytes = source.as_bytes();
    let open = find_open_paren(bytes, def_start).ok_or_else(|| {
        let (line, column) = location(&index, def_start);
        ExtractError::MissingParen { line, column }
    })?;
    let close = find_close_paren(bytes, open).ok_or_else(|| {
        let (line, column) = location(&index, open);
        ExtractError::UnbalancedParens { line, column }
    })?;
    let line_end = next_newline(bytes, close);
    check_header_colon(source, close + 1, line_end, &index)?;

    let header = source[def_start..line_end].trim_end().to_owned();
    let width = indent_level * 4;
    let body = source
        .get(line_end + 1..)
        .unwrap_or("")
        .lines()
        .map(|line| strip_indent(line, width))
        .collect::<Vec<_>>()
        .join("\n");
    tracing::debug!(header = %header, "extracted body");
    Ok(ExtractedBody {
        header: Some(header),
        body,
    })
}

/// Byte offset of the `def` keyword, if the first significant line is a
/// function header.
fn find_def(source: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut pos = 0;
    while pos < source.len() {
        let line_end = next_newline(bytes, pos);
        let line = &source[pos..line_end];
        let trimmed = line.trim_start();
        let start = pos + (line.len() - trimmed.len());
        if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
            pos = line_end + 1;
        } else if trimmed.starts_with('@') {
            pos = skip_decorator(bytes, start) + 1;
        } else {
            let is_def = trimmed
                .strip_prefix("def")
                .is_some_and(|rest| rest.starts_with([' ', '\t']));
            return is_def.then_some(start);
        }
    }
    None
}

/// Offset of the newline ending a decorator, whose arguments may span
/// lines.
fn skip_decorator(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while let Some(j) = next_structural(bytes, i) {
        match bytes[j] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'\n' if depth == 0 => return j,
            _ => {}
        }
        i = j + 1;
    }
    bytes.len()
}

/// The `(` opening the parameter list, searched on the header line only.
fn find_open_paren(bytes: &[u8], def_start: usize) -> Option<usize> {
    let j = next_structural(bytes, def_start)?;
    (bytes[j] == b'(').then_some(j)
}

/// The `)` that brings the nesting depth back to zero.
fn find_close_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    loop {
        let j = next_structural(bytes, i)?;
        match bytes[j] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
        i = j + 1;
    }
}

/// Reject a statement after the header's colon on the same line.
fn check_header_colon(
    source: &str,
    from: usize,
    line_end: usize,
    index: &LineIndex,
) -> Result<(), ExtractError> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = from;
    while let Some(j) = next_structural(bytes, i).filter(|&j| j < line_end) {
        match bytes[j] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => {
                let rest = &source[j + 1..line_end];
                let trimmed = rest.trim_start();
                if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
                    return Ok(());
                }
                let (line, column) = location(index, j + 1 + (rest.len() - trimmed.len()));
                return Err(ExtractError::SingleLineBody { line, column });
            }
            _ => {}
        }
        i = j + 1;
    }
    Ok(())
}

/// Next `(`, `)`, `:` or newline at or after `from`, skipping string
/// literals and comments.
fn next_structural(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b')' | b':' | b'\n' => return Some(i),
            b'#' => i = next_newline(bytes, i),
            quote @ (b'"' | b'\'') => i = skip_string(bytes, i, quote),
            _ => i += 1,
        }
    }
    None
}

/// Offset just past the string literal starting at `start`.
///
/// An unterminated single-quoted string ends at the end of its line.
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> usize {
    let delimiter = [quote; 3];
    let triple = bytes[start..].starts_with(&delimiter);
    let width = if triple { 3 } else { 1 };
    let mut i = start + width;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if !triple => return i,
            b if b == quote && (!triple || bytes[i..].starts_with(&delimiter)) => return i + width,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn next_newline(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| from + p)
}

/// Drop up to `width` leading spaces or tabs.
fn strip_indent(line: &str, width: usize) -> &str {
    let n = line
        .bytes()
        .take(width)
        .take_while(|&b| b == b' ' || b == b'\t')
        .count();
    &line[n..]
}

fn location(index: &LineIndex, offset: usize) -> (u32, u32) {
    index.line_col(u32::try_from(offset).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests;
