//! Function header parsing.
//!
//! Reads `def name(params) [-> annotation]:` and records each parameter's
//! name and annotation text. Annotations are kept as source text with all
//! whitespace removed (`list[ int ]` becomes `list[int]`); mapping them onto
//! target types is the code generator's concern. Default values are skipped.

use pyc_ir::{LineIndex, Span};

use crate::cursor::Cursor;
use crate::lexer::lex;
use crate::token::TokenKind;
use crate::ParseError;

/// A parsed function header.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FunctionHeader {
    pub name: String,
    pub params: Vec<HeaderParam>,
    /// Return annotation, if present.
    pub returns: Option<Annotation>,
}

/// One declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderParam {
    pub name: String,
    pub annotation: Option<Annotation>,
    /// 1-based (line, column) of the parameter name within the header.
    pub location: (u32, u32),
}

/// Annotation source text, whitespace removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub text: String,
    /// 1-based (line, column) within the header.
    pub location: (u32, u32),
}

/// Parse a function header.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_header(text: &str) -> Result<FunctionHeader, ParseError> {
    let lines = LineIndex::new(text);
    let tokens = lex(text, &lines)?;
    let mut cursor = Cursor::new(&tokens, text, &lines);

    cursor.expect(TokenKind::Def)?;
    let name = cursor.expect_ident()?.to_owned();
    cursor.expect(TokenKind::LParen)?;

    let mut params = Vec::new();
    while !cursor.check(TokenKind::RParen) {
        params.push(parse_param(&mut cursor)?);
        if !cursor.eat(TokenKind::Comma) {
            break;
        }
    }
    cursor.expect(TokenKind::RParen)?;

    let returns = if cursor.eat(TokenKind::Arrow) {
        Some(annotation_text(&mut cursor, &[TokenKind::Colon])?)
    } else {
        None
    };
    cursor.expect(TokenKind::Colon)?;
    cursor.eat(TokenKind::Newline);
    if !cursor.is_at_end() {
        return Err(cursor.unexpected("end of header"));
    }

    tracing::debug!(name = %name, params = params.len(), "parsed header");
    Ok(FunctionHeader {
        name,
        params,
        returns,
    })
}

fn parse_param(cursor: &mut Cursor<'_>) -> Result<HeaderParam, ParseError> {
    let span = cursor.current_span();
    match cursor.current_kind() {
        TokenKind::Star | TokenKind::DoubleStar => {
            return Err(ParseError::unsupported(
                "variadic parameter",
                cursor.location(span),
            ));
        }
        TokenKind::Slash => {
            return Err(ParseError::unsupported(
                "positional-only marker",
                cursor.location(span),
            ));
        }
        _ => {}
    }
    let location = cursor.location(span);
    let name = cursor.expect_ident()?.to_owned();
    let annotation = if cursor.eat(TokenKind::Colon) {
        Some(annotation_text(
            cursor,
            &[TokenKind::Comma, TokenKind::RParen, TokenKind::Assign],
        )?)
    } else {
        None
    };
    if cursor.eat(TokenKind::Assign) {
        skip_default(cursor)?;
    }
    Ok(HeaderParam {
        name,
        annotation,
        location,
    })
}

/// Collect tokens up to (not including) one of `stops` at bracket depth 0
/// and return their text without whitespace.
fn annotation_text(
    cursor: &mut Cursor<'_>,
    stops: &[TokenKind],
) -> Result<Annotation, ParseError> {
    let first = cursor.current_span();
    let mut last: Option<Span> = None;
    let mut depth = 0u32;
    loop {
        let kind = cursor.current_kind();
        if depth == 0 && stops.contains(&kind) {
            break;
        }
        match kind {
            TokenKind::Eof | TokenKind::Newline => {
                return Err(cursor.unexpected("the end of an annotation"));
            }
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        last = Some(cursor.advance().span);
    }
    let Some(last) = last else {
        return Err(cursor.unexpected("an annotation"));
    };
    let text = cursor.text(first.merge(last));
    Ok(Annotation {
        text: text.chars().filter(|c| !c.is_whitespace()).collect(),
        location: cursor.location(first),
    })
}

fn skip_default(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    let mut depth = 0u32;
    loop {
        match cursor.current_kind() {
            TokenKind::Comma | TokenKind::RParen if depth == 0 => return Ok(()),
            TokenKind::Eof | TokenKind::Newline => {
                return Err(cursor.unexpected("`,` or `)`"));
            }
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        cursor.advance();
    }
}

#[cfg(test)]
mod tests;
