//! Lexer for the annotated Python subset.
//!
//! Produces a flat token list with explicit layout tokens. Indentation is
//! tracked with a stack of column widths: a deeper line emits `Indent`, a
//! shallower one emits one `Dedent` per closed level, and every logical line
//! ends in `Newline`.
//!
//! # Line joining
//!
//! Lines are joined implicitly inside `()`, `[]` and `{}`, and explicitly by a
//! trailing backslash. Blank and comment-only lines never produce tokens.
//!
//! String literals are recognised (including prefixes and triple quotes) so
//! that docstrings and quoted parentheses lex correctly, but their contents
//! are not kept.

use pyc_ir::{BinaryOp, LineIndex, Span};

use crate::token::{Token, TokenKind};
use crate::ParseError;

/// Tab stops follow the host language: the next multiple of 8.
const TAB_WIDTH: u32 = 8;

/// Tokenize `source`.
///
/// The returned list always ends with `Eof`, preceded by a `Newline` and any
/// pending `Dedent`s when the source has content.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, lines: &LineIndex) -> Result<Vec<Token>, ParseError> {
    let tokens = Lexer::new(source, lines).run()?;
    tracing::trace!(count = tokens.len(), "lexed");
    Ok(tokens)
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    lines: &'a LineIndex,
    pos: usize,
    indents: Vec<u32>,
    depth: u32,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, lines: &'a LineIndex) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            lines,
            pos: 0,
            indents: vec![0],
            depth: 0,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        loop {
            if self.at_line_start && self.depth == 0 {
                self.at_line_start = false;
                if !self.indentation()? {
                    continue;
                }
            }
            let Some(&byte) = self.bytes.get(self.pos) else {
                break;
            };
            match byte {
                b' ' | b'\t' | b'\r' | b'\x0c' => self.pos += 1,
                b'#' => self.skip_comment(),
                b'\\' => self.continuation()?,
                b'\n' => {
                    let start = self.pos;
                    self.pos += 1;
                    if self.depth == 0 {
                        self.push(TokenKind::Newline, start, self.pos)?;
                        self.at_line_start = true;
                    }
                }
                _ => self.token()?,
            }
        }
        self.finish()
    }

    /// Measure the indentation of a new logical line and emit layout tokens.
    ///
    /// Returns `false` when the line is blank or comment-only, after
    /// consuming it.
    fn indentation(&mut self) -> Result<bool, ParseError> {
        let mut width = 0u32;
        while let Some(&byte) = self.bytes.get(self.pos) {
            match byte {
                b' ' => width += 1,
                b'\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
                b'\x0c' => width = 0,
                _ => break,
            }
            self.pos += 1;
        }
        match self.bytes.get(self.pos) {
            None => return Ok(true),
            Some(b'#') => {
                self.skip_comment();
                self.skip_line_end();
                return Ok(false);
            }
            Some(b'\n' | b'\r') => {
                self.skip_line_end();
                return Ok(false);
            }
            Some(_) => {}
        }

        let current = self.indents.last().copied().unwrap_or(0);
        if width > current {
            self.indents.push(width);
            self.push(TokenKind::Indent, self.pos, self.pos)?;
        } else if width < current {
            while self.indents.last().is_some_and(|&level| level > width) {
                self.indents.pop();
                self.push(TokenKind::Dedent, self.pos, self.pos)?;
            }
            if self.indents.last().copied().unwrap_or(0) != width {
                return Err(ParseError::syntax(
                    "unindent does not match any outer indentation level",
                    self.location(self.pos),
                ));
            }
        }
        Ok(true)
    }

    fn skip_comment(&mut self) {
        while self.bytes.get(self.pos).is_some_and(|&b| b != b'\n') {
            self.pos += 1;
        }
    }

    fn skip_line_end(&mut self) {
        while let Some(&byte) = self.bytes.get(self.pos) {
            self.pos += 1;
            if byte == b'\n' {
                self.at_line_start = true;
                return;
            }
        }
        self.at_line_start = true;
    }

    /// Backslash followed by a line break joins the two lines.
    fn continuation(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 1;
        if self.bytes.get(self.pos) == Some(&b'\r') {
            self.pos += 1;
        }
        match self.bytes.get(self.pos) {
            Some(b'\n') => {
                self.pos += 1;
                Ok(())
            }
            None => Err(ParseError::syntax(
                "unexpected end of input after line continuation",
                self.location(start),
            )),
            Some(_) => Err(ParseError::syntax(
                "unexpected character after line continuation",
                self.location(start),
            )),
        }
    }

    fn token(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let byte = self.bytes[start];
        if byte.is_ascii_alphabetic() || byte == b'_' {
            return self.word();
        }
        if byte.is_ascii_digit()
            || (byte == b'.' && self.bytes.get(start + 1).is_some_and(u8::is_ascii_digit))
        {
            return self.number();
        }
        if byte == b'"' || byte == b'\'' {
            return self.string(start);
        }
        if !byte.is_ascii() {
            return Err(ParseError::syntax(
                "non-ASCII character outside a string",
                self.location(start),
            ));
        }
        self.operator()
    }

    fn word(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];
        if matches!(self.bytes.get(self.pos), Some(b'"' | b'\'')) && is_string_prefix(text) {
            return self.string(start);
        }
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Ident);
        self.push(kind, start, self.pos)
    }

    /// Lex a string literal whose prefix (if any) begins at `start` and whose
    /// opening quote is at the current position.
    fn string(&mut self, start: usize) -> Result<(), ParseError> {
        let quote = self.bytes[self.pos];
        let triple = self.bytes.get(self.pos + 1) == Some(&quote)
            && self.bytes.get(self.pos + 2) == Some(&quote);
        self.pos += if triple { 3 } else { 1 };
        loop {
            let Some(&byte) = self.bytes.get(self.pos) else {
                return Err(ParseError::syntax(
                    "unterminated string literal",
                    self.location(start),
                ));
            };
            match byte {
                b'\\' => self.pos += 2,
                b'\n' if !triple => {
                    return Err(ParseError::syntax(
                        "unterminated string literal",
                        self.location(start),
                    ));
                }
                b if b == quote => {
                    if !triple {
                        self.pos += 1;
                        break;
                    }
                    if self.bytes.get(self.pos + 1) == Some(&quote)
                        && self.bytes.get(self.pos + 2) == Some(&quote)
                    {
                        self.pos += 3;
                        break;
                    }
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
        self.push(TokenKind::Str, start, self.pos)
    }

    fn number(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let radix = match (self.bytes[start], self.bytes.get(start + 1)) {
            (b'0', Some(b'x' | b'X')) => Some(16),
            (b'0', Some(b'o' | b'O')) => Some(8),
            (b'0', Some(b'b' | b'B')) => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            self.pos += 2;
            while self
                .bytes
                .get(self.pos)
                .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'_')
            {
                self.pos += 1;
            }
            let digits: String = self.source[start + 2..self.pos]
                .chars()
                .filter(|&c| c != '_')
                .collect();
            let value = u64::from_str_radix(&digits, radix).map_err(|_| {
                ParseError::syntax("invalid integer literal", self.location(start))
            })?;
            return self.push(TokenKind::Int(value), start, self.pos);
        }

        let mut is_float = false;
        self.digits();
        if self.bytes.get(self.pos) == Some(&b'.') {
            is_float = true;
            self.pos += 1;
            self.digits();
        }
        if matches!(self.bytes.get(self.pos), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.bytes.get(self.pos + 1), Some(b'+' | b'-')));
            if self
                .bytes
                .get(self.pos + 1 + sign)
                .is_some_and(u8::is_ascii_digit)
            {
                is_float = true;
                self.pos += 1 + sign;
                self.digits();
            }
        }
        if matches!(self.bytes.get(self.pos), Some(b'j' | b'J')) {
            return Err(ParseError::unsupported(
                "complex literal",
                self.location(start),
            ));
        }
        if self
            .bytes
            .get(self.pos)
            .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'_')
        {
            return Err(ParseError::syntax(
                "invalid numeric literal",
                self.location(start),
            ));
        }

        let text: String = self.source[start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        let kind = if is_float {
            let value: f64 = text.parse().map_err(|_| {
                ParseError::syntax("invalid float literal", self.location(start))
            })?;
            TokenKind::Float(value.to_bits())
        } else {
            if text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0') {
                return Err(ParseError::syntax(
                    "leading zeros in decimal integer literals are not permitted",
                    self.location(start),
                ));
            }
            let value: u64 = text.parse().map_err(|_| {
                ParseError::syntax("integer literal is too large", self.location(start))
            })?;
            TokenKind::Int(value)
        };
        self.push(kind, start, self.pos)
    }

    fn digits(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|&b| b.is_ascii_digit() || b == b'_')
        {
            self.pos += 1;
        }
    }

    fn operator(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = &self.bytes[start..];
        let (kind, len) = match rest {
            [b'*', b'*', b'=', ..] => (TokenKind::AugAssign(BinaryOp::Pow), 3),
            [b'/', b'/', b'=', ..] => (TokenKind::AugAssign(BinaryOp::FloorDiv), 3),
            [b'<', b'<', b'=', ..] => (TokenKind::AugAssign(BinaryOp::Shl), 3),
            [b'>', b'>', b'=', ..] => (TokenKind::AugAssign(BinaryOp::Shr), 3),
            [b'+', b'=', ..] => (TokenKind::AugAssign(BinaryOp::Add), 2),
            [b'-', b'=', ..] => (TokenKind::AugAssign(BinaryOp::Sub), 2),
            [b'*', b'=', ..] => (TokenKind::AugAssign(BinaryOp::Mul), 2),
            [b'/', b'=', ..] => (TokenKind::AugAssign(BinaryOp::Div), 2),
            [b'%', b'=', ..] => (TokenKind::AugAssign(BinaryOp::Mod), 2),
            [b'&', b'=', ..] => (TokenKind::AugAssign(BinaryOp::BitAnd), 2),
            [b'|', b'=', ..] => (TokenKind::AugAssign(BinaryOp::BitOr), 2),
            [b'^', b'=', ..] => (TokenKind::AugAssign(BinaryOp::BitXor), 2),
            [b'*', b'*', ..] => (TokenKind::DoubleStar, 2),
            [b'/', b'/', ..] => (TokenKind::DoubleSlash, 2),
            [b'<', b'<', ..] => (TokenKind::Shl, 2),
            [b'>', b'>', ..] => (TokenKind::Shr, 2),
            [b'=', b'=', ..] => (TokenKind::EqEq, 2),
            [b'!', b'=', ..] => (TokenKind::NotEq, 2),
            [b'<', b'=', ..] => (TokenKind::LtEq, 2),
            [b'>', b'=', ..] => (TokenKind::GtEq, 2),
            [b'-', b'>', ..] => (TokenKind::Arrow, 2),
            [b':', b'=', ..] => {
                return Err(ParseError::unsupported(
                    "assignment expression",
                    self.location(start),
                ));
            }
            [b'@', b'=', ..] => {
                return Err(ParseError::unsupported(
                    "matrix multiplication",
                    self.location(start),
                ));
            }
            [b'(', ..] => (TokenKind::LParen, 1),
            [b')', ..] => (TokenKind::RParen, 1),
            [b'[', ..] => (TokenKind::LBracket, 1),
            [b']', ..] => (TokenKind::RBracket, 1),
            [b'{', ..] => (TokenKind::LBrace, 1),
            [b'}', ..] => (TokenKind::RBrace, 1),
            [b',', ..] => (TokenKind::Comma, 1),
            [b':', ..] => (TokenKind::Colon, 1),
            [b';', ..] => (TokenKind::Semicolon, 1),
            [b'.', ..] => (TokenKind::Dot, 1),
            [b'@', ..] => (TokenKind::At, 1),
            [b'=', ..] => (TokenKind::Assign, 1),
            [b'+', ..] => (TokenKind::Plus, 1),
            [b'-', ..] => (TokenKind::Minus, 1),
            [b'*', ..] => (TokenKind::Star, 1),
            [b'/', ..] => (TokenKind::Slash, 1),
            [b'%', ..] => (TokenKind::Percent, 1),
            [b'&', ..] => (TokenKind::Amp, 1),
            [b'|', ..] => (TokenKind::Pipe, 1),
            [b'^', ..] => (TokenKind::Caret, 1),
            [b'~', ..] => (TokenKind::Tilde, 1),
            [b'<', ..] => (TokenKind::Lt, 1),
            [b'>', ..] => (TokenKind::Gt, 1),
            _ => {
                let found = self.source[start..].chars().next().unwrap_or('?');
                return Err(ParseError::syntax(
                    format!("unexpected character `{found}`"),
                    self.location(start),
                ));
            }
        };
        match kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => self.depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                self.depth = self.depth.saturating_sub(1);
            }
            _ => {}
        }
        self.pos += len;
        self.push(kind, start, self.pos)
    }

    fn finish(mut self) -> Result<Vec<Token>, ParseError> {
        let end = self.bytes.len();
        let needs_newline = self
            .tokens
            .last()
            .is_some_and(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Dedent));
        if needs_newline {
            self.push(TokenKind::Newline, end, end)?;
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent, end, end)?;
        }
        self.push(TokenKind::Eof, end, end)?;
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) -> Result<(), ParseError> {
        let span = Span::new(self.offset(start)?, self.offset(end)?);
        self.tokens.push(Token::new(kind, span));
        Ok(())
    }

    fn offset(&self, value: usize) -> Result<u32, ParseError> {
        u32::try_from(value)
            .map_err(|_| ParseError::syntax("source text exceeds 4 GiB", (0, 0)))
    }

    fn location(&self, offset: usize) -> (u32, u32) {
        self.lines
            .line_col(u32::try_from(offset).unwrap_or(u32::MAX))
    }
}

/// String prefixes the host language accepts (`r`, `b`, `f`, `u` and pairs).
fn is_string_prefix(text: &str) -> bool {
    matches!(
        text.to_ascii_lowercase().as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}

#[cfg(test)]
mod tests;
