//! Token kinds produced by the lexer.

use pyc_ir::{BinaryOp, Span};

/// Token kind.
///
/// Identifiers carry no payload; the parser slices their text out of the
/// source by span. Layout tokens (`Newline`, `Indent`, `Dedent`) encode the
/// host language's significant indentation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    /// Integer literal magnitude. Negation is applied by the parser, so
    /// `9223372036854775808` is representable until it meets a minus sign.
    Int(u64),
    /// Float literal as `f64::to_bits`.
    Float(u64),
    /// String literal (contents are not kept).
    Str,

    // Supported keywords
    Def,
    If,
    Elif,
    Else,
    While,
    For,
    In,
    Return,
    Pass,
    Break,
    Continue,
    And,
    Or,
    Not,
    True,
    False,
    None,
    /// Keyword of a construct outside the supported subset (`try`, `class`, ...).
    Reserved(&'static str),

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Arrow,
    At,

    // Operators
    Assign,
    AugAssign(BinaryOp),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    DoubleStar,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Layout
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl TokenKind {
    /// Keyword for an identifier, if it is one.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "def" => TokenKind::Def,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "return" => TokenKind::Return,
            "pass" => TokenKind::Pass,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            "None" => TokenKind::None,
            "async" | "await" | "assert" | "class" | "del" | "except" | "finally" | "from"
            | "global" | "import" | "is" | "lambda" | "nonlocal" | "raise" | "try" | "with"
            | "yield" => TokenKind::Reserved(reserved_str(text)),
            _ => return None,
        };
        Some(kind)
    }

    /// Human-readable description, used in syntax errors.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::Str => "string literal",
            TokenKind::Def => "`def`",
            TokenKind::If => "`if`",
            TokenKind::Elif => "`elif`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::In => "`in`",
            TokenKind::Return => "`return`",
            TokenKind::Pass => "`pass`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Not => "`not`",
            TokenKind::True => "`True`",
            TokenKind::False => "`False`",
            TokenKind::None => "`None`",
            TokenKind::Reserved(word) => word,
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::Arrow => "`->`",
            TokenKind::At => "`@`",
            TokenKind::Assign => "`=`",
            TokenKind::AugAssign(_) => "augmented assignment",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::DoubleSlash => "`//`",
            TokenKind::Percent => "`%`",
            TokenKind::DoubleStar => "`**`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Tilde => "`~`",
            TokenKind::Shl => "`<<`",
            TokenKind::Shr => "`>>`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Newline => "end of line",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Eof => "end of input",
        }
    }
}

/// Map a reserved word to its `'static` spelling.
fn reserved_str(text: &str) -> &'static str {
    const RESERVED: [&str; 17] = [
        "async", "await", "assert", "class", "del", "except", "finally", "from", "global",
        "import", "is", "lambda", "nonlocal", "raise", "try", "with", "yield",
    ];
    RESERVED
        .iter()
        .find(|word| **word == text)
        .copied()
        .unwrap_or("reserved word")
}

/// A token with its source span.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}
