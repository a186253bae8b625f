//! Expression parsing.
//!
//! One method per precedence level, lowest first:
//!
//! | Level | Operators |
//! |-------|-----------|
//! | conditional | `a if t else b` |
//! | or / and / not | `or`, `and`, `not` |
//! | comparison | `==` `!=` `<` `<=` `>` `>=` (never chained) |
//! | bitwise | `\|`, `^`, `&` |
//! | shift | `<<` `>>` |
//! | additive | `+` `-` |
//! | multiplicative | `*` `/` `//` `%` |
//! | unary | `-` `+` `~` |
//! | power | `**` (right-associative, binds tighter than a unary on its left) |
//! | postfix | call, subscript, attribute |
//!
//! A unary minus or plus applied to a numeric literal folds into the literal.

use pyc_ir::{
    ensure_sufficient_stack, BinaryOp, CompareOp, LogicalOp, NodeId, NodeKind, NodeRange, UnaryOp,
};

use super::Parser;
use crate::token::TokenKind;
use crate::ParseError;

/// Magnitude of `i64::MIN`, only valid directly after a minus sign.
const MIN_INT_MAGNITUDE: u64 = 1 << 63;

impl Parser<'_> {
    /// Parse a full expression.
    ///
    /// Nested parentheses, brackets and call arguments all come back here,
    /// so this is where the stack is topped up.
    pub(super) fn parse_expr(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_conditional())
    }

    fn parse_conditional(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let then = self.parse_or()?;
        if !self.cursor.eat(TokenKind::If) {
            return Ok(then);
        }
        let test = self.parse_or()?;
        self.cursor.expect(TokenKind::Else)?;
        let otherwise = self.parse_expr()?;
        let span = self.span_from(start);
        Ok(self.alloc(
            NodeKind::Conditional {
                test,
                then,
                otherwise,
            },
            span,
        ))
    }

    fn parse_or(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let mut left = self.parse_and()?;
        while self.cursor.eat(TokenKind::Or) {
            let right = self.parse_and()?;
            let span = self.span_from(start);
            left = self.alloc(
                NodeKind::Logical {
                    op: LogicalOp::Or,
                    left,
                    right,
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let mut left = self.parse_not()?;
        while self.cursor.eat(TokenKind::And) {
            let right = self.parse_not()?;
            let span = self.span_from(start);
            left = self.alloc(
                NodeKind::Logical {
                    op: LogicalOp::And,
                    left,
                    right,
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<NodeId, ParseError> {
        if !self.cursor.check(TokenKind::Not) {
            return self.parse_comparison();
        }
        let start = self.cursor.advance().span;
        let operand = self.parse_not()?;
        let span = self.span_from(start);
        Ok(self.alloc(
            NodeKind::Unary {
                op: UnaryOp::Not,
                operand,
            },
            span,
        ))
    }

    fn parse_comparison(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let left = self.parse_bitor()?;
        self.reject_membership()?;
        let Some(op) = compare_op(self.cursor.current_kind()) else {
            return Ok(left);
        };
        self.cursor.advance();
        let right = self.parse_bitor()?;
        if compare_op(self.cursor.current_kind()).is_some() {
            return Err(self.unsupported("chained comparison", self.cursor.current_span()));
        }
        self.reject_membership()?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Compare { op, left, right }, span))
    }

    /// `in`, `not in`, `is` and `is not` have no C counterpart.
    fn reject_membership(&self) -> Result<(), ParseError> {
        let span = self.cursor.current_span();
        match (self.cursor.current_kind(), self.cursor.peek_kind(1)) {
            (TokenKind::In, _) | (TokenKind::Not, TokenKind::In) => {
                Err(self.unsupported("membership test", span))
            }
            (TokenKind::Reserved("is"), _) => Err(self.unsupported("identity comparison", span)),
            _ => Ok(()),
        }
    }

    fn parse_bitor(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_bitxor, |kind| match kind {
            TokenKind::Pipe => Some(BinaryOp::BitOr),
            _ => None,
        })
    }

    fn parse_bitxor(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_bitand, |kind| match kind {
            TokenKind::Caret => Some(BinaryOp::BitXor),
            _ => None,
        })
    }

    fn parse_bitand(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_shift, |kind| match kind {
            TokenKind::Amp => Some(BinaryOp::BitAnd),
            _ => None,
        })
    }

    fn parse_shift(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_additive, |kind| match kind {
            TokenKind::Shl => Some(BinaryOp::Shl),
            TokenKind::Shr => Some(BinaryOp::Shr),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> Result<NodeId, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> Result<NodeId, ParseError> {
        let node = self.parse_binary_level(Self::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::DoubleSlash => Some(BinaryOp::FloorDiv),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        })?;
        if self.cursor.check(TokenKind::At) {
            return Err(self.unsupported("matrix multiplication", self.cursor.current_span()));
        }
        Ok(node)
    }

    /// Left-associative binary level: `next (op next)*`.
    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> Result<NodeId, ParseError>,
        op_of: fn(TokenKind) -> Option<BinaryOp>,
    ) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let mut left = next(self)?;
        while let Some(op) = op_of(self.cursor.current_kind()) {
            self.cursor.advance();
            let right = next(self)?;
            let span = self.span_from(start);
            left = self.alloc(NodeKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<NodeId, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Tilde => UnaryOp::BitNot,
            _ => return self.parse_power(),
        };
        let start = self.cursor.advance().span;

        if op == UnaryOp::Neg
            && self.cursor.current_kind() == TokenKind::Int(MIN_INT_MAGNITUDE)
            && self.cursor.peek_kind(1) != TokenKind::DoubleStar
        {
            self.cursor.advance();
            let span = self.span_from(start);
            return Ok(self.alloc(NodeKind::Int(i64::MIN), span));
        }

        let operand = self.parse_unary()?;
        let span = self.span_from(start);
        let folded = match (op, *self.arena.kind(operand)) {
            (UnaryOp::Neg, NodeKind::Int(value)) => value.checked_neg().map(NodeKind::Int),
            (UnaryOp::Neg, NodeKind::Float(bits)) => {
                Some(NodeKind::Float((-f64::from_bits(bits)).to_bits()))
            }
            (UnaryOp::Plus, literal @ (NodeKind::Int(_) | NodeKind::Float(_))) => Some(literal),
            _ => None,
        };
        let kind = folded.unwrap_or(NodeKind::Unary { op, operand });
        Ok(self.alloc(kind, span))
    }

    fn parse_power(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let base = self.parse_postfix()?;
        if !self.cursor.eat(TokenKind::DoubleStar) {
            return Ok(base);
        }
        let exponent = self.parse_unary()?;
        let span = self.span_from(start);
        Ok(self.alloc(
            NodeKind::Binary {
                op: BinaryOp::Pow,
                left: base,
                right: exponent,
            },
            span,
        ))
    }

    fn parse_postfix(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let mut node = self.parse_atom()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::LParen => {
                    let func = match *self.arena.kind(node) {
                        NodeKind::Var(func) => func,
                        NodeKind::Attr { .. } => {
                            return Err(self.unsupported("method call", start));
                        }
                        _ => return Err(self.unsupported("call of a non-name expression", start)),
                    };
                    self.cursor.advance();
                    let args = self.parse_call_args()?;
                    let span = self.span_from(start);
                    node = self.alloc(NodeKind::Call { func, args }, span);
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    self.reject_slice()?;
                    let index = self.parse_expr()?;
                    self.reject_slice()?;
                    if self.cursor.check(TokenKind::Comma) {
                        return Err(self.unsupported(
                            "multi-dimensional subscript",
                            self.cursor.current_span(),
                        ));
                    }
                    self.cursor.expect(TokenKind::RBracket)?;
                    let span = self.span_from(start);
                    node = self.alloc(NodeKind::Subscript { value: node, index }, span);
                }
                TokenKind::Dot => {
                    let var = match *self.arena.kind(node) {
                        NodeKind::Var(var) => var,
                        NodeKind::Attr { .. } => {
                            return Err(self.unsupported(
                                "nested attribute access",
                                self.cursor.current_span(),
                            ));
                        }
                        _ => {
                            return Err(self.unsupported(
                                "attribute of a non-name expression",
                                self.cursor.current_span(),
                            ));
                        }
                    };
                    self.cursor.advance();
                    let field = self.cursor.expect_ident()?;
                    let attr = self.intern(field);
                    let span = self.span_from(start);
                    node = self.alloc(NodeKind::Attr { var, attr }, span);
                }
                _ => return Ok(node),
            }
        }
    }

    fn reject_slice(&self) -> Result<(), ParseError> {
        if self.cursor.check(TokenKind::Colon) {
            return Err(self.unsupported("slice", self.cursor.current_span()));
        }
        Ok(())
    }

    /// Parse call arguments after the opening parenthesis.
    fn parse_call_args(&mut self) -> Result<NodeRange, ParseError> {
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            args.push(self.parse_call_arg()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        Ok(self.alloc_list(&args))
    }

    /// Parse one positional argument.
    pub(super) fn parse_call_arg(&mut self) -> Result<NodeId, ParseError> {
        let span = self.cursor.current_span();
        match (self.cursor.current_kind(), self.cursor.peek_kind(1)) {
            (TokenKind::Star | TokenKind::DoubleStar, _) => {
                return Err(self.unsupported("argument unpacking", span));
            }
            (TokenKind::Ident, TokenKind::Assign) => {
                return Err(self.unsupported("keyword argument", span));
            }
            _ => {}
        }
        let arg = self.parse_expr()?;
        if self.cursor.check(TokenKind::For) {
            return Err(self.unsupported("generator expression", self.cursor.current_span()));
        }
        Ok(arg)
    }

    fn parse_atom(&mut self) -> Result<NodeId, ParseError> {
        let token = self.cursor.current();
        let kind = match token.kind {
            TokenKind::Ident => {
                let text = self.cursor.text(token.span);
                NodeKind::Var(self.intern(text))
            }
            TokenKind::Int(magnitude) => match i64::try_from(magnitude) {
                Ok(value) => NodeKind::Int(value),
                Err(_) => {
                    return Err(self.syntax("integer literal is too large", token.span));
                }
            },
            TokenKind::Float(bits) => NodeKind::Float(bits),
            TokenKind::True => NodeKind::Bool(true),
            TokenKind::False => NodeKind::Bool(false),
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::LBracket => return self.parse_list(),
            TokenKind::None => return Err(self.unsupported("`None` value", token.span)),
            TokenKind::Str => return Err(self.unsupported("string literal", token.span)),
            TokenKind::LBrace => {
                return Err(self.unsupported("dict or set literal", token.span));
            }
            TokenKind::Star => return Err(self.unsupported("starred expression", token.span)),
            TokenKind::Reserved(word) => {
                return Err(self.unsupported(&format!("`{word}` expression"), token.span));
            }
            _ => return Err(self.cursor.unexpected("an expression")),
        };
        self.cursor.advance();
        Ok(self.alloc(kind, token.span))
    }

    fn parse_parenthesized(&mut self) -> Result<NodeId, ParseError> {
        let open = self.cursor.advance().span;
        if self.cursor.check(TokenKind::RParen) {
            return Err(self.unsupported("tuple", open));
        }
        let inner = self.parse_expr()?;
        match self.cursor.current_kind() {
            TokenKind::Comma => Err(self.unsupported("tuple", open)),
            TokenKind::For => Err(self.unsupported("generator expression", open)),
            _ => {
                self.cursor.expect(TokenKind::RParen)?;
                Ok(inner)
            }
        }
    }

    fn parse_list(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.advance().span;
        let mut elements = Vec::new();
        while !self.cursor.check(TokenKind::RBracket) {
            if self.cursor.check(TokenKind::Star) {
                return Err(self.unsupported("starred expression", self.cursor.current_span()));
            }
            elements.push(self.parse_expr()?);
            if self.cursor.check(TokenKind::For) {
                return Err(self.unsupported("list comprehension", start));
            }
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RBracket)?;
        let elements = self.alloc_list(&elements);
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::List(elements), span))
    }
}

fn compare_op(kind: TokenKind) -> Option<CompareOp> {
    match kind {
        TokenKind::EqEq => Some(CompareOp::Eq),
        TokenKind::NotEq => Some(CompareOp::NotEq),
        TokenKind::Lt => Some(CompareOp::Lt),
        TokenKind::LtEq => Some(CompareOp::LtEq),
        TokenKind::Gt => Some(CompareOp::Gt),
        TokenKind::GtEq => Some(CompareOp::GtEq),
        _ => None,
    }
}
