//! Expression parsing with operator precedence.
//!
//! Precedence (lowest → highest):
//! 6. `||`
//! 5. `&&`
//! 4. `===`
//! 3. `<`, `>` (no chaining)
//! 2. `+`, `-`
//! 1. `*`, `/`
//!
//! All binary operators associate to the left.

use brisk_lexer::token::TokenKind;
use brisk_types::ast::*;
use brisk_types::ErrorCode;

use crate::parser::{Parser, MAX_NESTING};

impl<'src> Parser<'src> {
    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
        self.expr_depth += 1;
        if self.expr_depth > MAX_NESTING {
            self.error_at_current(
                ErrorCode::NESTING_LIMIT_EXCEEDED,
                format!("expressions nest deeper than {MAX_NESTING} levels"),
            );
            self.expr_depth -= 1;
            return None;
        }
        let result = self.parse_or();
        self.expr_depth -= 1;
        result
    }

    /// Parse `operand { op operand }` for one left-associative level.
    ///
    /// Every operator folded in wraps the tree built so far one level deeper,
    /// so it counts against the nesting limit like a parenthesised group.
    fn parse_left_assoc(
        &mut self,
        operand: fn(&mut Self) -> Option<Expr>,
        match_op: fn(&TokenKind) -> Option<BinOp>,
    ) -> Option<Expr> {
        let mut left = operand(self)?;
        let base = self.expr_depth;
        let result = loop {
            let Some(op) = match_op(self.peek_kind()) else {
                break Some(left);
            };
            self.expr_depth += 1;
            if self.expr_depth > MAX_NESTING {
                self.error_at_current(
                    ErrorCode::NESTING_LIMIT_EXCEEDED,
                    format!("expressions nest deeper than {MAX_NESTING} levels"),
                );
                break None;
            }
            self.advance();
            let Some(right) = operand(self) else {
                break None;
            };
            left = Expr::binary(op, left, right);
        };
        self.expr_depth = base;
        result
    }

    /// `or = and { "||" and }`
    fn parse_or(&mut self) -> Option<Expr> {
        self.parse_left_assoc(Self::parse_and, |kind| match kind {
            TokenKind::OrOr => Some(BinOp::Or),
            _ => None,
        })
    }

    /// `and = eq { "&&" eq }`
    fn parse_and(&mut self) -> Option<Expr> {
        self.parse_left_assoc(Self::parse_equality, |kind| match kind {
            TokenKind::AndAnd => Some(BinOp::And),
            _ => None,
        })
    }

    /// `eq = cmp { "===" cmp }`
    fn parse_equality(&mut self) -> Option<Expr> {
        self.parse_left_assoc(Self::parse_comparison, |kind| match kind {
            TokenKind::StrictEq => Some(BinOp::StrictEq),
            _ => None,
        })
    }

    /// `cmp = add [ ("<" | ">") add ]`
    ///
    /// Comparison operators do NOT chain: `a < b < c` is a parse error.
    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut left = self.parse_add()?;
        if let Some(op) = comparison_op(self.peek_kind()) {
            self.advance();
            let right = self.parse_add()?;
            left = Expr::binary(op, left, right);
            if comparison_op(self.peek_kind()).is_some() {
                self.error_with_suggestion(
                    ErrorCode::CHAINED_COMPARISON,
                    "comparison operators cannot be chained",
                    self.current_span(),
                    "combine comparisons with '&&': a < b && b < c",
                );
                return None;
            }
        }
        Some(left)
    }

    /// `add = mul { ("+" | "-") mul }`
    fn parse_add(&mut self) -> Option<Expr> {
        self.parse_left_assoc(Self::parse_mul, |kind| match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            _ => None,
        })
    }

    /// `mul = primary { ("*" | "/") primary }`
    fn parse_mul(&mut self) -> Option<Expr> {
        self.parse_left_assoc(Self::parse_primary, |kind| match kind {
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            _ => None,
        })
    }

    /// `primary = NUMBER | "-" NUMBER | "true" | "false" | IDENT | "(" expr ")"`
    fn parse_primary(&mut self) -> Option<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::NumberLit(n) => {
                self.advance();
                Some(Expr::new(ExprKind::Number(n), token.span))
            }
            TokenKind::Minus => {
                self.advance();
                match self.peek_kind().clone() {
                    TokenKind::NumberLit(n) => {
                        let span = token.span.merge(self.advance().span);
                        Some(Expr::new(ExprKind::Number(-n), span))
                    }
                    _ => {
                        self.error_with_suggestion(
                            ErrorCode::UNEXPECTED_TOKEN,
                            "unary '-' only applies to number literals",
                            token.span,
                            "subtract from zero instead: 0 - x",
                        );
                        None
                    }
                }
            }
            TokenKind::True => {
                self.advance();
                Some(Expr::new(ExprKind::Bool(true), token.span))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::new(ExprKind::Bool(false), token.span))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Some(Expr::new(ExprKind::Variable(name), token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                let close = self.expect(&TokenKind::RParen)?;
                Some(Expr::new(inner.kind, token.span.merge(close.span)))
            }
            other => {
                self.error_at_current(
                    ErrorCode::UNEXPECTED_TOKEN,
                    format!("expected expression, got '{other}'"),
                );
                None
            }
        }
    }
}

fn comparison_op(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Less => Some(BinOp::Less),
        TokenKind::Greater => Some(BinOp::Greater),
        _ => None,
    }
}
