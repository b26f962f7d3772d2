use crate::{
    parser::{
        ast::{call::Call, expr::{fmt_operand, Expr}, unary::UnaryOp},
        error::Error,
        token::op::BinOpKind,
        Associativity,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    /// The left-hand side of the binary expression.
    pub left: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOpKind,

    /// The right-hand side of the binary expression.
    pub right: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl BinOp {
    /// Creates a binary expression spanning both operands.
    pub fn new(left: Expr, op: BinOpKind, right: Expr) -> Self {
        let span = left.span().start.min(right.span().start)..left.span().end.max(right.span().end);
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span,
        }
    }

    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the binary operator at the cursor, if it is one that is parsed by precedence
    /// climbing. Exponentiation binds tighter than unary operators, so it is parsed separately in
    /// [`Self::parse_power_or_lower`].
    fn peek_op(input: &Parser) -> Option<BinOpKind> {
        input
            .peek()
            .and_then(BinOpKind::from_token)
            .filter(|op| *op != BinOpKind::Pow)
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// In `1 + 2 * 3`, the right-hand-side of `+` is first parsed as `2`. The operator after it,
    /// `*`, has higher precedence than `+`, so the expression starting with `2` is parsed first,
    /// and `2 * 3` becomes the right-hand-side instead. In `3 * 2 + 1`, the operator after `2` has
    /// lower precedence, so the node `3 * 2` is built first, and [`Self::parse_expr`] picks up the
    /// `+ 1` part afterwards.
    fn complete_rhs(input: &mut Parser, left: Expr, op: BinOpKind, mut right: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        while let Some(next_op) = Self::peek_op(input) {
            if next_op.precedence() > precedence {
                right = Self::parse_expr(input, right, next_op.precedence())?;
            } else {
                break;
            }
        }

        let span = left.span().start..right.span().end;
        Ok(Expr::BinOp(BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator with at least the given precedence, and a right-hand-side.
    pub(crate) fn parse_expr(input: &mut Parser, mut left: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(op) = Self::peek_op(input) {
            if op.precedence() < precedence {
                break;
            }
            input.next_token()?;
            let right = UnaryOp::parse_factor_or_lower(input)?;
            left = Self::complete_rhs(input, left, op, right)?;
        }
        Ok(left)
    }

    /// Parses a bitwise-or expression or anything of higher precedence. This is the operand of a
    /// comparison.
    pub(crate) fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let left = UnaryOp::parse_factor_or_lower(input)?;
        Self::parse_expr(input, left, Precedence::BitOr)
    }

    /// Parses a power expression, such as `x ** 2`, or a primary expression. The exponent may be a
    /// unary expression, as in `2 ** -x`.
    pub(crate) fn parse_power_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let base = Call::parse_primary(input)?;
        if input.eat(TokenKind::Exp).is_none() {
            return Ok(base);
        }

        let exponent = UnaryOp::parse_factor_or_lower(input)?;
        let span = base.span().start..exponent.span().end;
        Ok(Expr::BinOp(BinOp {
            left: Box::new(base),
            op: BinOpKind::Pow,
            right: Box::new(exponent),
            span,
        }))
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precedence = self.op.precedence();
        let (wrap_left, wrap_right) = match self.op.associativity() {
            Associativity::Left => (
                self.left.precedence() < precedence,
                self.right.precedence() <= precedence,
            ),
            Associativity::Right => (
                self.left.precedence() <= precedence,
                self.right.precedence() < precedence && self.right.precedence() < Precedence::Unary,
            ),
        };

        fmt_operand(f, &self.left, wrap_left)?;
        write!(f, " {} ", self.op)?;
        fmt_operand(f, &self.right, wrap_right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::parser::ast::{literal::Constant, name::Name};

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    #[test]
    fn left_associative() {
        let expr = parse("a - b - c");
        let Expr::BinOp(outer) = expr else { panic!("expected binary operation") };
        assert_eq!(outer.op, BinOpKind::Sub);
        assert_eq!(outer.right.to_string(), "c");
        assert_eq!(outer.left.to_string(), "a - b");
    }

    #[test]
    fn power_binds_tighter_than_unary() {
        let expr = parse("2 ** -x ** 2");
        let Expr::BinOp(outer) = expr else { panic!("expected binary operation") };
        assert_eq!(outer.op, BinOpKind::Pow);
        assert!(matches!(*outer.right, Expr::UnaryOp(_)));
        assert_eq!(outer.to_string(), "2 ** -x ** 2");
    }

    #[test]
    fn mixed_bitwise_and_arithmetic() {
        assert_eq!(parse("a | b ^ c & d << 1 + 2").to_string(), "a | b ^ c & d << 1 + 2");
        assert_eq!(parse("(a | b) & c").to_string(), "(a | b) & c");
        assert_eq!(parse("a // b % c @ d").to_string(), "a // b % c @ d");
    }

    #[test]
    fn synthesized_span() {
        let node = BinOp::new(
            Expr::Name(Name::with_span("a", 4..5)),
            BinOpKind::Add,
            Expr::Constant(Constant::int(1, 8..9)),
        );
        assert_eq!(node.span(), 4..9);
    }
}
