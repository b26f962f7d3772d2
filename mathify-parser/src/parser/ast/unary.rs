use crate::{
    parser::{
        ast::{binary::BinOp, compare::Compare, expr::{fmt_operand, Expr}},
        error::Error,
        token::op::UnaryOpKind,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary operation, such as `-x`, `~x` or `not x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    /// The operator.
    pub op: UnaryOpKind,

    /// The operand.
    pub operand: Box<Expr>,

    /// The region of the source code that this unary operation was parsed from.
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Returns the span of the unary operation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a logical negation, such as `not x`, or a comparison.
    pub(crate) fn parse_not_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let Some(not) = input.eat(TokenKind::Not) else {
            return Compare::parse_or_lower(input);
        };

        let operand = Self::parse_not_or_lower(input)?;
        let span = not.span.start..operand.span().end;
        Ok(Expr::UnaryOp(UnaryOp {
            op: UnaryOpKind::Not,
            operand: Box::new(operand),
            span,
        }))
    }

    /// Parses a factor: a unary plus, minus or bitwise not applied to a factor, or a power
    /// expression.
    pub(crate) fn parse_factor_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let op = match input.peek() {
            Some(TokenKind::Add) => UnaryOpKind::UAdd,
            Some(TokenKind::Sub) => UnaryOpKind::USub,
            Some(TokenKind::BitNot) => UnaryOpKind::Invert,
            _ => return BinOp::parse_power_or_lower(input),
        };

        let token = input.next_token()?;
        let operand = Self::parse_factor_or_lower(input)?;
        let span = token.span.start..operand.span().end;
        Ok(Expr::UnaryOp(UnaryOp {
            op,
            operand: Box::new(operand),
            span,
        }))
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        fmt_operand(f, &self.operand, self.operand.precedence() < self.op.precedence())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn nested_unary() {
        let expr = Parser::new("- -x").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.to_string(), "--x");
        assert_eq!(expr.span(), 0..4);
    }

    #[test]
    fn not_of_boolean() {
        let expr = Parser::new("not (a or b)").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.to_string(), "not (a or b)");
    }
}
