use crate::{
    parser::{
        ast::{expr::{fmt_operand, Expr}, unary::UnaryOp},
        error::Error,
        token::op::BoolOpKind,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A boolean operation over two or more operands, such as `a and b` or `a or b or c`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoolOp {
    /// The operator.
    pub op: BoolOpKind,

    /// The operands, in order.
    pub values: Vec<Expr>,

    /// The region of the source code that this boolean operation was parsed from.
    pub span: Range<usize>,
}

impl BoolOp {
    /// Returns the span of the boolean operation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a chain of operands separated by the given operator. Operands of `or` are `and`
    /// chains; operands of `and` are logical negations.
    fn parse_chain(input: &mut Parser, op: BoolOpKind) -> Result<Expr, Error> {
        let (token, operand): (_, fn(&mut Parser) -> Result<Expr, Error>) = match op {
            BoolOpKind::Or => (TokenKind::Or, |input| Self::parse_chain(input, BoolOpKind::And)),
            BoolOpKind::And => (TokenKind::And, UnaryOp::parse_not_or_lower),
        };

        let first = operand(input)?;
        if !input.at(token) {
            return Ok(first);
        }

        let mut values = vec![first];
        while input.eat(token).is_some() {
            values.push(operand(input)?);
        }

        let span = values[0].span().start..input.prev_end();
        Ok(Expr::BoolOp(BoolOp { op, values, span }))
    }

    /// Parses an `or` chain, or anything of higher precedence.
    pub(crate) fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        Self::parse_chain(input, BoolOpKind::Or)
    }
}

impl std::fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.op)?;
            }
            fmt_operand(f, value, value.precedence() <= self.op.precedence())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn flattened_chain() {
        let expr = Parser::new("a and b and c").try_parse_full::<Expr>().unwrap();
        let Expr::BoolOp(bool_op) = expr else { panic!("expected boolean operation") };
        assert_eq!(bool_op.op, BoolOpKind::And);
        assert_eq!(bool_op.values.len(), 3);
        assert_eq!(bool_op.span, 0..13);
    }

    #[test]
    fn nested_or_keeps_parentheses() {
        let expr = Parser::new("(a or b) and c").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.to_string(), "(a or b) and c");
    }
}
