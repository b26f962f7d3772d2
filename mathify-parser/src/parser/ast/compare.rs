use crate::{
    parser::{
        ast::{binary::BinOp, expr::{fmt_operand, Expr}},
        error::Error,
        token::op::CmpOpKind,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A comparison, such as `a < b`, or a chain of comparisons, such as `0 <= x < 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Compare {
    /// The leftmost operand.
    pub left: Box<Expr>,

    /// The operators and the operands that follow them. This is never empty.
    pub comparators: Vec<(CmpOpKind, Expr)>,

    /// The region of the source code that this comparison was parsed from.
    pub span: Range<usize>,
}

impl Compare {
    /// Creates a single comparison between two operands.
    pub fn new(left: Expr, op: CmpOpKind, right: Expr) -> Self {
        let span = left.span().start..right.span().end;
        Self {
            left: Box::new(left),
            comparators: vec![(op, right)],
            span,
        }
    }

    /// Returns the span of the comparison.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the comparison operator at the cursor, if any. `not in` and `is not` are made of
    /// two tokens.
    fn parse_op(input: &mut Parser) -> Result<Option<CmpOpKind>, Error> {
        let op = match input.peek() {
            Some(TokenKind::Eq) => CmpOpKind::Eq,
            Some(TokenKind::NotEq) => CmpOpKind::NotEq,
            Some(TokenKind::Less) => CmpOpKind::Lt,
            Some(TokenKind::LessEq) => CmpOpKind::LtE,
            Some(TokenKind::Greater) => CmpOpKind::Gt,
            Some(TokenKind::GreaterEq) => CmpOpKind::GtE,
            Some(TokenKind::In) => CmpOpKind::In,
            Some(TokenKind::Is) => {
                input.next_token()?;
                return Ok(Some(if input.eat(TokenKind::Not).is_some() {
                    CmpOpKind::IsNot
                } else {
                    CmpOpKind::Is
                }));
            },
            Some(TokenKind::Not) => {
                input.next_token()?;
                input.expect(&[TokenKind::In])?;
                return Ok(Some(CmpOpKind::NotIn));
            },
            _ => return Ok(None),
        };
        input.next_token()?;
        Ok(Some(op))
    }

    /// Parses a comparison chain, or a bitwise-or expression if there is no comparison operator.
    pub(crate) fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let left = BinOp::parse_or_lower(input)?;

        let mut comparators = Vec::new();
        while let Some(op) = Self::parse_op(input)? {
            comparators.push((op, BinOp::parse_or_lower(input)?));
        }

        let Some((_, last)) = comparators.last() else {
            return Ok(left);
        };
        let span = left.span().start..last.span().end;
        Ok(Expr::Compare(Compare {
            left: Box::new(left),
            comparators,
            span,
        }))
    }
}

impl std::fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operand(f, &self.left, self.left.precedence() <= Precedence::Compare)?;
        for (op, operand) in &self.comparators {
            write!(f, " {} ", op)?;
            fmt_operand(f, operand, operand.precedence() <= Precedence::Compare)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn chain() {
        let expr = Parser::new("0 <= x < 1").try_parse_full::<Expr>().unwrap();
        let Expr::Compare(compare) = expr else { panic!("expected comparison") };
        let ops = compare.comparators.iter().map(|(op, _)| *op).collect::<Vec<_>>();
        assert_eq!(ops, vec![CmpOpKind::LtE, CmpOpKind::Lt]);
    }

    #[test]
    fn two_token_operators() {
        let expr = Parser::new("a is not b").try_parse_full::<Expr>().unwrap();
        let Expr::Compare(compare) = expr else { panic!("expected comparison") };
        assert_eq!(compare.comparators[0].0, CmpOpKind::IsNot);
    }
}
