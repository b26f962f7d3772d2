use crate::{
    parser::{
        ast::{bool_op::BoolOp, expr::{fmt_operand, Expr}},
        error::Error,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A conditional expression, such as `a if x > 0 else b`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IfExp {
    /// The condition.
    pub test: Box<Expr>,

    /// The value if the condition is true.
    pub body: Box<Expr>,

    /// The value if the condition is false.
    pub orelse: Box<Expr>,

    /// The region of the source code that this conditional expression was parsed from.
    pub span: Range<usize>,
}

impl IfExp {
    /// Returns the span of the conditional expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a conditional expression, or anything of higher precedence.
    pub(crate) fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let body = BoolOp::parse_or_lower(input)?;
        if input.eat(TokenKind::If).is_none() {
            return Ok(body);
        }

        let test = BoolOp::parse_or_lower(input)?;
        input.expect(&[TokenKind::Else])?;
        let orelse = Self::parse_or_lower(input)?;

        let span = body.span().start..orelse.span().end;
        Ok(Expr::IfExp(IfExp {
            test: Box::new(test),
            body: Box::new(body),
            orelse: Box::new(orelse),
            span,
        }))
    }
}

impl std::fmt::Display for IfExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operand(f, &self.body, self.body.precedence() <= Precedence::IfExp)?;
        write!(f, " if ")?;
        fmt_operand(f, &self.test, self.test.precedence() <= Precedence::IfExp)?;
        write!(f, " else ")?;
        fmt_operand(f, &self.orelse, self.orelse.precedence() < Precedence::IfExp)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn right_nested() {
        let expr = Parser::new("a if x else b if y else c").try_parse_full::<Expr>().unwrap();
        let Expr::IfExp(if_exp) = expr else { panic!("expected conditional expression") };
        assert!(matches!(*if_exp.orelse, Expr::IfExp(_)));
        assert_eq!(if_exp.to_string(), "a if x else b if y else c");
    }
}
