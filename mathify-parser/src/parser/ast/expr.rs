use crate::{
    parser::{
        ast::{
            attribute::Attribute,
            binary::BinOp,
            bool_op::BoolOp,
            call::Call,
            compare::Compare,
            if_expr::IfExp,
            literal::Constant,
            name::Name,
            unary::UnaryOp,
        },
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression that can appear in a function body.
///
/// Parentheses are not represented in the tree; they only affect how the tree is built. When an
/// expression is displayed, parentheses are inserted where the precedence of the operators
/// requires them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A reference to a name, such as `x`.
    Name(Name),

    /// A literal constant, such as `1` or `'text'`.
    Constant(Constant),

    /// A function call, such as `math.sin(x)`.
    Call(Call),

    /// Attribute access, such as `self.x`.
    Attribute(Attribute),

    /// A binary operation, such as `a + b`.
    BinOp(BinOp),

    /// A unary operation, such as `-x` or `not x`.
    UnaryOp(UnaryOp),

    /// A comparison chain, such as `a < b` or `0 <= x < 1`.
    Compare(Compare),

    /// A boolean operation over two or more operands, such as `a and b and c`.
    BoolOp(BoolOp),

    /// A conditional expression, such as `a if x > 0 else b`.
    IfExp(IfExp),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Name(name) => name.span(),
            Expr::Constant(constant) => constant.span(),
            Expr::Call(call) => call.span(),
            Expr::Attribute(attribute) => attribute.span(),
            Expr::BinOp(bin_op) => bin_op.span(),
            Expr::UnaryOp(unary) => unary.span(),
            Expr::Compare(compare) => compare.span(),
            Expr::BoolOp(bool_op) => bool_op.span(),
            Expr::IfExp(if_exp) => if_exp.span(),
        }
    }

    /// Returns the precedence of the top-level operation of this expression.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expr::Name(_) | Expr::Call(_) | Expr::Attribute(_) => Precedence::Atom,
            Expr::Constant(constant) if constant.value.is_negative() => Precedence::Unary,
            Expr::Constant(_) => Precedence::Atom,
            Expr::BinOp(bin_op) => bin_op.op.precedence(),
            Expr::UnaryOp(unary) => unary.op.precedence(),
            Expr::Compare(_) => Precedence::Compare,
            Expr::BoolOp(bool_op) => bool_op.op.precedence(),
            Expr::IfExp(_) => Precedence::IfExp,
        }
    }

    /// Returns the name if this expression is a [`Expr::Name`].
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Expr::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Parses an atom: a name, a literal, or a parenthesized expression.
    pub(crate) fn parse_atom(input: &mut Parser) -> Result<Self, Error> {
        match input.peek() {
            Some(TokenKind::Name) => input.try_parse().map(Self::Name),
            Some(
                TokenKind::Int
                | TokenKind::Float
                | TokenKind::Imaginary
                | TokenKind::Str
                | TokenKind::Bytes
                | TokenKind::None
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Ellipsis
            ) => input.try_parse().map(Self::Constant),
            Some(TokenKind::OpenParen) => {
                let open = input.next_token()?;
                input.parenthesized(|input| {
                    let expr = input.try_parse::<Expr>()?;
                    if input.at(TokenKind::Comma) {
                        return Err(Error::new(
                            vec![open.span.start..input.span().end],
                            kind::UnexpectedTuple,
                        ));
                    }
                    input.expect(&[TokenKind::CloseParen])?;
                    Ok(expr)
                })
            },
            _ => Err(input.unexpected(&[TokenKind::Name, TokenKind::OpenParen])),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        IfExp::parse_or_lower(input)
    }
}

/// Formats an operand of an operation, wrapping it in parentheses if `wrap` is true.
pub(crate) fn fmt_operand(f: &mut fmt::Formatter, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Name(name) => name.fmt(f),
            Expr::Constant(constant) => constant.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Attribute(attribute) => attribute.fmt(f),
            Expr::BinOp(bin_op) => bin_op.fmt(f),
            Expr::UnaryOp(unary) => unary.fmt(f),
            Expr::Compare(compare) => compare.fmt(f),
            Expr::BoolOp(bool_op) => bool_op.fmt(f),
            Expr::IfExp(if_exp) => if_exp.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parenthesized_tuple_is_rejected() {
        let err = Parser::new("(a, b)").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::UnexpectedTuple>());
    }

    #[test]
    fn nested_parentheses_leave_no_trace() {
        let expr = Parser::new("((x))").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Name(Name::with_span("x", 2..3)));
    }

    #[test]
    fn precedence_of_nodes() {
        let expr = Parser::new("a if b else c").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.precedence(), Precedence::IfExp);
        let expr = Parser::new("f(x).y").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.precedence(), Precedence::Atom);
    }
}
