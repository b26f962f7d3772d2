use crate::{
    parser::{
        ast::{attribute::Attribute, expr::Expr, name::Name, stmt::{ExprStmt, Stmt}},
        error::{kind, Error},
        token::op::BinOpKind,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tuple of assignment targets, such as `a, b` in `a, b = b, a`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TupleTarget {
    /// The targets in the tuple.
    pub elts: Vec<Target>,

    /// The region of the source code that this tuple was parsed from.
    pub span: Range<usize>,
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Target {
    /// A plain name, such as `x`.
    Name(Name),

    /// An attribute, such as `self.x`.
    Attribute(Attribute),

    /// A tuple of targets, such as `a, b`.
    Tuple(TupleTarget),
}

impl Target {
    /// Returns the span of the target.
    pub fn span(&self) -> Range<usize> {
        match self {
            Target::Name(name) => name.span(),
            Target::Attribute(attribute) => attribute.span(),
            Target::Tuple(tuple) => tuple.span.clone(),
        }
    }

    /// Returns the name if this target is a plain name.
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Target::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl TryFrom<Expr> for Target {
    type Error = Error;

    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Name(name) => Ok(Target::Name(name)),
            Expr::Attribute(attribute) => Ok(Target::Attribute(attribute)),
            expr => Err(Error::new(vec![expr.span()], kind::InvalidAssignmentTarget)),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Name(name) => name.fmt(f),
            Target::Attribute(attribute) => attribute.fmt(f),
            Target::Tuple(tuple) => {
                for (i, elt) in tuple.elts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elt)?;
                }
                Ok(())
            },
        }
    }
}

/// An assignment statement, such as `x = 1` or `a = b = 0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assign {
    /// The targets of the assignment, from left to right. There are several when assignments
    /// are chained.
    pub targets: Vec<Target>,

    /// The assigned value.
    pub value: Expr,

    /// The region of the source code that this assignment was parsed from.
    pub span: Range<usize>,
}

impl Assign {
    /// Creates an assignment of the value to a single name.
    pub fn to_name(name: Name, value: Expr) -> Self {
        let span = name.span().start..value.span().end;
        Self {
            targets: vec![Target::Name(name)],
            value,
            span,
        }
    }

    /// Returns the span of the assignment.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl std::fmt::Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for target in &self.targets {
            write!(f, "{} = ", target)?;
        }
        write!(f, "{}", self.value)
    }
}

/// An augmented assignment statement, such as `x += 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AugAssign {
    /// The target of the assignment.
    pub target: Target,

    /// The operator applied to the target and the value.
    pub op: BinOpKind,

    /// The value.
    pub value: Expr,

    /// The region of the source code that this assignment was parsed from.
    pub span: Range<usize>,
}

impl AugAssign {
    /// Returns the span of the assignment.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl std::fmt::Display for AugAssign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}= {}", self.target, self.op, self.value)
    }
}

/// One side of an assignment, which may be a tuple without parentheses.
enum ExprList {
    Single(Expr),
    Tuple(Vec<Expr>, Range<usize>),
}

impl ExprList {
    /// Parses one or more comma-separated expressions. A trailing comma makes a tuple.
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let first = input.try_parse::<Expr>()?;
        if !input.at(TokenKind::Comma) {
            return Ok(ExprList::Single(first));
        }

        let start = first.span().start;
        let mut elts = vec![first];
        while input.eat(TokenKind::Comma).is_some() {
            if matches!(input.peek(), None | Some(TokenKind::NewLine | TokenKind::Assign | TokenKind::AugAssign)) {
                break;
            }
            elts.push(input.try_parse::<Expr>()?);
        }
        Ok(ExprList::Tuple(elts, start..input.prev_end()))
    }

    /// Converts the list to a single expression. Tuples are only supported as targets.
    fn into_expr(self) -> Result<Expr, Error> {
        match self {
            ExprList::Single(expr) => Ok(expr),
            ExprList::Tuple(_, span) => Err(Error::new(vec![span], kind::UnexpectedTuple)),
        }
    }

    /// Converts the list to an assignment target.
    fn into_target(self) -> Result<Target, Error> {
        match self {
            ExprList::Single(expr) => Target::try_from(expr),
            ExprList::Tuple(elts, span) => Ok(Target::Tuple(TupleTarget {
                elts: elts.into_iter().map(Target::try_from).collect::<Result<_, _>>()?,
                span,
            })),
        }
    }
}

/// Returns the operator of an augmented assignment token, such as `+` for `+=`.
fn aug_op(lexeme: &str) -> BinOpKind {
    match lexeme.trim_end_matches('=') {
        "+" => BinOpKind::Add,
        "-" => BinOpKind::Sub,
        "*" => BinOpKind::Mult,
        "@" => BinOpKind::MatMult,
        "/" => BinOpKind::Div,
        "//" => BinOpKind::FloorDiv,
        "%" => BinOpKind::Mod,
        "**" => BinOpKind::Pow,
        "<<" => BinOpKind::LShift,
        ">>" => BinOpKind::RShift,
        "&" => BinOpKind::BitAnd,
        "|" => BinOpKind::BitOr,
        _ => BinOpKind::BitXor,
    }
}

/// Parses an assignment, an augmented assignment, or an expression statement.
pub(crate) fn parse_assign_or_expr(input: &mut Parser) -> Result<Stmt, Error> {
    let start = input.span().start;
    let first = ExprList::parse(input)?;

    if let Some(token) = input.eat(TokenKind::AugAssign) {
        let target = first.into_target()?;
        if let Target::Tuple(tuple) = &target {
            return Err(Error::new(vec![tuple.span.clone()], kind::InvalidAssignmentTarget));
        }
        let value = input.try_parse::<Expr>()?;
        return Ok(Stmt::AugAssign(AugAssign {
            target,
            op: aug_op(token.lexeme),
            value,
            span: start..input.prev_end(),
        }));
    }

    if !input.at(TokenKind::Assign) {
        let value = first.into_expr()?;
        return Ok(Stmt::Expr(ExprStmt {
            span: value.span(),
            value,
        }));
    }

    // in `a = b = c`, every side but the last is a target
    let mut sides = vec![first];
    while input.eat(TokenKind::Assign).is_some() {
        sides.push(ExprList::parse(input)?);
    }
    let value = sides.pop().map(ExprList::into_expr).transpose()?;
    let Some(value) = value else {
        return Err(input.unexpected(&[TokenKind::Name]));
    };
    let targets = sides.into_iter().map(ExprList::into_target).collect::<Result<_, _>>()?;

    Ok(Stmt::Assign(Assign {
        targets,
        value,
        span: start..input.prev_end(),
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Stmt {
        parse_assign_or_expr(&mut Parser::new(source)).unwrap()
    }

    #[test]
    fn chained_assignment() {
        let Stmt::Assign(assign) = parse("a = b = x + 1") else { panic!("expected assignment") };
        assert_eq!(assign.targets.len(), 2);
        assert_eq!(assign.value.to_string(), "x + 1");
        assert_eq!(assign.to_string(), "a = b = x + 1");
    }

    #[test]
    fn tuple_and_attribute_targets() {
        let Stmt::Assign(assign) = parse("a, self.b = x") else { panic!("expected assignment") };
        let Target::Tuple(tuple) = &assign.targets[0] else { panic!("expected tuple target") };
        assert!(matches!(tuple.elts[..], [Target::Name(_), Target::Attribute(_)]));
        assert_eq!(tuple.span, 0..9);
    }

    #[test]
    fn augmented_assignment() {
        let Stmt::AugAssign(aug) = parse("x **= 2") else { panic!("expected augmented assignment") };
        assert_eq!(aug.op, BinOpKind::Pow);
        assert_eq!(aug.to_string(), "x **= 2");
    }

    #[test]
    fn invalid_target() {
        let err = parse_assign_or_expr(&mut Parser::new("f(x) = 1")).unwrap_err();
        assert!(err.is::<kind::InvalidAssignmentTarget>());
    }

    #[test]
    fn tuple_value_is_rejected() {
        let err = parse_assign_or_expr(&mut Parser::new("x = 1, 2")).unwrap_err();
        assert!(err.is::<kind::UnexpectedTuple>());
    }
}
