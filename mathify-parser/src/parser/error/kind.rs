use ariadne::Fmt;
use mathify_attrs::ErrorKind;
use mathify_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of file",
    labels = [format!("I could not understand the remaining {} here", "code".fg(EXPR))],
    help = "only a single function definition can be converted at a time",
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// The source uses syntax that has no formula equivalent, such as a loop.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not supported", keyword),
    labels = ["this keyword"],
    help = format!(
        "function bodies may only contain {}, followed by a single {} or {} statement",
        "assignments".fg(EXPR),
        "return".fg(EXPR),
        "if".fg(EXPR),
    ),
)]
pub struct UnsupportedSyntax {
    /// The keyword that introduced the unsupported syntax.
    pub keyword: String,
}

/// A line is indented differently from the block it belongs to.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "inconsistent indentation",
    labels = [format!("expected an indentation of {} columns here, found {}", expected, found)],
)]
pub struct InconsistentIndentation {
    /// The indentation of the enclosing block.
    pub expected: usize,

    /// The indentation that was found.
    pub found: usize,
}

/// A literal could not be decoded.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid {} literal", kind),
    labels = ["this literal"],
)]
pub struct InvalidLiteral {
    /// The kind of literal, such as `bytes`.
    pub kind: &'static str,
}

/// Only plain names, attributes and tuples of them can be assigned to.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid assignment target",
    labels = ["cannot assign to this expression"],
)]
pub struct InvalidAssignmentTarget;

/// A tuple was written where a single expression is required.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "tuples are only supported as assignment targets",
    labels = ["this tuple"],
)]
pub struct UnexpectedTuple;

/// A colon introducing a block was not followed by an indented block.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an indented block",
    labels = [format!("the block must be indented more than {} columns", outer)],
)]
pub struct ExpectedIndentedBlock {
    /// The indentation of the enclosing block.
    pub outer: usize,
}
