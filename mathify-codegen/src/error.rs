//! Errors produced while rendering a formula.

use ariadne::Fmt;
use mathify_attrs::ErrorKind;
use mathify_error::EXPR;

/// A name that cannot be typeset when underscores denote subscripts.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid identifier when underscores are subscripts", name),
    labels = ["this name"],
    help = format!(
        "names must not start or end with `_` or contain `__`; enable {} to typeset it literally",
        "escape_underscores".fg(EXPR),
    ),
)]
pub struct InvalidIdentifier {
    /// The name.
    pub name: String,
}

/// A literal of a kind that has no formula representation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unrecognized constant: {}", kind),
    labels = ["this constant"],
)]
pub struct UnsupportedConstant {
    /// The name of the runtime type of the constant.
    pub kind: String,
}
