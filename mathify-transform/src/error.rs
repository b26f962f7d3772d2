//! Errors produced while transforming a function.

use ariadne::Fmt;
use mathify_attrs::ErrorKind;
use mathify_error::EXPR;

/// A statement that cannot be reduced to part of a formula.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unsupported statement: {}", kind),
    labels = ["this statement"],
    help = format!(
        "the body must be a sequence of {} to single names, followed by a {} or {} statement",
        "assignments".fg(EXPR),
        "return".fg(EXPR),
        "if".fg(EXPR),
    ),
)]
pub struct UnsupportedStatement {
    /// The kind of statement, such as `Expr` or `Assign with multiple targets`.
    pub kind: String,
}

/// An assignment to something other than a single name, such as `a, b = x`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unsupported assignment target",
    labels = ["only a single name can be assigned to here"],
    help = "tuple and attribute targets cannot be inlined",
)]
pub struct UnsupportedTarget;

/// A function name that has no expansion rule was requested for expansion.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no expansion rule for the `{}` function", name),
    labels = [""],
    help = if suggestions.is_empty() {
        "see `mathify_transform::expansion::rule_names` for the functions that can be expanded".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownExpansion {
    /// The name that was requested.
    pub name: String,

    /// Names of expansion rules that are spelled similarly.
    pub suggestions: Vec<String>,
}
