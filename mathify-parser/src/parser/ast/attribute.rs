use crate::parser::{
    ast::{expr::{fmt_operand, Expr}, name::Name},
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Accessing an attribute of a value, such as `self.x` or `math.pi`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// The value whose attribute is accessed.
    pub value: Box<Expr>,

    /// The name of the attribute.
    pub attr: Name,

    /// The region of the source code that this attribute access was parsed from.
    pub span: Range<usize>,
}

impl Attribute {
    /// Returns the span of the attribute access.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the identifier of the value if it is a plain name, such as `self` in `self.x`.
    pub fn base_name(&self) -> Option<&str> {
        self.value.as_name().map(|name| name.id.as_str())
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operand(f, &self.value, self.value.precedence() < Precedence::Atom)?;
        write!(f, ".{}", self.attr)
    }
}
