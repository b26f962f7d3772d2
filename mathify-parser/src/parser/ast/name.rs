use crate::{
    parser::{error::Error, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reference to a variable, parameter or function by name, such as `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Name {
    /// The identifier.
    pub id: String,

    /// The region of the source code that this name was parsed from.
    pub span: Range<usize>,
}

impl Name {
    /// Creates a name with the given span.
    pub fn with_span(id: impl Into<String>, span: Range<usize>) -> Self {
        Self { id: id.into(), span }
    }

    /// Returns the span of the name.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Name {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.at(TokenKind::Keyword) {
            return Err(input.unexpected(&[TokenKind::Name]));
        }
        let token = input.expect(&[TokenKind::Name])?;
        Ok(Self {
            id: token.lexeme.to_owned(),
            span: token.span,
        })
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
