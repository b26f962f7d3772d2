use crate::{
    parser::{
        ast::{attribute::Attribute, expr::{fmt_operand, Expr}, name::Name},
        error::Error,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `atan2(y, x)` or `math.sqrt(x)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The function being called. This is usually a [`Name`] or an [`Attribute`] chain.
    pub func: Box<Expr>,

    /// The positional arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Creates a call to the given function name, with the given span.
    pub fn named(name: &str, args: Vec<Expr>, span: Range<usize>) -> Self {
        Self {
            func: Box::new(Expr::Name(Name::with_span(name, span.clone()))),
            args,
            span,
        }
    }

    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the name used to look up the callee: the last identifier of the name or attribute
    /// chain, such as `atan2` for `math.atan2`.
    pub fn func_name(&self) -> Option<&str> {
        match &*self.func {
            Expr::Name(name) => Some(&name.id),
            Expr::Attribute(attribute) => Some(&attribute.attr.id),
            _ => None,
        }
    }

    /// Returns the full dotted name of the callee, such as `np.linalg.norm`, if the callee is a
    /// chain of names.
    pub fn dotted_name(&self) -> Option<String> {
        dotted_name(&self.func)
    }

    /// Parses a primary expression: an atom followed by any number of attribute accesses and
    /// calls, such as `self.f(x).y`.
    pub(crate) fn parse_primary(input: &mut Parser) -> Result<Expr, Error> {
        let mut primary = Expr::parse_atom(input)?;

        loop {
            match input.peek() {
                Some(TokenKind::Dot) => {
                    input.next_token()?;
                    let attr = input.try_parse::<Name>()?;
                    let span = primary.span().start..attr.span.end;
                    primary = Expr::Attribute(Attribute {
                        value: Box::new(primary),
                        attr,
                        span,
                    });
                },
                Some(TokenKind::OpenParen) => {
                    input.next_token()?;
                    let args = input.parenthesized(Self::parse_args)?;
                    let span = primary.span().start..input.prev_end();
                    primary = Expr::Call(Call {
                        func: Box::new(primary),
                        args,
                        span,
                    });
                },
                _ => break Ok(primary),
            }
        }
    }

    /// Parses comma-separated arguments up to and including the closing parenthesis. A trailing
    /// comma is allowed.
    fn parse_args(input: &mut Parser) -> Result<Vec<Expr>, Error> {
        let mut args = Vec::new();
        while input.eat(TokenKind::CloseParen).is_none() {
            args.push(input.try_parse::<Expr>()?);
            if input.eat(TokenKind::Comma).is_none() {
                input.expect(&[TokenKind::CloseParen])?;
                break;
            }
        }
        Ok(args)
    }
}

/// Returns the dotted name of a chain of names and attributes.
fn dotted_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name(name) => Some(name.id.clone()),
        Expr::Attribute(attribute) => {
            dotted_name(&attribute.value).map(|base| format!("{}.{}", base, attribute.attr.id))
        },
        _ => None,
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operand(f, &self.func, self.func.precedence() < Precedence::Atom)?;
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_call(source: &str) -> Call {
        match Parser::new(source).try_parse_full::<Expr>().unwrap() {
            Expr::Call(call) => call,
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn callee_names() {
        let call = parse_call("np.linalg.norm(x)");
        assert_eq!(call.func_name(), Some("norm"));
        assert_eq!(call.dotted_name().as_deref(), Some("np.linalg.norm"));

        let call = parse_call("hypot()");
        assert_eq!(call.func_name(), Some("hypot"));
        assert!(call.args.is_empty());
    }

    #[test]
    fn trailing_comma() {
        let call = parse_call("pow(x, y,)");
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.span, 0..10);
    }

    #[test]
    fn call_of_call() {
        let call = parse_call("f(x)(y)");
        assert_eq!(call.func_name(), None);
        assert_eq!(call.to_string(), "f(x)(y)");
    }
}
