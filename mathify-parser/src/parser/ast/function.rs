use crate::{
    parser::{
        ast::{call::Call, expr::Expr, name::Name, stmt::{fmt_block, parse_block, Stmt}},
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parameter of a function definition, such as `x`, `y=1` or `z: float`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Param {
    /// The name of the parameter.
    pub name: Name,

    /// The type annotation, if any.
    pub annotation: Option<Expr>,

    /// The default value, if any.
    pub default: Option<Expr>,
}

impl Param {
    /// Creates a parameter with no annotation or default value.
    pub fn new(name: Name) -> Self {
        Self { name, annotation: None, default: None }
    }
}

impl Parse for Param {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        let annotation = match input.eat(TokenKind::Colon) {
            Some(_) => Some(input.try_parse::<Expr>()?),
            None => None,
        };
        let default = match input.eat(TokenKind::Assign) {
            Some(_) => Some(input.try_parse::<Expr>()?),
            None => None,
        };
        Ok(Self { name, annotation, default })
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match (&self.annotation, &self.default) {
            (Some(annotation), Some(default)) => write!(f, ": {} = {}", annotation, default),
            (Some(annotation), None) => write!(f, ": {}", annotation),
            (None, Some(default)) => write!(f, "={}", default),
            (None, None) => Ok(()),
        }
    }
}

/// A function definition, such as `def f(x): return x ** 2`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDef {
    /// The decorators applied to the function, in source order.
    pub decorators: Vec<Expr>,

    /// The name of the function.
    pub name: Name,

    /// The parameters of the function, in order.
    pub params: Vec<Param>,

    /// The return annotation, if any.
    pub returns: Option<Expr>,

    /// The statements of the function body.
    pub body: Vec<Stmt>,

    /// The region of the source code that this function was parsed from.
    pub span: Range<usize>,
}

impl FunctionDef {
    /// Returns the span of the function definition.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the names of the parameters, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.params.iter().map(|param| param.name.id.as_str())
    }

    /// Parses a function definition, including its decorators, whose lines are indented by
    /// `indent` columns.
    pub(crate) fn parse_at(input: &mut Parser, indent: usize) -> Result<Self, Error> {
        let start = input.span().start;

        let mut decorators = Vec::new();
        while input.eat(TokenKind::At).is_some() {
            decorators.push(Call::parse_primary(input)?);
            input.expect_line_end()?;
            match input.peek_line_indent() {
                Some(found) if found == indent => input.skip_newlines(),
                Some(found) => {
                    input.skip_newlines();
                    return Err(input.error(kind::InconsistentIndentation { expected: indent, found }));
                },
                None => return Err(Error::new(vec![input.eof_span()], kind::UnexpectedEof)),
            }
        }

        input.expect(&[TokenKind::Def])?;
        let name = input.try_parse::<Name>()?;
        input.expect(&[TokenKind::OpenParen])?;
        let params = input.parenthesized(|input| {
            let mut params = Vec::new();
            while input.eat(TokenKind::CloseParen).is_none() {
                params.push(input.try_parse::<Param>()?);
                if input.eat(TokenKind::Comma).is_none() {
                    input.expect(&[TokenKind::CloseParen])?;
                    break;
                }
            }
            Ok(params)
        })?;

        let returns = match input.eat(TokenKind::Arrow) {
            Some(_) => Some(input.try_parse::<Expr>()?),
            None => None,
        };
        input.expect(&[TokenKind::Colon])?;
        let body = parse_block(input, indent)?;

        Ok(Self {
            decorators,
            name,
            params,
            returns,
            body,
            span: start..input.prev_end(),
        })
    }
}

impl Parse for FunctionDef {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let indent = input.leading_indent();
        input.skip_newlines();
        Self::parse_at(input, indent)
    }
}

impl std::fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for decorator in &self.decorators {
            writeln!(f, "@{}", decorator)?;
        }
        write!(f, "def {}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")?;
        if let Some(returns) = &self.returns {
            write!(f, " -> {}", returns)?;
        }
        writeln!(f, ":")?;
        fmt_block(f, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn display_round_trip() {
        let source = "\
@functools.cache
def f(x: float, y=1) -> float:
    z = x + y
    if z > 0:
        return z
    return 0
";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        assert_eq!(func.to_string(), source);
        assert_eq!(func.span(), 0..source.len() - 1);
    }

    #[test]
    fn nested_definition() {
        let source = "def f(x):\n    def g(y):\n        return y\n    return g(x)\n";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        assert!(matches!(func.body[..], [Stmt::FunctionDef(_), Stmt::Return(_)]));
    }

    #[test]
    fn leading_blank_lines() {
        let source = "\n\n    def f(x):\n        return x\n";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        assert_eq!(func.name.id, "f");
    }

    #[test]
    fn keyword_parameter_is_rejected() {
        assert!(Parser::new("def f(lambda): return 1").try_parse_full::<FunctionDef>().is_err());
    }
}
