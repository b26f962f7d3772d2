use crate::{
    parser::{
        ast::{
            assign::{parse_assign_or_expr, Assign, AugAssign},
            expr::Expr,
            function::FunctionDef,
        },
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A statement in a function body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stmt {
    /// An assignment, such as `x = 1`.
    Assign(Assign),

    /// An augmented assignment, such as `x += 1`.
    AugAssign(AugAssign),

    /// An expression evaluated for its side effects, such as `print(x)`.
    Expr(ExprStmt),

    /// The `pass` statement.
    Pass(Pass),

    /// A `return` statement.
    Return(Return),

    /// An `if` statement. `elif` branches are nested `if` statements in the `else` branch.
    If(If),

    /// A nested function definition.
    FunctionDef(FunctionDef),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn span(&self) -> Range<usize> {
        match self {
            Stmt::Assign(assign) => assign.span(),
            Stmt::AugAssign(aug) => aug.span(),
            Stmt::Expr(expr) => expr.span.clone(),
            Stmt::Pass(pass) => pass.span.clone(),
            Stmt::Return(ret) => ret.span.clone(),
            Stmt::If(if_stmt) => if_stmt.span.clone(),
            Stmt::FunctionDef(func) => func.span(),
        }
    }

    /// Returns the name of the kind of statement, such as `Assign` or `Return`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Assign(_) => "Assign",
            Stmt::AugAssign(_) => "AugAssign",
            Stmt::Expr(_) => "Expr",
            Stmt::Pass(_) => "Pass",
            Stmt::Return(_) => "Return",
            Stmt::If(_) => "If",
            Stmt::FunctionDef(_) => "FunctionDef",
        }
    }

    /// Parses a statement that starts at the cursor, in a block indented by `indent` columns.
    pub(crate) fn parse_in_block(input: &mut Parser, indent: usize) -> Result<Self, Error> {
        match input.peek() {
            Some(TokenKind::Def | TokenKind::At) => FunctionDef::parse_at(input, indent).map(Stmt::FunctionDef),
            Some(TokenKind::If) => If::parse_at(input, indent).map(Stmt::If),
            _ => {
                let stmt = Self::parse_simple(input)?;
                input.expect_line_end()?;
                Ok(stmt)
            },
        }
    }

    /// Parses a statement that fits on a single line.
    fn parse_simple(input: &mut Parser) -> Result<Self, Error> {
        match input.peek() {
            Some(TokenKind::Return) => {
                let token = input.next_token()?;
                let value = match input.peek() {
                    None | Some(TokenKind::NewLine) => None,
                    Some(TokenKind::Keyword) => return Err(input.unexpected(&[TokenKind::Name])),
                    _ => {
                        let value = input.try_parse::<Expr>()?;
                        if input.at(TokenKind::Comma) {
                            return Err(Error::new(
                                vec![value.span().start..input.span().end],
                                kind::UnexpectedTuple,
                            ));
                        }
                        Some(value)
                    },
                };
                Ok(Stmt::Return(Return {
                    value,
                    span: token.span.start..input.prev_end(),
                }))
            },
            Some(TokenKind::Pass) => {
                let token = input.next_token()?;
                Ok(Stmt::Pass(Pass { span: token.span }))
            },
            Some(TokenKind::Keyword) => Err(input.unexpected(&[TokenKind::Name])),
            _ => parse_assign_or_expr(input),
        }
    }
}

impl Parse for Stmt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.skip_newlines();
        let indent = input.leading_indent();
        Self::parse_in_block(input, indent)
    }
}

impl std::fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Assign(assign) => assign.fmt(f),
            Stmt::AugAssign(aug) => aug.fmt(f),
            Stmt::Expr(expr) => expr.value.fmt(f),
            Stmt::Pass(_) => write!(f, "pass"),
            Stmt::Return(ret) => ret.fmt(f),
            Stmt::If(if_stmt) => if_stmt.fmt(f),
            Stmt::FunctionDef(func) => func.fmt(f),
        }
    }
}

/// Parses the block that follows a colon: either a simple statement on the same line, or one or
/// more statements on the following lines, indented further than `outer` columns.
pub(crate) fn parse_block(input: &mut Parser, outer: usize) -> Result<Vec<Stmt>, Error> {
    if !input.at(TokenKind::NewLine) {
        let stmt = Stmt::parse_simple(input)?;
        input.expect_line_end()?;
        return Ok(vec![stmt]);
    }

    let indent = match input.peek_line_indent() {
        Some(indent) if indent > outer => indent,
        Some(_) => return Err(Error::new(vec![input.span()], kind::ExpectedIndentedBlock { outer })),
        None => return Err(Error::new(vec![input.eof_span()], kind::UnexpectedEof)),
    };

    let mut body = Vec::new();
    while input.peek_line_indent() == Some(indent) {
        input.skip_newlines();
        body.push(Stmt::parse_in_block(input, indent)?);
    }

    // a line that is neither in this block nor in the enclosing one
    match input.peek_line_indent() {
        Some(found) if found > outer => {
            input.skip_newlines();
            Err(input.error(kind::InconsistentIndentation { expected: indent, found }))
        },
        _ => Ok(body),
    }
}

/// Writes a block of statements, each line indented by four spaces.
pub(crate) fn fmt_block(f: &mut fmt::Formatter<'_>, body: &[Stmt]) -> fmt::Result {
    for stmt in body {
        for line in stmt.to_string().lines() {
            writeln!(f, "    {}", line)?;
        }
    }
    Ok(())
}

/// An expression statement, such as `print(x)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExprStmt {
    /// The expression.
    pub value: Expr,

    /// The region of the source code that this statement was parsed from.
    pub span: Range<usize>,
}

/// The `pass` statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pass {
    /// The region of the source code that this statement was parsed from.
    pub span: Range<usize>,
}

/// A `return` statement, with an optional value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Return {
    /// The returned value. A bare `return` returns `None`.
    pub value: Option<Expr>,

    /// The region of the source code that this statement was parsed from.
    pub span: Range<usize>,
}

impl std::fmt::Display for Return {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {}", value),
            None => write!(f, "return"),
        }
    }
}

/// An `if` statement, such as `if x > 0: return x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct If {
    /// The condition.
    pub test: Expr,

    /// The statements executed if the condition is true.
    pub body: Vec<Stmt>,

    /// The statements executed otherwise. An `elif` branch is a single nested [`If`].
    pub orelse: Vec<Stmt>,

    /// The region of the source code that this statement was parsed from.
    pub span: Range<usize>,
}

impl If {
    /// Parses an `if` statement, or the `elif` branch of one, at the given indentation.
    fn parse_at(input: &mut Parser, indent: usize) -> Result<Self, Error> {
        let keyword = input.expect(&[TokenKind::If, TokenKind::Elif])?;
        let test = input.try_parse::<Expr>()?;
        input.expect(&[TokenKind::Colon])?;
        let body = parse_block(input, indent)?;

        let continues = input.peek_line_indent().map_or(true, |found| found == indent);
        let orelse = match input.peek_past_newlines() {
            Some(TokenKind::Elif) if continues => {
                input.skip_newlines();
                vec![Stmt::If(Self::parse_at(input, indent)?)]
            },
            Some(TokenKind::Else) if continues => {
                input.skip_newlines();
                input.next_token()?;
                input.expect(&[TokenKind::Colon])?;
                parse_block(input, indent)?
            },
            _ => Vec::new(),
        };

        Ok(Self {
            test,
            body,
            orelse,
            span: keyword.span.start..input.prev_end(),
        })
    }
}

impl std::fmt::Display for If {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "if {}:", self.test)?;
        fmt_block(f, &self.body)?;
        match &self.orelse[..] {
            [] => Ok(()),
            [Stmt::If(elif)] => write!(f, "el{}", elif),
            orelse => {
                writeln!(f, "else:")?;
                fmt_block(f, orelse)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn bare_return() {
        let stmt = Parser::new("return").try_parse_full::<Stmt>().unwrap();
        assert_eq!(stmt, Stmt::Return(Return { value: None, span: 0..6 }));
    }

    #[test]
    fn return_tuple_is_rejected() {
        let err = Parser::new("return a, b").try_parse_full::<Stmt>().unwrap_err();
        assert!(err.is::<kind::UnexpectedTuple>());
    }

    #[test]
    fn if_else_display() {
        let source = "if x:\n    return 1\nelif y:\n    return 2\nelse:\n    return 3\n";
        let stmt = Parser::new(source).try_parse_full::<Stmt>().unwrap();
        assert_eq!(stmt.kind_name(), "If");
        assert_eq!(stmt.to_string(), source);
    }

    #[test]
    fn same_line_branches() {
        let source = "if x: return 1\nelse: return 2";
        let Stmt::If(if_stmt) = Parser::new(source).try_parse_full::<Stmt>().unwrap() else {
            panic!("expected if statement")
        };
        assert_eq!(if_stmt.body.len(), 1);
        assert_eq!(if_stmt.orelse.len(), 1);
    }

    #[test]
    fn missing_indented_block() {
        let err = Parser::new("if x:\nreturn 1").try_parse_full::<Stmt>().unwrap_err();
        assert!(err.is::<kind::ExpectedIndentedBlock>());
    }
}
