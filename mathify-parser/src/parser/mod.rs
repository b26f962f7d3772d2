pub mod ast;
pub mod error;
pub mod token;

use error::{Error, kind};
use mathify_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for the language. This is the type to use to parse an arbitrary piece of
/// code into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// How many parentheses are currently open. Line breaks are insignificant inside them.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            depth: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next significant token, or the end of the source code if there is
    /// none.
    pub fn span(&self) -> Range<usize> {
        self.significant_index(self.cursor)
            .map_or(self.eof_span(), |index| self.tokens[index].span.clone())
    }

    /// Returns the end of the span of the last consumed token.
    pub fn prev_end(&self) -> usize {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map_or(0, |token| token.span.end)
    }

    /// Returns the index of the first token at or after `from` that is not skipped.
    fn significant_index(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&index| {
            let kind = self.tokens[index].kind;
            !(kind.is_whitespace() || (self.depth > 0 && kind == TokenKind::NewLine))
        })
    }

    /// Returns the current token without moving the cursor. Whitespace is skipped, as are line
    /// breaks inside parentheses.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.significant_index(self.cursor).map(|index| &self.tokens[index])
    }

    /// Returns the kind of the current token, if any.
    pub fn peek(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Returns true if the current token is of the given kind.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.significant_index(self.cursor) {
            Some(index) => {
                self.cursor = index + 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(self.tokens[index].clone())
            },
            None => {
                self.cursor = self.tokens.len();
                Err(self.error(kind::UnexpectedEof))
            },
        }
    }

    /// Consumes the next token if it is of the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'source>> {
        if self.at(kind) {
            self.next_token().ok()
        } else {
            None
        }
    }

    /// Consumes the next token, which must be of the given kind.
    pub fn expect(&mut self, expected: &'static [TokenKind]) -> Result<Token<'source>, Error> {
        let span = self.span();
        let token = self.next_token()?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            Err(Error::new(vec![span], kind::UnexpectedToken {
                expected,
                found: token.kind,
            }))
        }
    }

    /// Creates an error for the current token, which is not one of the expected kinds.
    pub fn unexpected(&self, expected: &'static [TokenKind]) -> Error {
        match self.current_token() {
            Some(token) if token.kind == TokenKind::Keyword => self.error(kind::UnsupportedSyntax {
                keyword: token.lexeme.to_string(),
            }),
            Some(token) => self.error(kind::UnexpectedToken { expected, found: token.kind }),
            None => self.error(kind::UnexpectedEof),
        }
    }

    /// Runs the given function with line breaks made insignificant, as they are inside
    /// parentheses.
    pub fn parenthesized<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// If the next significant tokens are line breaks, returns the indentation of the line that
    /// follows them. Returns [`None`] if the next token is not a line break, or if only line
    /// breaks remain.
    pub fn peek_line_indent(&self) -> Option<usize> {
        let mut index = self.cursor;
        let mut indent = None;
        while let Some(token) = self.tokens.get(index) {
            match token.kind {
                TokenKind::Whitespace => {},
                TokenKind::NewLine => indent = Some(token.indent()),
                _ => return indent,
            }
            index += 1;
        }
        None
    }

    /// Returns the kind of the first token after any line breaks at the cursor.
    pub fn peek_past_newlines(&self) -> Option<TokenKind> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| token.kind != TokenKind::NewLine && !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns an error unless the cursor is at the end of a line or of the source code.
    pub fn expect_line_end(&self) -> Result<(), Error> {
        match self.peek() {
            None | Some(TokenKind::NewLine) => Ok(()),
            Some(_) => Err(self.unexpected(&[TokenKind::NewLine])),
        }
    }

    /// Consumes any line breaks and whitespace at the cursor.
    pub fn skip_newlines(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if token.kind == TokenKind::NewLine || token.kind.is_whitespace() {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the indentation of the first line of code.
    pub fn leading_indent(&self) -> usize {
        match self.tokens.first() {
            Some(token) if token.kind == TokenKind::Whitespace => token.lexeme.len(),
            Some(token) if token.kind == TokenKind::NewLine => self.peek_line_indent().unwrap_or(0),
            _ => 0,
        }
    }

    /// Returns true if only whitespace and line breaks remain.
    pub fn is_exhausted(&self) -> bool {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .all(|token| token.kind == TokenKind::NewLine || token.kind.is_whitespace())
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        let (start, depth) = (self.cursor, self.depth);
        match T::parse(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                self.depth = depth;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.is_exhausted() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of the conditional expression (`a if c else b`).
    IfExp,

    /// Precedence of logical or (`or`).
    Or,

    /// Precedence of logical and (`and`).
    And,

    /// Precedence of logical not (`not`).
    Not,

    /// Precedence of comparisons, membership and identity tests.
    Compare,

    /// Precedence of bitwise or (`|`).
    BitOr,

    /// Precedence of bitwise xor (`^`).
    BitXor,

    /// Precedence of bitwise and (`&`).
    BitAnd,

    /// Precedence of bitshifts (`<<` and `>>`).
    Shift,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`, `@`), division (`/`, `//`), and modulo (`%`), which
    /// separate factors.
    Factor,

    /// Precedence of unary plus, minus and bitwise not.
    Unary,

    /// Precedence of exponentiation (`**`).
    Exp,

    /// Names, literals, calls and attribute access.
    Atom,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Expr, FunctionDef, Stmt};

    fn parse_expr(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    #[test]
    fn precedence_is_ordered() {
        assert!(Precedence::Or < Precedence::And);
        assert!(Precedence::Term < Precedence::Factor);
        assert!(Precedence::Unary < Precedence::Exp);
    }

    #[test]
    fn python_precedence() {
        assert_eq!(parse_expr("a + b * c ** d").to_string(), "a + b * c ** d");
        assert_eq!(parse_expr("(a + b) * c").to_string(), "(a + b) * c");
        assert_eq!(parse_expr("-x ** 2").to_string(), "-x ** 2");
        assert_eq!(parse_expr("(-x) ** 2").to_string(), "(-x) ** 2");
        assert_eq!(parse_expr("a - (b - c)").to_string(), "a - (b - c)");
        assert_eq!(parse_expr("(a - b) - c").to_string(), "a - b - c");
        assert_eq!(parse_expr("(a ** b) ** c").to_string(), "(a ** b) ** c");
        assert_eq!(parse_expr("a ** b ** c").to_string(), "a ** b ** c");
    }

    #[test]
    fn boolean_and_comparison() {
        assert_eq!(
            parse_expr("not a < b and c or d is not None").to_string(),
            "not a < b and c or d is not None",
        );
        assert_eq!(parse_expr("0 <= x < 1").to_string(), "0 <= x < 1");
        assert_eq!(parse_expr("x not in y").to_string(), "x not in y");
    }

    #[test]
    fn conditional_expression() {
        assert_eq!(parse_expr("a if x > 0 else -a").to_string(), "a if x > 0 else -a");
    }

    #[test]
    fn calls_and_attributes() {
        assert_eq!(parse_expr("math.atan2(y, x)").to_string(), "math.atan2(y, x)");
        assert_eq!(parse_expr("self.f(\n    x,\n    y,\n)").to_string(), "self.f(x, y)");
    }

    #[test]
    fn function_definition() {
        let source = "\
@decorator
def f(x, y=1) -> float:
    # comment
    z = x + y

    if z > 0:
        return z
    elif z < 0:
        return -z
    else:
        return 0
";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        assert_eq!(func.name.id, "f");
        assert_eq!(func.param_names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(func.body.len(), 2);
        assert!(matches!(func.body[0], Stmt::Assign(_)));
        match &func.body[1] {
            Stmt::If(if_stmt) => {
                assert_eq!(if_stmt.test.to_string(), "z > 0");
                assert!(matches!(if_stmt.orelse[..], [Stmt::If(_)]));
            },
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn indented_method() {
        let source = "    def f(self, x):\n        return self.g(x)\n";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        assert_eq!(func.param_names().collect::<Vec<_>>(), vec!["self", "x"]);
    }

    #[test]
    fn single_line_body() {
        let func = Parser::new("def f(x): return x").try_parse_full::<FunctionDef>().unwrap();
        assert_eq!(func.body.len(), 1);
    }

    #[test]
    fn spans_cover_source() {
        let source = "def f(x):\n    return foo(x)\n";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        let Stmt::Return(ret) = &func.body[0] else { panic!("expected return") };
        let value = ret.value.as_ref().unwrap();
        assert_eq!(&source[value.span()], "foo(x)");
    }

    #[test]
    fn rejects_loops() {
        let source = "def f(x):\n    for i in x:\n        pass\n    return x\n";
        let err = Parser::new(source).try_parse_full::<FunctionDef>().unwrap_err();
        assert!(err.is::<kind::UnsupportedSyntax>());
    }

    #[test]
    fn rejects_bad_dedent() {
        let source = "def f(x):\n        y = 1\n    return y\n";
        let err = Parser::new(source).try_parse_full::<FunctionDef>().unwrap_err();
        assert!(err.is::<kind::InconsistentIndentation>());
    }
}
