use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"#[^\r\n]*")]
pub enum TokenKind {
    /// One or more line breaks, including the indentation of the following line.
    #[regex(r"(\r?\n[ \t]*)+")]
    NewLine,

    #[regex(r"[ \t]+")]
    #[regex(r"\\\r?\n")]
    Whitespace,

    #[token("==")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("<")]
    Less,

    #[token("<=")]
    LessEq,

    #[token(">")]
    Greater,

    #[token(">=")]
    GreaterEq,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("@")]
    At,

    #[token("/")]
    Div,

    #[token("//")]
    FloorDiv,

    #[token("%")]
    Mod,

    #[token("**")]
    Exp,

    #[token("<<")]
    BitLeft,

    #[token(">>")]
    BitRight,

    #[token("&")]
    BitAnd,

    #[token("|")]
    BitOr,

    #[token("^")]
    BitXor,

    #[token("~")]
    BitNot,

    #[token("=")]
    Assign,

    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("@=")]
    #[token("/=")]
    #[token("//=")]
    #[token("%=")]
    #[token("**=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    AugAssign,

    #[token("->")]
    Arrow,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("...")]
    Ellipsis,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("def")]
    Def,

    #[token("return")]
    Return,

    #[token("if")]
    If,

    #[token("elif")]
    Elif,

    #[token("else")]
    Else,

    #[token("pass")]
    Pass,

    #[token("and")]
    And,

    #[token("or")]
    Or,

    #[token("not")]
    Not,

    #[token("in")]
    In,

    #[token("is")]
    Is,

    #[token("None")]
    None,

    #[token("True")]
    True,

    #[token("False")]
    False,

    /// A Python keyword that introduces syntax outside the supported subset.
    #[regex("for|while|try|except|finally|with|class|lambda|import|from|global|nonlocal|del|raise|assert|yield|async|await|break|continue|match")]
    Keyword,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Name,

    #[regex(r"[0-9](_?[0-9])*")]
    #[regex(r"0[xX](_?[0-9a-fA-F])+")]
    #[regex(r"0[oO](_?[0-7])+")]
    #[regex(r"0[bB](_?[01])+")]
    Int,

    #[regex(r"[0-9](_?[0-9])*\.([0-9](_?[0-9])*)?([eE][+-]?[0-9](_?[0-9])*)?")]
    #[regex(r"\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?")]
    #[regex(r"[0-9](_?[0-9])*[eE][+-]?[0-9](_?[0-9])*")]
    Float,

    #[regex(r"([0-9](_?[0-9])*(\.([0-9](_?[0-9])*)?)?|\.[0-9](_?[0-9])*)([eE][+-]?[0-9](_?[0-9])*)?[jJ]")]
    Imaginary,

    #[regex(r#"[rRuU]?"([^"\\\r\n]|\\.)*""#)]
    #[regex(r#"[rRuU]?'([^'\\\r\n]|\\.)*'"#)]
    Str,

    #[regex(r#"([bB][rR]?|[rR][bB])"([^"\\\r\n]|\\.)*""#)]
    #[regex(r#"([bB][rR]?|[rR][bB])'([^'\\\r\n]|\\.)*'"#)]
    Bytes,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace that never separates statements.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// For a [`TokenKind::NewLine`] token, returns the indentation width of the line that follows
    /// it. Tabs count as a single column.
    pub fn indent(&self) -> usize {
        let last_line = self.lexeme.rsplit('\n').next().unwrap_or("");
        last_line.chars().filter(|c| *c == ' ' || *c == '\t').count()
    }
}
