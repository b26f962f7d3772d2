use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use rug::Integer;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The value of a literal constant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// `None`.
    None,

    /// `True` or `False`.
    Bool(bool),

    /// An integer of arbitrary size.
    Int(Integer),

    /// A double-precision float.
    Float(f64),

    /// A complex number, such as `2j` or `(1+2j)`.
    Complex { re: f64, im: f64 },

    /// A text string.
    Str(String),

    /// A byte string, such as `b'abc'`.
    Bytes(Vec<u8>),

    /// The ellipsis, `...`.
    Ellipsis,

    /// A constant of a kind that has no representation here. Only produced by tools that build
    /// trees without the parser.
    Opaque {
        /// The name of the constant's runtime type.
        kind: String,
    },
}

impl Literal {
    /// Returns the name of the runtime type of the literal.
    pub fn kind_name(&self) -> &str {
        match self {
            Literal::None => "NoneType",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Complex { .. } => "complex",
            Literal::Str(_) => "str",
            Literal::Bytes(_) => "bytes",
            Literal::Ellipsis => "ellipsis",
            Literal::Opaque { kind } => kind,
        }
    }

    /// Returns true if the literal is a number with a negative sign.
    pub fn is_negative(&self) -> bool {
        match self {
            Literal::Int(n) => *n < 0,
            Literal::Float(f) => f.is_sign_negative() && !f.is_nan(),
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::None => write!(f, "None"),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", float_repr(*n)),
            Literal::Complex { re, im } => write!(f, "{}", complex_repr(*re, *im)),
            Literal::Str(s) => write!(f, "{}", str_repr(s)),
            Literal::Bytes(b) => write!(f, "{}", bytes_repr(b)),
            Literal::Ellipsis => write!(f, "..."),
            Literal::Opaque { kind } => write!(f, "<{}>", kind),
        }
    }
}

/// A literal constant, such as `1`, `2.5`, `'text'` or `None`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant {
    /// The value of the constant.
    pub value: Literal,

    /// The region of the source code that this constant was parsed from.
    pub span: Range<usize>,
}

impl Constant {
    /// Creates a constant with the given span.
    pub fn with_span(value: Literal, span: Range<usize>) -> Self {
        Self { value, span }
    }

    /// Creates an integer constant with the given span.
    pub fn int(value: impl Into<Integer>, span: Range<usize>) -> Self {
        Self { value: Literal::Int(value.into()), span }
    }

    /// Returns the span of the constant.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Constant {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.expect(&[
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Imaginary,
            TokenKind::Str,
            TokenKind::Bytes,
            TokenKind::None,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Ellipsis,
        ])?;
        let invalid = |name| Error::new(vec![token.span.clone()], kind::InvalidLiteral { kind: name });

        let value = match token.kind {
            TokenKind::Int => Literal::Int(parse_int(token.lexeme).ok_or_else(|| invalid("integer"))?),
            TokenKind::Float => Literal::Float(parse_float(token.lexeme).ok_or_else(|| invalid("float"))?),
            TokenKind::Imaginary => {
                let digits = &token.lexeme[..token.lexeme.len() - 1];
                let im = parse_float(digits).ok_or_else(|| invalid("imaginary"))?;
                Literal::Complex { re: 0.0, im }
            },
            TokenKind::Str => {
                // adjacent string literals are concatenated
                let mut value = unescape_str(token.lexeme).ok_or_else(|| invalid("string"))?;
                let mut end = token.span.end;
                while let Some(next) = input.eat(TokenKind::Str) {
                    let part = unescape_str(next.lexeme)
                        .ok_or_else(|| Error::new(vec![next.span.clone()], kind::InvalidLiteral { kind: "string" }))?;
                    value.push_str(&part);
                    end = next.span.end;
                }
                return Ok(Self { value: Literal::Str(value), span: token.span.start..end });
            },
            TokenKind::Bytes => {
                let mut value = unescape_bytes(token.lexeme).ok_or_else(|| invalid("bytes"))?;
                let mut end = token.span.end;
                while let Some(next) = input.eat(TokenKind::Bytes) {
                    let part = unescape_bytes(next.lexeme)
                        .ok_or_else(|| Error::new(vec![next.span.clone()], kind::InvalidLiteral { kind: "bytes" }))?;
                    value.extend(part);
                    end = next.span.end;
                }
                return Ok(Self { value: Literal::Bytes(value), span: token.span.start..end });
            },
            TokenKind::None => Literal::None,
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            _ => Literal::Ellipsis,
        };

        Ok(Self { value, span: token.span })
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// Parses an integer literal in decimal, hexadecimal, octal or binary notation.
fn parse_int(lexeme: &str) -> Option<Integer> {
    let digits = lexeme.replace('_', "");
    let (radix, digits) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ => (10, &digits[..]),
    };
    Integer::from_str_radix(digits, radix).ok()
}

/// Parses a float literal, which may contain underscores between digits.
fn parse_float(lexeme: &str) -> Option<f64> {
    lexeme.replace('_', "").parse().ok()
}

/// Splits a string or bytes literal into its prefix and the text between the quotes.
fn split_quoted(lexeme: &str) -> (&str, &str) {
    let open = lexeme.find(&['\'', '"'][..]).unwrap_or(0);
    let body = lexeme.get(open + 1..lexeme.len().saturating_sub(1)).unwrap_or("");
    (&lexeme[..open], body)
}

/// Reads the escape sequence following a backslash, returning the code point it represents.
/// Unknown escapes return [`None`] and are kept verbatim by the caller.
fn read_escape(chars: &mut std::iter::Peekable<std::str::Chars>, allow_unicode: bool) -> Option<Result<u32, ()>> {
    let hex = |chars: &mut std::iter::Peekable<std::str::Chars>, n: usize| {
        let digits = chars.by_ref().take(n).collect::<String>();
        if digits.len() == n {
            u32::from_str_radix(&digits, 16).map_err(|_| ())
        } else {
            Err(())
        }
    };

    let c = *chars.peek()?;
    let value = match c {
        '\\' | '\'' | '"' => c as u32,
        'n' => '\n' as u32,
        't' => '\t' as u32,
        'r' => '\r' as u32,
        'a' => 0x07,
        'b' => 0x08,
        'f' => 0x0c,
        'v' => 0x0b,
        'x' => {
            chars.next();
            return Some(hex(chars, 2));
        },
        'u' if allow_unicode => {
            chars.next();
            return Some(hex(chars, 4));
        },
        'U' if allow_unicode => {
            chars.next();
            return Some(hex(chars, 8));
        },
        '0'..='7' => {
            let mut value = 0;
            for _ in 0..3 {
                match chars.peek() {
                    Some(d @ '0'..='7') => {
                        value = value * 8 + d.to_digit(8).unwrap_or(0);
                        chars.next();
                    },
                    _ => break,
                }
            }
            return Some(Ok(value));
        },
        _ => return None,
    };
    chars.next();
    Some(Ok(value))
}

/// Decodes the contents of a string literal, including its prefix and quotes.
fn unescape_str(lexeme: &str) -> Option<String> {
    let (prefix, body) = split_quoted(lexeme);
    if prefix.eq_ignore_ascii_case("r") {
        return Some(body.to_owned());
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match read_escape(&mut chars, true) {
            Some(Ok(code)) => out.push(char::from_u32(code)?),
            Some(Err(())) => return None,
            None => out.push('\\'),
        }
    }
    Some(out)
}

/// Decodes the contents of a bytes literal, including its prefix and quotes.
fn unescape_bytes(lexeme: &str) -> Option<Vec<u8>> {
    let (prefix, body) = split_quoted(lexeme);
    if !body.is_ascii() {
        return None;
    }
    if prefix.to_ascii_lowercase().contains('r') {
        return Some(body.as_bytes().to_vec());
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c as u8);
            continue;
        }
        match read_escape(&mut chars, false) {
            Some(Ok(code)) => out.push(u8::try_from(code).ok()?),
            Some(Err(())) => return None,
            None => out.push(b'\\'),
        }
    }
    Some(out)
}

/// Splits a finite float into its sign, its shortest round-trip decimal digits, and the decimal
/// exponent of the first digit.
fn shortest_digits(value: f64) -> (bool, String, i32) {
    // `{:e}` produces the shortest representation that round-trips, e.g. `-1.25e-7`
    let formatted = format!("{:e}", value.abs());
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let digits = mantissa.replace('.', "");
    (value.is_sign_negative(), digits, exponent.parse().unwrap_or(0))
}

/// Formats a float the way Python's `repr` does. If `force_point` is false, whole numbers are
/// written without a trailing `.0`, as in the parts of a complex number.
fn float_repr_with(value: f64, force_point: bool) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let (negative, digits, exponent) = shortest_digits(value);
    let sign = if negative { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        let text = if point <= 0 {
            format!("0.{}{}", "0".repeat((-point) as usize), digits)
        } else if point as usize >= digits.len() {
            let int_part = format!("{}{}", digits, "0".repeat(point as usize - digits.len()));
            if force_point { format!("{}.0", int_part) } else { int_part }
        } else {
            format!("{}.{}", &digits[..point as usize], &digits[point as usize..])
        };
        format!("{}{}", sign, text)
    } else {
        let mantissa = if digits.len() > 1 {
            format!("{}.{}", &digits[..1], &digits[1..])
        } else {
            digits
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exponent.abs())
    }
}

/// Formats a float the way Python's `repr` does, such as `1.0`, `0.1`, `1e-05` or `1e+16`.
pub fn float_repr(value: f64) -> String {
    float_repr_with(value, true)
}

/// Formats a complex number the way Python's `repr` does, such as `2j` or `(1+2j)`.
pub fn complex_repr(re: f64, im: f64) -> String {
    let im_text = float_repr_with(im, false);
    if re == 0.0 && re.is_sign_positive() {
        format!("{}j", im_text)
    } else {
        let im_text = if im_text.starts_with('-') { im_text } else { format!("+{}", im_text) };
        format!("({}{}j)", float_repr_with(re, false), im_text)
    }
}

/// Formats text the way Python's `repr` does, with quotes.
pub fn str_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            },
            c if (c as u32) < 0x20 || c as u32 == 0x7f => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Formats bytes the way Python's `repr` does, such as `b'abc'` or `b'\x00'`.
pub fn bytes_repr(value: &[u8]) -> String {
    let quote = if value.contains(&b'\'') && !value.contains(&b'"') { b'"' } else { b'\'' };
    let mut out = String::with_capacity(value.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &byte in value {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            },
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out.push(quote as char);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Literal {
        Parser::new(source).try_parse_full::<Constant>().unwrap().value
    }

    #[test]
    fn integers() {
        assert_eq!(parse("1_000"), Literal::Int(Integer::from(1000)));
        assert_eq!(parse("0xff"), Literal::Int(Integer::from(255)));
        assert_eq!(parse("0b101"), Literal::Int(Integer::from(5)));
        assert_eq!(
            parse("123456789012345678901234567890").to_string(),
            "123456789012345678901234567890",
        );
    }

    #[test]
    fn strings() {
        assert_eq!(parse(r#""a\tb""#), Literal::Str("a\tb".to_string()));
        assert_eq!(parse(r#"'it' "s""#), Literal::Str("its".to_string()));
        assert_eq!(parse(r#"r'\d'"#), Literal::Str("\\d".to_string()));
        assert_eq!(parse(r#"b'\x00a'"#), Literal::Bytes(vec![0, b'a']));
    }

    #[test]
    fn float_repr_matches_python() {
        assert_eq!(float_repr(1.0), "1.0");
        assert_eq!(float_repr(0.1), "0.1");
        assert_eq!(float_repr(-2.5), "-2.5");
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(0.00001), "1e-05");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(1.5e16), "1.5e+16");
        assert_eq!(float_repr(123456.0), "123456.0");
        assert_eq!(float_repr(f64::INFINITY), "inf");
    }

    #[test]
    fn complex_repr_matches_python() {
        assert_eq!(complex_repr(0.0, 2.0), "2j");
        assert_eq!(complex_repr(1.0, 2.0), "(1+2j)");
        assert_eq!(complex_repr(1.5, -0.5), "(1.5-0.5j)");
    }

    #[test]
    fn bytes_repr_matches_python() {
        assert_eq!(bytes_repr(b"abc"), "b'abc'");
        assert_eq!(bytes_repr(b"\x00\n"), "b'\\x00\\n'");
        assert_eq!(bytes_repr(b"it's"), "b\"it's\"");
    }
}
