//! Formatting of literal constants.

pub mod float;

use crate::error::UnsupportedConstant;
use float::General;
use mathify_parser::parser::ast::literal::{bytes_repr, complex_repr, float_repr, Literal};

/// Escapes the text for use inside a quoted string.
pub(crate) fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Formats a float to the given number of significant figures, writing any power of ten as an
/// explicit multiplication.
fn format_float(value: f64, figures: usize) -> String {
    match General::format(value, figures) {
        General::Fixed(text) => text,
        General::Scientific { mantissa, exponent } => {
            format!("{} times 10^({})", mantissa, exponent)
        },
    }
}

/// Formats a constant as a math token.
///
/// Floats and complex numbers are formatted to `sig_figs` significant figures if given, or with
/// the shortest text that reads back as the same value otherwise.
///
/// ```
/// use mathify_codegen::format_constant;
/// use mathify_parser::parser::ast::Literal;
///
/// assert_eq!(format_constant(&Literal::Float(0.0000123456), Some(3)).unwrap(), "1.23 times 10^(-5)");
/// assert_eq!(format_constant(&Literal::Str("hi".to_string()), None).unwrap(), r#""\"hi\"""#);
/// ```
pub fn format_constant(value: &Literal, sig_figs: Option<usize>) -> Result<String, UnsupportedConstant> {
    Ok(match value {
        Literal::None => "\"None\"".to_string(),
        Literal::Bool(true) => "\"True\"".to_string(),
        Literal::Bool(false) => "\"False\"".to_string(),
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) => match sig_figs {
            Some(figures) => format_float(*f, figures),
            None => float_repr(*f),
        },
        Literal::Complex { re, im } => match sig_figs {
            Some(figures) => {
                let sign = if im.is_sign_negative() { "-" } else { "+" };
                format!(
                    "{}{}{}j",
                    format_float(*re, figures),
                    sign,
                    format_float(im.abs(), figures),
                )
            },
            None => complex_repr(*re, *im),
        },
        Literal::Str(s) => format!("\"\\\"{}\\\"\"", escape(s)),
        Literal::Bytes(b) => format!("\"{}\"", escape(&bytes_repr(b))),
        Literal::Ellipsis => "dots.c".to_string(),
        Literal::Opaque { kind } => return Err(UnsupportedConstant { kind: kind.clone() }),
    })
}
