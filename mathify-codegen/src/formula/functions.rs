//! The mathematical functions that have a dedicated notation.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How a call to a known function is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// An operator word, applied without parentheses to a single atomic argument (`sin x`) and
    /// with parentheses otherwise (`sin ( x + 1 )`).
    Word(&'static str),

    /// An operator word whose argument is always parenthesized, such as `Gamma ( x )`.
    Applied(&'static str),

    /// A function whose parentheses are part of the notation, such as `sqrt( x )`.
    Enclosing(&'static str),

    /// The postfix factorial, `x!`.
    Factorial,
}

/// The known functions, keyed by their Python name.
pub static FUNCTIONS: Lazy<HashMap<&'static str, Notation>> = Lazy::new(|| {
    use Notation::*;
    HashMap::from([
        ("sin", Word("sin")),
        ("cos", Word("cos")),
        ("tan", Word("tan")),
        ("asin", Word("arcsin")),
        ("acos", Word("arccos")),
        ("atan", Word("arctan")),
        ("arcsin", Word("arcsin")),
        ("arccos", Word("arccos")),
        ("arctan", Word("arctan")),
        ("sinh", Word("sinh")),
        ("cosh", Word("cosh")),
        ("tanh", Word("tanh")),
        ("asinh", Word("op(\"arsinh\")")),
        ("acosh", Word("op(\"arcosh\")")),
        ("atanh", Word("op(\"artanh\")")),
        ("exp", Word("exp")),
        ("log", Word("log")),
        ("ln", Word("ln")),
        ("log2", Word("log_2")),
        ("log10", Word("log_10")),
        ("gamma", Applied("Gamma")),
        ("sqrt", Enclosing("sqrt")),
        ("abs", Enclosing("abs")),
        ("fabs", Enclosing("abs")),
        ("floor", Enclosing("floor")),
        ("ceil", Enclosing("ceil")),
        ("factorial", Factorial),
    ])
});
