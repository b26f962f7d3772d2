//! The table of function expansion rules.
//!
//! Every rule receives the arguments of a call and the span of the call, and returns the defining
//! expression of the function, or [`None`] if the arguments do not fit the function. Nodes created
//! by a rule use the span of the call they replace.

use mathify_parser::parser::{
    ast::{BinOp, Call, Constant, Expr, Name},
    token::op::BinOpKind,
};
use once_cell::sync::Lazy;
use std::{collections::HashMap, ops::Range};

/// Builds the replacement for a call with the given arguments.
pub type ExpandFn = fn(&[Expr], Range<usize>) -> Option<Expr>;

/// A rule that rewrites a call to a function into the function's definition.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionRule {
    /// The name of the function, as it is called.
    pub name: &'static str,

    /// Builds the replacement expression.
    pub expand: ExpandFn,
}

/// Every expansion rule, keyed by function name.
pub static RULES: Lazy<HashMap<&'static str, ExpansionRule>> = Lazy::new(|| {
    let rules: [(&'static str, ExpandFn); 7] = [
        ("atan2", atan2),
        ("exp", exp),
        ("exp2", exp2),
        ("expm1", expm1),
        ("hypot", hypot),
        ("log1p", log1p),
        ("pow", pow),
    ];
    rules
        .into_iter()
        .map(|(name, expand)| (name, ExpansionRule { name, expand }))
        .collect()
});

fn int(value: u32, span: &Range<usize>) -> Expr {
    Expr::Constant(Constant::int(value, span.clone()))
}

fn binary(left: Expr, op: BinOpKind, right: Expr, span: &Range<usize>) -> Expr {
    Expr::BinOp(BinOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
        span: span.clone(),
    })
}

fn call(name: &str, args: Vec<Expr>, span: &Range<usize>) -> Expr {
    Expr::Call(Call::named(name, args, span.clone()))
}

/// `atan2(y, x)` is `atan(y / x)`.
///
/// This is only equal to the two-argument arctangent when `x` is positive.
fn atan2(args: &[Expr], span: Range<usize>) -> Option<Expr> {
    let [y, x] = args else { return None };
    let ratio = binary(y.clone(), BinOpKind::Div, x.clone(), &span);
    Some(call("atan", vec![ratio], &span))
}

/// `exp(x)` is `e ** x`.
fn exp(args: &[Expr], span: Range<usize>) -> Option<Expr> {
    let [x] = args else { return None };
    let e = Expr::Name(Name::with_span("e", span.clone()));
    Some(binary(e, BinOpKind::Pow, x.clone(), &span))
}

/// `exp2(x)` is `2 ** x`.
fn exp2(args: &[Expr], span: Range<usize>) -> Option<Expr> {
    let [x] = args else { return None };
    Some(binary(int(2, &span), BinOpKind::Pow, x.clone(), &span))
}

/// `expm1(x)` is `exp(x) - 1`. The `exp` call is expanded further only if `exp` is expanded too.
fn expm1(args: &[Expr], span: Range<usize>) -> Option<Expr> {
    let [x] = args else { return None };
    let exp = call("exp", vec![x.clone()], &span);
    Some(binary(exp, BinOpKind::Sub, int(1, &span), &span))
}

/// `hypot(a, b, ...)` is `sqrt(a ** 2 + b ** 2 + ...)`, and `hypot()` is `0`.
fn hypot(args: &[Expr], span: Range<usize>) -> Option<Expr> {
    let sum = args
        .iter()
        .map(|arg| binary(arg.clone(), BinOpKind::Pow, int(2, &span), &span))
        .reduce(|sum, square| binary(sum, BinOpKind::Add, square, &span));

    Some(match sum {
        Some(sum) => call("sqrt", vec![sum], &span),
        None => int(0, &span),
    })
}

/// `log1p(x)` is `log(1 + x)`.
fn log1p(args: &[Expr], span: Range<usize>) -> Option<Expr> {
    let [x] = args else { return None };
    let sum = binary(int(1, &span), BinOpKind::Add, x.clone(), &span);
    Some(call("log", vec![sum], &span))
}

/// `pow(x, y)` is `x ** y`.
fn pow(args: &[Expr], span: Range<usize>) -> Option<Expr> {
    let [x, y] = args else { return None };
    Some(binary(x.clone(), BinOpKind::Pow, y.clone(), &span))
}

#[cfg(test)]
mod tests {
    use mathify_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn expand(source: &str) -> Option<String> {
        let Expr::Call(call) = Parser::new(source).try_parse_full::<Expr>().unwrap() else {
            panic!("expected call")
        };
        let rule = RULES[call.func_name().unwrap()];
        (rule.expand)(&call.args, call.span()).map(|expr| expr.to_string())
    }

    #[test]
    fn replacements() {
        assert_eq!(expand("atan2(y, x)").as_deref(), Some("atan(y / x)"));
        assert_eq!(expand("exp(x)").as_deref(), Some("e ** x"));
        assert_eq!(expand("exp2(x + 1)").as_deref(), Some("2 ** (x + 1)"));
        assert_eq!(expand("expm1(x)").as_deref(), Some("exp(x) - 1"));
        assert_eq!(expand("hypot(x, y, z)").as_deref(), Some("sqrt(x ** 2 + y ** 2 + z ** 2)"));
        assert_eq!(expand("hypot()").as_deref(), Some("0"));
        assert_eq!(expand("log1p(x)").as_deref(), Some("log(1 + x)"));
        assert_eq!(expand("pow(x, y)").as_deref(), Some("x ** y"));
    }

    #[test]
    fn arity_mismatch() {
        assert_eq!(expand("atan2(y)"), None);
        assert_eq!(expand("pow(x, y, z)"), None);
        assert_eq!(expand("exp()"), None);
    }

    #[test]
    fn replacement_takes_call_span() {
        let Expr::Call(call) = Parser::new("  pow(x, y)").try_parse_full::<Expr>().unwrap() else {
            panic!("expected call")
        };
        let expr = (RULES["pow"].expand)(&call.args, call.span()).unwrap();
        assert_eq!(expr.span(), 2..11);
    }
}
