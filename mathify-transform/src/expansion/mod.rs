//! Rewrites calls to well-known functions into their defining formulas, such as `exp(x)` into
//! `e ** x`.
//!
//! Only the functions chosen by the caller are expanded. The rules themselves live in [`rules`].

pub mod rules;

use crate::{
    error::UnknownExpansion,
    transform::{walk_expr, Transform},
};
use levenshtein::levenshtein;
use log::debug;
use mathify_error::Error;
use mathify_parser::parser::ast::{Call, Expr};
pub use rules::{ExpansionRule, RULES};
use std::collections::{BTreeSet, HashSet};

/// Returns the names of every function that can be expanded, in alphabetical order.
pub fn rule_names() -> BTreeSet<&'static str> {
    RULES.keys().copied().collect()
}

/// Returns the names of expansion rules that are spelled similarly to the given name.
fn similar_names(name: &str) -> Vec<String> {
    rule_names()
        .into_iter()
        .filter(|rule| levenshtein(rule, name) <= 2)
        .map(str::to_string)
        .collect()
}

/// Checks that every name in the set has an expansion rule.
pub fn validate<'a>(names: impl IntoIterator<Item = &'a String>) -> Result<(), Error> {
    let mut unknown = names
        .into_iter()
        .filter(|name| !RULES.contains_key(name.as_str()))
        .collect::<Vec<_>>();

    // report the same name regardless of set iteration order
    unknown.sort();
    match unknown.first() {
        Some(name) => Err(Error::new(Vec::new(), UnknownExpansion {
            name: name.to_string(),
            suggestions: similar_names(name),
        })),
        None => Ok(()),
    }
}

/// Expands a single call, without expanding the arguments or the replacement. Returns [`None`] if
/// the callee is not in `names`, or if the arguments do not fit the function.
pub fn expand_call(call: &Call, names: &HashSet<String>) -> Option<Expr> {
    let name = call.func_name()?;
    if !names.contains(name) {
        return None;
    }

    let rule = RULES.get(name)?;
    let Some(expanded) = (rule.expand)(&call.args, call.span()) else {
        debug!("not expanding `{}`: its {} argument(s) do not fit `{}`", call, call.args.len(), name);
        return None;
    };
    debug!("expanded `{}` to `{}`", call, expanded);
    Some(expanded)
}

/// Expands every eligible call in a tree, including calls that appear in replacements.
///
/// Expanding a tree that is already fully expanded returns it unchanged.
#[derive(Debug, Clone, Copy)]
pub struct FunctionExpander<'a> {
    names: &'a HashSet<String>,
}

impl<'a> FunctionExpander<'a> {
    /// Creates an expander for the given function names.
    pub fn new(names: &'a HashSet<String>) -> Self {
        Self { names }
    }
}

impl Transform for FunctionExpander<'_> {
    fn transform_expr(&mut self, expr: Expr) -> Expr {
        let expr = walk_expr(self, expr);
        let expanded = match &expr {
            Expr::Call(call) => expand_call(call, self.names),
            _ => None,
        };
        match expanded {
            Some(expanded) => self.transform_expr(expanded),
            None => expr,
        }
    }
}

#[cfg(test)]
mod tests {
    use mathify_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn names(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn expand(source: &str, expand: &[&str]) -> Expr {
        let expr = Parser::new(source).try_parse_full::<Expr>().unwrap();
        FunctionExpander::new(&names(expand)).transform_expr(expr)
    }

    #[test]
    fn nested_calls() {
        assert_eq!(expand("exp2(exp2(x))", &["exp2"]).to_string(), "2 ** 2 ** x");
        assert_eq!(
            expand("math.hypot(math.hypot(a, b), x)", &["hypot"]).to_string(),
            "sqrt(sqrt(a ** 2 + b ** 2) ** 2 + x ** 2)",
        );
    }

    #[test]
    fn expm1_depends_on_exp() {
        assert_eq!(expand("expm1(x)", &["expm1"]).to_string(), "exp(x) - 1");
        assert_eq!(expand("expm1(x)", &["expm1", "exp"]).to_string(), "e ** x - 1");
    }

    #[test]
    fn only_chosen_names() {
        assert_eq!(expand("pow(exp(x), y)", &["exp"]).to_string(), "pow(e ** x, y)");
    }

    #[test]
    fn calls_that_do_not_fit_stay() {
        let Expr::Call(call) = Parser::new("math.pow(x)").try_parse_full::<Expr>().unwrap() else {
            panic!("expected call");
        };
        assert_eq!(expand_call(&call, &names(&["pow"])), None);
        assert_eq!(expand("pow(x) + pow(x, 2)", &["pow"]).to_string(), "pow(x) + x ** 2");
    }

    #[test]
    fn idempotent() {
        let all = rule_names().into_iter().collect::<Vec<_>>();
        let once = expand("atan2(expm1(a), hypot(pow(b, c), log1p(exp2(d))))", &all);
        let twice = FunctionExpander::new(&names(&all)).transform_expr(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_names() {
        assert!(validate(&names(&["exp", "pow"])).is_ok());

        let err = validate(&names(&["exp", "exp3"])).unwrap_err();
        let kind = err.downcast_ref::<UnknownExpansion>().unwrap();
        assert_eq!(kind.name, "exp3");
        assert_eq!(kind.suggestions, vec!["exp", "exp2", "expm1"]);

        let err = validate(&names(&["sin"])).unwrap_err();
        assert!(err.downcast_ref::<UnknownExpansion>().unwrap().suggestions.is_empty());
    }
}
