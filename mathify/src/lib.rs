//! Typesets Python functions as Typst-style math formulas.
//!
//! A function definition is rewritten by a series of transformations, then rendered as a single
//! formula string:
//!
//! ```
//! use mathify::{convert_source, Config};
//!
//! let config = Config::builder().expand_function("hypot").build();
//! let formula = convert_source("def norm(x, y):\n    return hypot(x, y)\n", &config).unwrap();
//! assert_eq!(formula, "op(\"norm\")( x, y ) = sqrt( x^(2) + y^(2) )");
//! ```
//!
//! Errors carry the spans of the source code they originate from, and can be rendered with
//! [`Error::report_string`].

pub mod config;

pub use config::{Config, ConfigBuilder};
pub use mathify_error::Error;

use log::debug;
use mathify_codegen::{FormulaGenerator, GreekLetters, IdentifierConverter, SymbolTable};
use mathify_parser::parser::{ast::FunctionDef, Parser};
use mathify_transform::{
    expansion,
    AssignmentReducer,
    AugAssignReplacer,
    DocstringRemover,
    IdentifierRenamer,
    SelfStripper,
    Transform,
};

/// Typesets the function definition, replacing names such as `alpha` with symbols from the Greek
/// letter table.
pub fn convert(func: &FunctionDef, config: &Config) -> Result<String, Error> {
    convert_with_symbols(func, config, &GreekLetters)
}

/// Typesets the function definition, looking up symbols in the given table.
pub fn convert_with_symbols(
    func: &FunctionDef,
    config: &Config,
    symbols: &dyn SymbolTable,
) -> Result<String, Error> {
    expansion::validate(&config.expand_functions)?;

    let mut func = func.clone();
    if !config.identifiers.is_empty() {
        debug!("renaming {} identifier(s)", config.identifiers.len());
        func = IdentifierRenamer::new(&config.identifiers).transform_function(func);
    }
    func = AugAssignReplacer.transform_function(DocstringRemover.transform_function(func));
    if config.strip_receiver {
        debug!("stripping the receiver of `{}`", func.name);
        func = SelfStripper.transform_function(func);
    }
    if config.reduce_assignments {
        debug!("reducing the assignments of `{}`", func.name);
        func = AssignmentReducer::new(&config.retained_names).reduce(func)?;
    }

    let identifiers = IdentifierConverter::new(
        config.use_math_symbols,
        config.use_mathrm,
        config.escape_underscores,
    ).with_symbols(symbols);
    FormulaGenerator::new(identifiers, &config.expand_functions)
        .with_sig_figs(config.significant_figures)
        .with_signature(config.use_signature)
        .generate_function(&func)
}

/// Parses the source code of a single function definition and typesets it.
pub fn convert_source(source: &str, config: &Config) -> Result<String, Error> {
    let func = Parser::new(source).try_parse_full::<FunctionDef>()?;
    convert(&func, config)
}

#[cfg(test)]
mod tests {
    use mathify_codegen::error::InvalidIdentifier;
    use mathify_transform::error::{UnknownExpansion, UnsupportedStatement};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use super::*;

    fn expand(source: &str, names: &[&str]) -> String {
        let config = Config::builder().expand_functions(names.iter().copied()).build();
        convert_source(source, &config).unwrap()
    }

    #[test]
    fn atan2() {
        let source = "def solve(x, y):\n    return math.atan2(y, x)\n";
        assert_eq!(expand(source, &["atan2"]), "op(\"solve\")( x, y ) = arctan ( frac(y, x) )");
    }

    #[test]
    fn atan2_of_exp() {
        let source = "def solve(x, y):\n    return math.atan2(math.exp(y), math.exp(x))\n";
        assert_eq!(
            expand(source, &["atan2", "exp"]),
            "op(\"solve\")( x, y ) = arctan ( frac(e^(y), e^(x)) )",
        );
    }

    #[test]
    fn exp() {
        assert_eq!(expand("def solve(x):\n    return math.exp(x)\n", &["exp"]), "op(\"solve\")( x ) = e^(x)");
        assert_eq!(
            expand("def solve(x):\n    return math.exp(math.exp(x))\n", &["exp"]),
            "op(\"solve\")( x ) = e^(e^(x))",
        );
    }

    #[test]
    fn exp2() {
        assert_eq!(expand("def solve(x):\n    return math.exp2(x)\n", &["exp2"]), "op(\"solve\")( x ) = 2^(x)");
        assert_eq!(
            expand("def solve(x):\n    return math.exp2(math.exp2(x))\n", &["exp2"]),
            "op(\"solve\")( x ) = 2^(2^(x))",
        );
    }

    #[test]
    fn expm1() {
        assert_eq!(
            expand("def solve(x):\n    return math.expm1(x)\n", &["expm1"]),
            "op(\"solve\")( x ) = exp x - 1",
        );
        assert_eq!(
            expand("def solve(y, z):\n    return math.expm1(math.pow(y, z))\n", &["expm1", "exp", "pow"]),
            "op(\"solve\")( y, z ) = e^(y^(z)) - 1",
        );
    }

    #[test]
    fn hypot() {
        assert_eq!(
            expand("def solve(x, y, z):\n    return math.hypot(x, y, z)\n", &["hypot"]),
            "op(\"solve\")( x, y, z ) = sqrt( x^(2) + y^(2) + z^(2) )",
        );
        assert_eq!(
            expand("def solve(x, y, z):\n    return hypot(x, y, z)\n", &["hypot"]),
            "op(\"solve\")( x, y, z ) = sqrt( x^(2) + y^(2) + z^(2) )",
        );
        assert_eq!(
            expand("def solve(a, b, x, y):\n    return math.hypot(math.hypot(a, b), x, y)\n", &["hypot"]),
            "op(\"solve\")( a, b, x, y ) = sqrt( sqrt( a^(2) + b^(2) )^(2) + x^(2) + y^(2) )",
        );
    }

    #[test]
    fn log1p() {
        assert_eq!(
            expand("def solve(x):\n    return math.log1p(x)\n", &["log1p"]),
            "op(\"solve\")( x ) = log ( 1 + x )",
        );
        assert_eq!(
            expand("def solve(x):\n    return math.log1p(math.exp(x))\n", &["log1p", "exp"]),
            "op(\"solve\")( x ) = log ( 1 + e^(x) )",
        );
    }

    #[test]
    fn pow() {
        assert_eq!(expand("def solve(x, y):\n    return math.pow(x, y)\n", &["pow"]), "op(\"solve\")( x, y ) = x^(y)");
        assert_eq!(
            expand("def solve(w, x, y, z):\n    return math.pow(math.pow(w, x), math.pow(y, z))\n", &["pow"]),
            "op(\"solve\")( w, x, y, z ) = ( w^(x) )^(y^(z))",
        );
    }

    #[test]
    fn unexpanded_call() {
        assert_eq!(
            expand("def solve(x, y, z):\n    return math.hypot(x, y, z)\n", &[]),
            "op(\"solve\")( x, y, z ) = op(\"math.hypot\")( x, y, z )",
        );
    }

    #[test]
    fn unknown_expansion() {
        let config = Config::builder().expand_function("exp3").build();
        let err = convert_source("def f(x):\n    return x\n", &config).unwrap_err();
        let kind = err.downcast_ref::<UnknownExpansion>().unwrap();
        assert_eq!(kind.name, "exp3");
        assert_eq!(kind.suggestions, vec!["exp", "exp2", "expm1"]);
    }

    #[test]
    fn method() {
        let source = "def area(self, r):\n    return self.k * r ** 2\n";
        assert_eq!(
            convert_source(source, &Config::default()).unwrap(),
            "op(\"area\")( r ) = k dot r^(2)",
        );

        let config = Config::builder().strip_receiver(false).build();
        assert_eq!(
            convert_source(source, &config).unwrap(),
            "op(\"area\")( \"self\", r ) = \"self.k\" dot r^(2)",
        );
    }

    #[test]
    fn assignments() {
        let source = "def f(x):\n    y = 2 * x\n    return y + 1\n";
        assert_eq!(
            convert_source(source, &Config::default()).unwrap(),
            "y = 2 dot x \\ op(\"f\")( x ) = y + 1",
        );

        let config = Config::builder().reduce_assignments(true).build();
        assert_eq!(convert_source(source, &config).unwrap(), "op(\"f\")( x ) = 2 dot x + 1");

        let config = Config::builder().reduce_assignments(true).retain("y").build();
        assert_eq!(
            convert_source(source, &config).unwrap(),
            "y = 2 dot x \\ op(\"f\")( x ) = y + 1",
        );
    }

    #[test]
    fn reduced_piecewise() {
        let source = "\
def f(x):
    s = x * x
    if s > 1:
        return s
    else:
        return 1 - s
";
        let config = Config::builder().reduce_assignments(true).build();
        assert_eq!(
            convert_source(source, &config).unwrap(),
            "op(\"f\")( x ) = cases(x dot x & \"if\" x dot x > 1, 1 - x dot x & \"otherwise\")",
        );
    }

    #[test]
    fn symbols_and_subscripts() {
        let config = Config::builder()
            .use_math_symbols(true)
            .escape_underscores(false)
            .build();
        assert_eq!(
            convert_source("def f(alpha, x_i):\n    return alpha * x_i\n", &config).unwrap(),
            "op(\"f\")( alpha, x_(i) ) = alpha dot x_(i)",
        );
    }

    #[test]
    fn renamed_identifiers() {
        let config = Config::builder()
            .use_math_symbols(true)
            .rename("lam", "lambda")
            .build();
        assert_eq!(
            convert_source("def f(lam, t):\n    return exp(-lam * t)\n", &config).unwrap(),
            "op(\"f\")( lambda, t ) = exp ( -lambda dot t )",
        );
    }

    #[test]
    fn custom_symbol_table() {
        let func = Parser::new("def f(hbar):\n    return hbar / 2\n")
            .try_parse_full::<FunctionDef>()
            .unwrap();
        let table = HashMap::from([("hbar".to_string(), "planck.reduce".to_string())]);
        let config = Config::builder().use_math_symbols(true).build();
        assert_eq!(
            convert_with_symbols(&func, &config, &table).unwrap(),
            "op(\"f\")( planck.reduce ) = frac(planck.reduce, 2)",
        );
    }

    #[test]
    fn significant_figures() {
        let config = Config::builder().significant_figures(Some(3)).build();
        assert_eq!(
            convert_source("def f(n):\n    return 6.02214076e23 * n\n", &config).unwrap(),
            "op(\"f\")( n ) = 6.02 times 10^(23) dot n",
        );
        assert_eq!(
            convert_source("def f(x):\n    return 0.000123456 * x\n", &config).unwrap(),
            "op(\"f\")( x ) = 0.000123 dot x",
        );
    }

    #[test]
    fn without_signature() {
        let config = Config::builder().use_signature(false).build();
        assert_eq!(convert_source("def f(x):\n    return x / 2\n", &config).unwrap(), "frac(x, 2)");
    }

    #[test]
    fn input_is_not_modified() {
        let func = Parser::new("def f(self, x):\n    y = self.a\n    return y\n")
            .try_parse_full::<FunctionDef>()
            .unwrap();
        let original = func.clone();
        let config = Config::builder().reduce_assignments(true).build();
        assert_eq!(convert(&func, &config).unwrap(), "op(\"f\")( x ) = a");
        assert_eq!(func, original);
    }

    #[test]
    fn invalid_identifier_report() {
        let source = "def f(x_):\n    return x_\n";
        let config = Config::builder().escape_underscores(false).build();
        let err = convert_source(source, &config).unwrap_err();
        assert!(err.is::<InvalidIdentifier>());

        let report = err.report_string("input", source);
        let report = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(report.contains("`x_` is not a valid identifier"));
    }

    #[test]
    fn docstrings_and_augmented_assignments() {
        let source = "\
def f(x):
    \"\"\"Shifts and scales x.\"\"\"
    y = x
    y += 1
    y *= 2
    return y
";
        assert_eq!(
            convert_source(source, &Config::default()).unwrap(),
            "y = x \\ y = y + 1 \\ y = y dot 2 \\ op(\"f\")( x ) = y",
        );

        let config = Config::builder().reduce_assignments(true).build();
        assert_eq!(convert_source(source, &config).unwrap(), "op(\"f\")( x ) = ( x + 1 ) dot 2");
    }

    #[test]
    fn unsupported_statement() {
        let config = Config::builder().reduce_assignments(true).build();
        let err = convert_source("def f(x):\n    print(x)\n    return x\n", &config).unwrap_err();
        assert_eq!(err.downcast_ref::<UnsupportedStatement>().unwrap().kind, "Expr");
    }
}
