//! Lookup of identifiers that have a dedicated math symbol, such as `alpha`.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// A source of math symbols for identifiers.
pub trait SymbolTable {
    /// Returns the spelling of the symbol for the given name, if it has one.
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// The names of the Greek letters, which are spelled the same way in Typst math.
static GREEK: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
        "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi",
        "chi", "psi", "omega", "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta",
        "Theta", "Iota", "Kappa", "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma",
        "Tau", "Upsilon", "Phi", "Chi", "Psi", "Omega",
    ]
    .into_iter()
    .collect()
});

/// The default symbol table, containing the lower and upper case Greek letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreekLetters;

impl SymbolTable for GreekLetters {
    fn lookup(&self, name: &str) -> Option<&str> {
        GREEK.get(name).copied()
    }
}

impl SymbolTable for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn greek_letters() {
        assert_eq!(GreekLetters.lookup("alpha"), Some("alpha"));
        assert_eq!(GreekLetters.lookup("Omega"), Some("Omega"));
        assert_eq!(GreekLetters.lookup("alphabet"), None);
    }

    #[test]
    fn custom_table() {
        let table = HashMap::from([("hbar".to_string(), "planck.reduce".to_string())]);
        assert_eq!(table.lookup("hbar"), Some("planck.reduce"));
        assert_eq!(table.lookup("alpha"), None);
    }
}
