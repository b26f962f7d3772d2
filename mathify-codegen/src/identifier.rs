//! Conversion of Python identifiers into math tokens.

use crate::{error::InvalidIdentifier, symbols::{GreekLetters, SymbolTable}};

/// An identifier rendered as a math token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The rendered token.
    pub token: String,

    /// True if the token is a single symbol that can be used as the base of a superscript or
    /// subscript without grouping.
    pub atomic: bool,
}

impl Identifier {
    fn atomic(token: impl Into<String>) -> Self {
        Self { token: token.into(), atomic: true }
    }

    fn compound(token: impl Into<String>) -> Self {
        Self { token: token.into(), atomic: false }
    }
}

/// Wraps the text in quotes, which typesets it upright.
fn upright(text: &str) -> String {
    format!("\"{}\"", text)
}

/// Converts identifiers into math tokens under a fixed set of options.
///
/// When underscores are escaped, every name is accepted and underscores are typeset literally.
/// Otherwise, the name is split at its first underscore and everything after it becomes a
/// subscript, recursively, so that `x_alpha_beta` renders as `x_(alpha_(beta))`.
#[derive(Clone, Copy)]
pub struct IdentifierConverter<'a> {
    /// Replace names such as `alpha` with their symbol.
    pub use_math_symbols: bool,

    /// Typeset names longer than one character upright.
    pub use_mathrm: bool,

    /// Typeset underscores literally instead of as subscripts.
    pub escape_underscores: bool,

    /// The symbols that names can be replaced with.
    pub symbols: &'a dyn SymbolTable,
}

impl std::fmt::Debug for IdentifierConverter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierConverter")
            .field("use_math_symbols", &self.use_math_symbols)
            .field("use_mathrm", &self.use_mathrm)
            .field("escape_underscores", &self.escape_underscores)
            .finish_non_exhaustive()
    }
}

impl Default for IdentifierConverter<'_> {
    fn default() -> Self {
        Self {
            use_math_symbols: false,
            use_mathrm: true,
            escape_underscores: true,
            symbols: &GreekLetters,
        }
    }
}

impl<'a> IdentifierConverter<'a> {
    /// Creates a converter that looks up symbols in the Greek letter table.
    pub fn new(use_math_symbols: bool, use_mathrm: bool, escape_underscores: bool) -> Self {
        Self { use_math_symbols, use_mathrm, escape_underscores, symbols: &GreekLetters }
    }

    /// Uses the given symbol table instead.
    pub fn with_symbols(self, symbols: &'a dyn SymbolTable) -> Self {
        Self { symbols, ..self }
    }

    /// Returns the symbol for the name, if symbols are enabled and it has one.
    fn symbol(&self, name: &str) -> Option<&'a str> {
        if self.use_math_symbols {
            self.symbols.lookup(name)
        } else {
            None
        }
    }

    /// Converts the identifier.
    pub fn convert(&self, name: &str) -> Result<Identifier, InvalidIdentifier> {
        if self.escape_underscores {
            Ok(self.convert_escaped(name))
        } else {
            if name.starts_with('_') || name.ends_with('_') || name.contains("__") {
                return Err(InvalidIdentifier { name: name.to_string() });
            }
            Ok(self.convert_subscripted(name))
        }
    }

    fn convert_escaped(&self, name: &str) -> Identifier {
        if let Some(symbol) = self.symbol(name) {
            return Identifier::atomic(symbol);
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Identifier::atomic(name),
            _ if self.use_mathrm => Identifier::compound(upright(name)),
            _ if name.chars().all(|c| c.is_ascii_alphanumeric()) => Identifier::compound(name),
            _ => Identifier::compound(upright(name)),
        }
    }

    /// Converts a name that is known to have no leading, trailing or doubled underscores.
    fn convert_subscripted(&self, name: &str) -> Identifier {
        let (head, tail) = match name.split_once('_') {
            Some((head, tail)) => (head, Some(tail)),
            None => (name, None),
        };

        let (head, single) = match self.symbol(head) {
            Some(symbol) => (symbol.to_string(), true),
            None if head.chars().count() == 1 => (head.to_string(), true),
            None if self.use_mathrm => (upright(head), false),
            None => (head.to_string(), false),
        };

        match tail {
            Some(tail) => {
                let sub = self.convert_subscripted(tail);
                Identifier::compound(format!("{}_({})", head, sub.token))
            },
            None => Identifier { token: head, atomic: single },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use super::*;

    fn convert(
        name: &str,
        use_math_symbols: bool,
        use_mathrm: bool,
        escape_underscores: bool,
    ) -> Result<(String, bool), InvalidIdentifier> {
        IdentifierConverter::new(use_math_symbols, use_mathrm, escape_underscores)
            .convert(name)
            .map(|id| (id.token, id.atomic))
    }

    fn ok(token: &str, atomic: bool) -> Result<(String, bool), InvalidIdentifier> {
        Ok((token.to_string(), atomic))
    }

    #[test]
    fn escaped_underscores() {
        assert_eq!(convert("a", false, true, true), ok("a", true));
        for name in ["_", "aa", "a1", "a_", "_a", "_1", "__", "a_a", "a__", "a_1", "alpha"] {
            assert_eq!(convert(name, false, true, true), ok(&format!("\"{}\"", name), false));
        }
    }

    #[test]
    fn escaped_symbols() {
        assert_eq!(convert("alpha", true, true, true), ok("alpha", true));
        assert_eq!(convert("alphabet", true, true, true), ok("\"alphabet\"", false));
    }

    #[test]
    fn escaped_words() {
        assert_eq!(convert("foo", false, true, true), ok("\"foo\"", false));
        assert_eq!(convert("foo", true, true, true), ok("\"foo\"", false));
        assert_eq!(convert("foo", true, false, true), ok("foo", false));
        assert_eq!(convert("a_b", false, false, true), ok("\"a_b\"", false));
    }

    #[test]
    fn subscripts() {
        assert_eq!(convert("aa", false, true, false), ok("\"aa\"", false));
        assert_eq!(convert("a_a", false, true, false), ok("a_(a)", false));
        assert_eq!(convert("a_1", false, true, false), ok("a_(1)", false));
        assert_eq!(convert("alpha", true, false, false), ok("alpha", true));
        assert_eq!(convert("alpha_1", true, false, false), ok("alpha_(1)", false));
        assert_eq!(convert("x_alpha", true, false, false), ok("x_(alpha)", false));
        assert_eq!(convert("x_alpha_beta", true, false, false), ok("x_(alpha_(beta))", false));
        assert_eq!(convert("alpha_beta", true, false, false), ok("alpha_(beta)", false));
        assert_eq!(convert("speed_max", false, true, false), ok("\"speed\"_(\"max\")", false));
    }

    #[test]
    fn invalid_underscores() {
        for name in ["_", "a_", "_a", "_1", "__", "a__"] {
            assert_eq!(
                convert(name, false, true, false),
                Err(InvalidIdentifier { name: name.to_string() }),
            );
        }
        for name in ["alpha_", "_alpha", "x__alpha"] {
            assert!(convert(name, true, false, false).is_err());
        }
    }

    #[test]
    fn custom_symbols() {
        let table = HashMap::from([("hbar".to_string(), "planck.reduce".to_string())]);
        let converter = IdentifierConverter::new(true, true, false).with_symbols(&table);
        assert_eq!(converter.convert("hbar").unwrap(), Identifier::atomic("planck.reduce"));
        assert_eq!(converter.convert("alpha").unwrap(), Identifier::compound("\"alpha\""));
    }
}
