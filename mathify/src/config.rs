use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that control how a function is typeset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Replace names such as `alpha` with their symbol.
    pub use_math_symbols: bool,

    /// Typeset names longer than one character upright.
    pub use_mathrm: bool,

    /// Typeset underscores in names literally. When false, `x_i` is typeset as `x` with the
    /// subscript `i`.
    pub escape_underscores: bool,

    /// The functions whose calls are replaced with their defining formulas, such as `hypot`.
    pub expand_functions: HashSet<String>,

    /// Format floats and complex numbers to this many significant figures.
    pub significant_figures: Option<usize>,

    /// Inline intermediate assignments into the returned expression.
    pub reduce_assignments: bool,

    /// Turn `self.x` into `x`, and drop the `self` parameter.
    pub strip_receiver: bool,

    /// Names whose assignments are kept when assignments are reduced.
    pub retained_names: HashSet<String>,

    /// Write `op("f")( params ) =` before the body.
    pub use_signature: bool,

    /// Names to replace before typesetting, mapped to their replacements.
    pub identifiers: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_math_symbols: false,
            use_mathrm: true,
            escape_underscores: true,
            expand_functions: HashSet::new(),
            significant_figures: None,
            reduce_assignments: false,
            strip_receiver: true,
            retained_names: HashSet::new(),
            use_signature: true,
            identifiers: HashMap::new(),
        }
    }
}

impl Config {
    /// Returns a builder starting from the default options.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Returns a builder starting from these options.
    pub fn into_builder(self) -> ConfigBuilder {
        ConfigBuilder(self)
    }
}

/// Builds a [`Config`].
///
/// ```
/// use mathify::Config;
///
/// let config = Config::builder()
///     .use_math_symbols(true)
///     .expand_function("hypot")
///     .build();
/// assert!(config.expand_functions.contains("hypot"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder(Config);

impl ConfigBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`Config::use_math_symbols`].
    pub fn use_math_symbols(mut self, value: bool) -> Self {
        self.0.use_math_symbols = value;
        self
    }

    /// Sets [`Config::use_mathrm`].
    pub fn use_mathrm(mut self, value: bool) -> Self {
        self.0.use_mathrm = value;
        self
    }

    /// Sets [`Config::escape_underscores`].
    pub fn escape_underscores(mut self, value: bool) -> Self {
        self.0.escape_underscores = value;
        self
    }

    /// Adds a function to [`Config::expand_functions`].
    pub fn expand_function(mut self, name: impl Into<String>) -> Self {
        self.0.expand_functions.insert(name.into());
        self
    }

    /// Adds several functions to [`Config::expand_functions`].
    pub fn expand_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.expand_functions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets [`Config::significant_figures`]. If [`None`], floats are written with the shortest
    /// text that reads back as the same value.
    pub fn significant_figures(mut self, value: Option<usize>) -> Self {
        self.0.significant_figures = value;
        self
    }

    /// Sets [`Config::reduce_assignments`].
    pub fn reduce_assignments(mut self, value: bool) -> Self {
        self.0.reduce_assignments = value;
        self
    }

    /// Sets [`Config::strip_receiver`].
    pub fn strip_receiver(mut self, value: bool) -> Self {
        self.0.strip_receiver = value;
        self
    }

    /// Adds a name to [`Config::retained_names`].
    pub fn retain(mut self, name: impl Into<String>) -> Self {
        self.0.retained_names.insert(name.into());
        self
    }

    /// Sets [`Config::use_signature`].
    pub fn use_signature(mut self, value: bool) -> Self {
        self.0.use_signature = value;
        self
    }

    /// Adds an entry to [`Config::identifiers`].
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.0.identifiers.insert(from.into(), to.into());
        self
    }

    /// Returns the finished configuration.
    pub fn build(self) -> Config {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(!config.use_math_symbols);
        assert!(config.use_mathrm);
        assert!(config.escape_underscores);
        assert!(!config.reduce_assignments);
        assert!(config.strip_receiver);
        assert!(config.use_signature);
        assert_eq!(config.significant_figures, None);
    }

    #[test]
    fn builder() {
        let config = Config::builder()
            .expand_functions(["exp", "pow"])
            .retain("a")
            .rename("lam", "lambda")
            .significant_figures(Some(3))
            .build();
        assert_eq!(config.expand_functions, HashSet::from(["exp".to_string(), "pow".to_string()]));
        assert!(config.retained_names.contains("a"));
        assert_eq!(config.identifiers.get("lam").map(String::as_str), Some("lambda"));
        assert_eq!(config.significant_figures, Some(3));
    }

    #[test]
    fn into_builder_keeps_options() {
        let config = Config::builder().use_mathrm(false).build();
        let config = config.into_builder().use_signature(false).build();
        assert!(!config.use_mathrm);
        assert!(!config.use_signature);
    }
}
