//! Renames identifiers before any other transformation.

use crate::transform::{walk_expr, walk_function, walk_target, Transform};
use log::trace;
use mathify_parser::parser::ast::{Expr, FunctionDef, Name, Target};
use std::collections::HashMap;

/// Replaces identifiers according to a caller-supplied map. The function name, its parameters,
/// every referenced name and every assigned name are renamed. Attribute members are not.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierRenamer<'a> {
    identifiers: &'a HashMap<String, String>,
}

impl<'a> IdentifierRenamer<'a> {
    /// Creates a renamer from a map of old names to new names.
    pub fn new(identifiers: &'a HashMap<String, String>) -> Self {
        Self { identifiers }
    }

    /// Renames a single name in place, if it is in the map.
    fn rename(&self, name: &mut Name) {
        if let Some(new) = self.identifiers.get(&name.id) {
            trace!("renaming `{}` to `{}`", name.id, new);
            name.id.clone_from(new);
        }
    }
}

impl Transform for IdentifierRenamer<'_> {
    fn transform_expr(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Name(mut name) => {
                self.rename(&mut name);
                Expr::Name(name)
            },
            expr => walk_expr(self, expr),
        }
    }

    fn transform_target(&mut self, target: Target) -> Target {
        match target {
            Target::Name(mut name) => {
                self.rename(&mut name);
                Target::Name(name)
            },
            target => walk_target(self, target),
        }
    }

    fn transform_function(&mut self, func: FunctionDef) -> FunctionDef {
        let mut func = walk_function(self, func);
        self.rename(&mut func.name);
        for param in &mut func.params {
            self.rename(&mut param.name);
        }
        func
    }
}

#[cfg(test)]
mod tests {
    use mathify_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn renames_everywhere_but_members() {
        let source = "def f(a, b):\n    c = a.a + b\n    return c\n";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        let identifiers = [("f", "g"), ("a", "alpha"), ("c", "d")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        let func = IdentifierRenamer::new(&identifiers).transform_function(func);
        assert_eq!(func.to_string(), "def g(alpha, b):\n    d = alpha.a + b\n    return d\n");
    }

    #[test]
    fn empty_map_is_identity() {
        let source = "def f(x):\n    return x\n";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        let identifiers = HashMap::new();
        assert_eq!(IdentifierRenamer::new(&identifiers).transform_function(func.clone()), func);
    }
}
