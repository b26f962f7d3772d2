//! Turns the body of a method into the body of a free function.

use crate::transform::{walk_expr, walk_function, walk_target, Transform};
use mathify_parser::parser::ast::{Attribute, Expr, FunctionDef, Name, Target};

/// The conventional name of the receiver of a method.
pub const RECEIVER: &str = "self";

/// Rewrites `self.member` to `member`, and removes `self` from the start of the parameter list
/// of every function definition.
///
/// ```
/// use mathify_parser::parser::{ast::FunctionDef, Parser};
/// use mathify_transform::{SelfStripper, Transform};
///
/// let source = "def f(self, x):\n    return self.g(x) + self.k\n";
/// let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
/// let func = SelfStripper.transform_function(func);
/// assert_eq!(func.to_string(), "def f(x):\n    return g(x) + k\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfStripper;

impl SelfStripper {
    /// Returns the member as a name if the attribute is accessed on the receiver.
    fn strip(attribute: &Attribute) -> Option<Name> {
        (attribute.base_name() == Some(RECEIVER)).then(|| attribute.attr.clone())
    }
}

impl Transform for SelfStripper {
    fn transform_expr(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Attribute(attribute) => match Self::strip(&attribute) {
                Some(member) => Expr::Name(member),
                None => walk_expr(self, Expr::Attribute(attribute)),
            },
            expr => walk_expr(self, expr),
        }
    }

    fn transform_target(&mut self, target: Target) -> Target {
        match target {
            Target::Attribute(attribute) => match Self::strip(&attribute) {
                Some(member) => Target::Name(member),
                None => walk_target(self, Target::Attribute(attribute)),
            },
            target => walk_target(self, target),
        }
    }

    fn transform_function(&mut self, mut func: FunctionDef) -> FunctionDef {
        if func.params.first().is_some_and(|param| param.name.id == RECEIVER) {
            func.params.remove(0);
        }
        walk_function(self, func)
    }
}

#[cfg(test)]
mod tests {
    use mathify_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn strip(source: &str) -> String {
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        SelfStripper.transform_function(func).to_string()
    }

    #[test]
    fn strips_receiver() {
        assert_eq!(
            strip("def f(self, x, y, z):\n    return self.m(x, y, z) + self.p\n"),
            "def f(x, y, z):\n    return m(x, y, z) + p\n",
        );
    }

    #[test]
    fn only_first_parameter() {
        assert_eq!(
            strip("def f(x, self):\n    return x\n"),
            "def f(x, self):\n    return x\n",
        );
    }

    #[test]
    fn deep_attributes_and_targets() {
        assert_eq!(
            strip("def f(self):\n    self.y = self.a.b\n    return other.c\n"),
            "def f():\n    y = a.b\n    return other.c\n",
        );
    }

    #[test]
    fn nested_methods() {
        assert_eq!(
            strip("def f(self):\n    def g(self, x):\n        return self.h(x)\n    return 0\n"),
            "def f():\n    def g(x):\n        return h(x)\n    return 0\n",
        );
    }
}
