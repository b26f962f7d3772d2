//! Statement rewrites that bring a function body into the shape the reducer and the generator
//! expect.

use crate::transform::{walk_function, walk_stmt, Transform};
use log::trace;
use mathify_parser::parser::ast::{
    Assign,
    AugAssign,
    BinOp,
    Constant,
    Expr,
    ExprStmt,
    FunctionDef,
    If,
    Literal,
    Stmt,
    Target,
};

/// Returns true if the statement is a string literal on its own, such as a docstring.
fn is_docstring(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Expr(ExprStmt { value: Expr::Constant(Constant { value: Literal::Str(_), .. }), .. }))
}

fn without_docstrings(body: Vec<Stmt>) -> Vec<Stmt> {
    body.into_iter().filter(|stmt| !is_docstring(stmt)).collect()
}

/// Removes string literals that stand on their own as statements, in every block of the function.
///
/// ```
/// use mathify_parser::parser::{ast::FunctionDef, Parser};
/// use mathify_transform::{DocstringRemover, Transform};
///
/// let source = "def f(x):\n    \"Doubles x.\"\n    return 2 * x\n";
/// let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
/// let func = DocstringRemover.transform_function(func);
/// assert_eq!(func.to_string(), "def f(x):\n    return 2 * x\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DocstringRemover;

impl Transform for DocstringRemover {
    fn transform_stmt(&mut self, stmt: Stmt) -> Stmt {
        match stmt {
            Stmt::If(If { test, body, orelse, span }) => walk_stmt(self, Stmt::If(If {
                test,
                body: without_docstrings(body),
                orelse: without_docstrings(orelse),
                span,
            })),
            stmt => walk_stmt(self, stmt),
        }
    }

    fn transform_function(&mut self, mut func: FunctionDef) -> FunctionDef {
        func.body = without_docstrings(func.body);
        walk_function(self, func)
    }
}

/// Rewrites augmented assignments such as `x += 1` into plain assignments, `x = x + 1`.
///
/// Tuple targets cannot be augmented, and are left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AugAssignReplacer;

impl Transform for AugAssignReplacer {
    fn transform_stmt(&mut self, stmt: Stmt) -> Stmt {
        let Stmt::AugAssign(AugAssign { target, op, value, span }) = stmt else {
            return walk_stmt(self, stmt);
        };

        let current = match &target {
            Target::Name(name) => Expr::Name(name.clone()),
            Target::Attribute(attribute) => Expr::Attribute(attribute.clone()),
            Target::Tuple(_) => return Stmt::AugAssign(AugAssign { target, op, value, span }),
        };
        trace!("replacing `{} {}=` with an assignment", target, op);
        let value = self.transform_expr(value);
        Stmt::Assign(Assign {
            targets: vec![target],
            value: Expr::BinOp(BinOp::new(current, op, value)),
            span,
        })
    }
}

#[cfg(test)]
mod tests {
    use mathify_parser::parser::{token::op::BinOpKind, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> FunctionDef {
        Parser::new(source).try_parse_full::<FunctionDef>().unwrap()
    }

    #[test]
    fn removes_docstrings() {
        let func = DocstringRemover.transform_function(parse("\
def f(x):
    'Leading.'
    if x:
        \"In a branch.\"
        return x
    else:
        return 0
"));
        assert_eq!(func.to_string(), "def f(x):\n    if x:\n        return x\n    else:\n        return 0\n");
    }

    #[test]
    fn keeps_other_expression_statements() {
        let func = DocstringRemover.transform_function(parse("def f(x):\n    print(x)\n    return x\n"));
        assert_eq!(func.body.len(), 2);
        assert_eq!(func.body[0].kind_name(), "Expr");
    }

    #[test]
    fn replaces_augmented_assignments() {
        let func = AugAssignReplacer.transform_function(parse("def f(x):\n    y = x\n    y *= 3\n    return y\n"));
        let Stmt::Assign(assign) = &func.body[1] else { panic!("expected assignment") };
        assert_eq!(assign.targets, vec![Target::Name(mathify_parser::parser::ast::Name::with_span("y", 24..25))]);
        let Expr::BinOp(bin_op) = &assign.value else { panic!("expected binary expression") };
        assert_eq!(bin_op.op, BinOpKind::Mult);
        assert_eq!(bin_op.left.to_string(), "y");
        assert_eq!(bin_op.right.to_string(), "3");
    }
}
