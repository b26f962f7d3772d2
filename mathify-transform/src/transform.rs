//! A rewriting traversal over owned expression trees.
//!
//! Implementors override the methods for the nodes they care about and call the matching `walk_*`
//! function to rebuild the children of everything else. Every node kind is matched exhaustively,
//! so adding a node kind to the tree fails to compile until it is handled here.

use mathify_parser::parser::ast::{
    Assign,
    Attribute,
    AugAssign,
    BinOp,
    BoolOp,
    Call,
    Compare,
    Expr,
    ExprStmt,
    FunctionDef,
    If,
    IfExp,
    Param,
    Return,
    Stmt,
    Target,
    TupleTarget,
    UnaryOp,
};

/// A transformation that takes a tree by value and returns the rewritten tree.
pub trait Transform {
    /// Rewrites an expression. The default implementation rewrites its children.
    fn transform_expr(&mut self, expr: Expr) -> Expr {
        walk_expr(self, expr)
    }

    /// Rewrites the target of an assignment.
    fn transform_target(&mut self, target: Target) -> Target {
        walk_target(self, target)
    }

    /// Rewrites a statement.
    fn transform_stmt(&mut self, stmt: Stmt) -> Stmt {
        walk_stmt(self, stmt)
    }

    /// Rewrites a function definition, including nested ones.
    fn transform_function(&mut self, func: FunctionDef) -> FunctionDef {
        walk_function(self, func)
    }
}

/// Rewrites each expression in a boxed position.
fn boxed<T: Transform + ?Sized>(transform: &mut T, expr: Box<Expr>) -> Box<Expr> {
    Box::new(transform.transform_expr(*expr))
}

/// Rewrites the children of an expression.
pub fn walk_expr<T: Transform + ?Sized>(transform: &mut T, expr: Expr) -> Expr {
    match expr {
        Expr::Name(_) | Expr::Constant(_) => expr,
        Expr::Call(Call { func, args, span }) => Expr::Call(Call {
            func: boxed(transform, func),
            args: args.into_iter().map(|arg| transform.transform_expr(arg)).collect(),
            span,
        }),
        Expr::Attribute(Attribute { value, attr, span }) => Expr::Attribute(Attribute {
            value: boxed(transform, value),
            attr,
            span,
        }),
        Expr::BinOp(BinOp { left, op, right, span }) => Expr::BinOp(BinOp {
            left: boxed(transform, left),
            op,
            right: boxed(transform, right),
            span,
        }),
        Expr::UnaryOp(UnaryOp { op, operand, span }) => Expr::UnaryOp(UnaryOp {
            op,
            operand: boxed(transform, operand),
            span,
        }),
        Expr::Compare(Compare { left, comparators, span }) => Expr::Compare(Compare {
            left: boxed(transform, left),
            comparators: comparators
                .into_iter()
                .map(|(op, operand)| (op, transform.transform_expr(operand)))
                .collect(),
            span,
        }),
        Expr::BoolOp(BoolOp { op, values, span }) => Expr::BoolOp(BoolOp {
            op,
            values: values.into_iter().map(|value| transform.transform_expr(value)).collect(),
            span,
        }),
        Expr::IfExp(IfExp { test, body, orelse, span }) => Expr::IfExp(IfExp {
            test: boxed(transform, test),
            body: boxed(transform, body),
            orelse: boxed(transform, orelse),
            span,
        }),
    }
}

/// Rewrites the children of an assignment target. Plain names have no children.
pub fn walk_target<T: Transform + ?Sized>(transform: &mut T, target: Target) -> Target {
    match target {
        Target::Name(_) => target,
        Target::Attribute(Attribute { value, attr, span }) => Target::Attribute(Attribute {
            value: boxed(transform, value),
            attr,
            span,
        }),
        Target::Tuple(TupleTarget { elts, span }) => Target::Tuple(TupleTarget {
            elts: elts.into_iter().map(|elt| transform.transform_target(elt)).collect(),
            span,
        }),
    }
}

/// Rewrites the children of a statement.
pub fn walk_stmt<T: Transform + ?Sized>(transform: &mut T, stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Assign(Assign { targets, value, span }) => Stmt::Assign(Assign {
            targets: targets.into_iter().map(|target| transform.transform_target(target)).collect(),
            value: transform.transform_expr(value),
            span,
        }),
        Stmt::AugAssign(AugAssign { target, op, value, span }) => Stmt::AugAssign(AugAssign {
            target: transform.transform_target(target),
            op,
            value: transform.transform_expr(value),
            span,
        }),
        Stmt::Expr(ExprStmt { value, span }) => Stmt::Expr(ExprStmt {
            value: transform.transform_expr(value),
            span,
        }),
        Stmt::Pass(_) => stmt,
        Stmt::Return(Return { value, span }) => Stmt::Return(Return {
            value: value.map(|value| transform.transform_expr(value)),
            span,
        }),
        Stmt::If(If { test, body, orelse, span }) => Stmt::If(If {
            test: transform.transform_expr(test),
            body: walk_body(transform, body),
            orelse: walk_body(transform, orelse),
            span,
        }),
        Stmt::FunctionDef(func) => Stmt::FunctionDef(transform.transform_function(func)),
    }
}

/// Rewrites every statement of a block.
pub fn walk_body<T: Transform + ?Sized>(transform: &mut T, body: Vec<Stmt>) -> Vec<Stmt> {
    body.into_iter().map(|stmt| transform.transform_stmt(stmt)).collect()
}

/// Rewrites the decorators, parameters, return annotation and body of a function.
pub fn walk_function<T: Transform + ?Sized>(transform: &mut T, func: FunctionDef) -> FunctionDef {
    let FunctionDef { decorators, name, params, returns, body, span } = func;
    FunctionDef {
        decorators: decorators.into_iter().map(|expr| transform.transform_expr(expr)).collect(),
        name,
        params: params
            .into_iter()
            .map(|Param { name, annotation, default }| Param {
                name,
                annotation: annotation.map(|expr| transform.transform_expr(expr)),
                default: default.map(|expr| transform.transform_expr(expr)),
            })
            .collect(),
        returns: returns.map(|expr| transform.transform_expr(expr)),
        body: walk_body(transform, body),
        span,
    }
}

#[cfg(test)]
mod tests {
    use mathify_parser::parser::{ast::Name, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Replaces every name with `n`.
    struct Blank;

    impl Transform for Blank {
        fn transform_expr(&mut self, expr: Expr) -> Expr {
            match expr {
                Expr::Name(name) => Expr::Name(Name::with_span("n", name.span)),
                expr => walk_expr(self, expr),
            }
        }
    }

    #[test]
    fn reaches_every_expression() {
        let source = "\
def f(x=a) -> b:
    self.z = g(x).w if x else -x
    if x < y and not z:
        return x ** 2
    return s
";
        let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
        let func = Blank.transform_function(func);
        assert_eq!(func.to_string(), "\
def f(x=n) -> n:
    n.z = n(n).w if n else -n
    if n < n and not n:
        return n ** 2
    return n
");
    }
}
