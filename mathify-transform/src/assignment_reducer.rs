//! Inlines intermediate assignments into the final statement of a function.

use crate::{
    error::{UnsupportedStatement, UnsupportedTarget},
    transform::{walk_expr, Transform},
};
use log::{debug, trace};
use mathify_error::Error;
use mathify_parser::parser::ast::{
    Assign,
    AugAssign,
    Expr,
    ExprStmt,
    FunctionDef,
    If,
    Name,
    Return,
    Stmt,
    Target,
};
use std::collections::HashSet;

/// The bindings of one function body, in the order their names were first assigned. Assigning a
/// name again replaces its value but keeps its position.
#[derive(Debug, Clone, Default)]
struct Scope {
    bindings: Vec<(Name, Expr)>,
}

impl Scope {
    /// Returns the value bound to the identifier, if any.
    fn get(&self, id: &str) -> Option<&Expr> {
        self.bindings
            .iter()
            .find(|(name, _)| name.id == id)
            .map(|(_, value)| value)
    }

    /// Binds the identifier to the value.
    fn bind(&mut self, name: Name, value: Expr) {
        match self.bindings.iter_mut().find(|(bound, _)| bound.id == name.id) {
            Some((_, bound_value)) => *bound_value = value,
            None => self.bindings.push((name, value)),
        }
    }
}

/// Replaces every reference to a bound, non-retained name with its value.
struct Substitute<'a> {
    scope: &'a Scope,
    retained: &'a HashSet<String>,
}

impl Transform for Substitute<'_> {
    fn transform_expr(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Name(name) if !self.retained.contains(&name.id) => {
                match self.scope.get(&name.id) {
                    Some(value) => value.clone(),
                    None => Expr::Name(name),
                }
            },
            expr => walk_expr(self, expr),
        }
    }
}

/// Reduces a function whose body is a sequence of assignments followed by a `return` or `if`
/// statement, so that only the final statement remains, with every assigned name substituted by
/// its value.
///
/// Substitution is eager: each assigned value is rewritten using the bindings before it, so chains
/// of assignments are inlined transitively. Names in the retained set are never substituted;
/// instead their assignments are kept, in order, before the final statement.
///
/// ```
/// use mathify_parser::parser::{ast::FunctionDef, Parser};
/// use mathify_transform::AssignmentReducer;
/// use std::collections::HashSet;
///
/// let source = "def f(x):\n    y = 2 + x\n    z = 3 * y\n    return 4 + z\n";
/// let func = Parser::new(source).try_parse_full::<FunctionDef>().unwrap();
/// let retained = HashSet::new();
/// let func = AssignmentReducer::new(&retained).reduce(func).unwrap();
/// assert_eq!(func.to_string(), "def f(x):\n    return 4 + 3 * (2 + x)\n");
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentReducer<'a> {
    /// Names whose assignments are kept.
    retained: &'a HashSet<String>,

    /// The bindings of each function being reduced, innermost last.
    scopes: Vec<Scope>,
}

impl<'a> AssignmentReducer<'a> {
    /// Creates a reducer that keeps the assignments to the given names.
    pub fn new(retained: &'a HashSet<String>) -> Self {
        Self { retained, scopes: Vec::new() }
    }

    /// Reduces the body of the function.
    pub fn reduce(mut self, func: FunctionDef) -> Result<FunctionDef, Error> {
        self.reduce_function(func)
    }

    /// Rewrites the expression using the bindings of the innermost scope.
    fn substitute(&self, expr: Expr) -> Expr {
        match self.scopes.last() {
            Some(scope) => Substitute { scope, retained: self.retained }.transform_expr(expr),
            None => expr,
        }
    }

    fn reduce_function(&mut self, func: FunctionDef) -> Result<FunctionDef, Error> {
        let FunctionDef { decorators, name, params, returns, mut body, span } = func;
        let Some(terminal) = body.pop() else {
            return Ok(FunctionDef { decorators, name, params, returns, body, span });
        };

        self.scopes.push(Scope::default());
        let result = self.reduce_body(body, terminal);
        let scope = self.scopes.pop().unwrap_or_default();
        let terminal = result?;

        let mut body = scope
            .bindings
            .into_iter()
            .filter(|(name, _)| self.retained.contains(&name.id))
            .map(|(name, value)| Stmt::Assign(Assign::to_name(name, value)))
            .collect::<Vec<_>>();
        body.push(terminal);

        debug!("reduced `{}` to {} statement(s)", name, body.len());
        Ok(FunctionDef { decorators, name, params, returns, body, span })
    }

    /// Binds every assignment in `body` in the innermost scope, then returns the rewritten
    /// terminal statement.
    fn reduce_body(&mut self, body: Vec<Stmt>, terminal: Stmt) -> Result<Stmt, Error> {
        for stmt in body {
            let (mut targets, value, span) = match stmt {
                Stmt::Assign(Assign { targets, value, span }) => (targets, value, span),
                other => return Err(Error::new(vec![other.span()], UnsupportedStatement {
                    kind: other.kind_name().to_string(),
                })),
            };

            if targets.len() != 1 {
                return Err(Error::new(vec![span], UnsupportedStatement {
                    kind: "Assign with multiple targets".to_string(),
                }));
            }
            let name = match targets.remove(0) {
                Target::Name(name) => name,
                target => return Err(Error::new(vec![target.span()], UnsupportedTarget)),
            };

            let value = self.substitute(value);
            trace!("binding `{}` to `{}`", name, value);
            if let Some(scope) = self.scopes.last_mut() {
                scope.bind(name, value);
            }
        }

        match terminal {
            Stmt::Return(_) | Stmt::If(_) => self.rewrite_stmt(terminal),
            other => Err(Error::new(vec![other.span()], UnsupportedStatement {
                kind: other.kind_name().to_string(),
            })),
        }
    }

    /// Substitutes bound names in every expression of a statement. Nested function definitions
    /// are reduced in a fresh scope.
    fn rewrite_stmt(&mut self, stmt: Stmt) -> Result<Stmt, Error> {
        Ok(match stmt {
            Stmt::Assign(Assign { targets, value, span }) => Stmt::Assign(Assign {
                targets,
                value: self.substitute(value),
                span,
            }),
            Stmt::AugAssign(AugAssign { target, op, value, span }) => Stmt::AugAssign(AugAssign {
                target,
                op,
                value: self.substitute(value),
                span,
            }),
            Stmt::Expr(ExprStmt { value, span }) => Stmt::Expr(ExprStmt {
                value: self.substitute(value),
                span,
            }),
            Stmt::Pass(pass) => Stmt::Pass(pass),
            Stmt::Return(Return { value, span }) => Stmt::Return(Return {
                value: value.map(|value| self.substitute(value)),
                span,
            }),
            Stmt::If(If { test, body, orelse, span }) => Stmt::If(If {
                test: self.substitute(test),
                body: body.into_iter().map(|stmt| self.rewrite_stmt(stmt)).collect::<Result<_, _>>()?,
                orelse: orelse.into_iter().map(|stmt| self.rewrite_stmt(stmt)).collect::<Result<_, _>>()?,
                span,
            }),
            Stmt::FunctionDef(func) => Stmt::FunctionDef(self.reduce_function(func)?),
        })
    }
}
