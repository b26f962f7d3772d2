//! The expression tree for a function definition.
//!
//! Every node records the span of source code it was parsed from. Nodes created by tools rather
//! than the parser use the span of the node they were derived from, or `0..0`.

pub mod assign;
pub mod attribute;
pub mod bool_op;
pub mod call;
pub mod compare;
pub mod expr;
pub mod function;
pub mod if_expr;
pub mod literal;
pub mod name;
pub mod binary;
pub mod stmt;
pub mod unary;

pub use assign::{Assign, AugAssign, Target, TupleTarget};
pub use attribute::Attribute;
pub use binary::BinOp;
pub use bool_op::BoolOp;
pub use call::Call;
pub use compare::Compare;
pub use expr::Expr;
pub use function::{FunctionDef, Param};
pub use if_expr::IfExp;
pub use literal::{Constant, Literal};
pub use name::Name;
pub use stmt::{ExprStmt, If, Pass, Return, Stmt};
pub use unary::UnaryOp;
