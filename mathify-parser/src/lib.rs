//! Parser and expression tree for the subset of Python function definitions that `mathify` can
//! typeset.
//!
//! The expression tree lives in [`parser::ast`]. Trees are usually produced by parsing the source
//! of a function:
//!
//! ```
//! use mathify_parser::parser::{ast::FunctionDef, Parser};
//!
//! let mut parser = Parser::new("def f(x):\n    return x + 1\n");
//! let func = parser.try_parse_full::<FunctionDef>().unwrap();
//! assert_eq!(func.name.id, "f");
//! ```
//!
//! They can also be built directly, for example by tooling that extracts them by other means.

pub mod parser;
pub mod tokenizer;
