//! Rendering of expression trees as Typst-style math formulas.
//!
//! The [`FormulaGenerator`] walks a reduced function definition and renders it with the help of
//! two leaf converters: the [`IdentifierConverter`] for names and [`format_constant`] for
//! literals.

pub mod constant;
pub mod error;
pub mod formula;
pub mod identifier;
pub mod symbols;

pub use constant::format_constant;
pub use formula::FormulaGenerator;
pub use identifier::{Identifier, IdentifierConverter};
pub use symbols::{GreekLetters, SymbolTable};
