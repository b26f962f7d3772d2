//! Transformations over the expression tree of a function definition.
//!
//! Each transformation takes ownership of a tree and returns a new one. They are applied in this
//! order by the `mathify` pipeline:
//!
//! 1. [`IdentifierRenamer`], renaming names chosen by the caller.
//! 2. [`DocstringRemover`] and [`AugAssignReplacer`], normalizing the statements of the body.
//! 3. [`SelfStripper`], turning a method into a free function.
//! 4. [`AssignmentReducer`], inlining intermediate assignments into the final expression.
//!
//! Function expansion ([`expansion`]) is consulted during formula generation, but can also be
//! applied to a whole tree with [`FunctionExpander`].

pub mod assignment_reducer;
pub mod error;
pub mod expansion;
pub mod normalizer;
pub mod renamer;
pub mod self_stripper;
pub mod transform;

pub use assignment_reducer::AssignmentReducer;
pub use expansion::FunctionExpander;
pub use normalizer::{AugAssignReplacer, DocstringRemover};
pub use renamer::IdentifierRenamer;
pub use self_stripper::SelfStripper;
pub use transform::Transform;
