pub mod kind;

pub use mathify_error::Error;
