mod error_kind;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `mathify_error::ErrorKind` for a struct.
///
/// The report is described by the `error` attribute, whose tags are all optional:
///
/// ```ignore
/// use ariadne::Fmt;
/// use mathify_attrs::ErrorKind;
/// use mathify_error::EXPR;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("`{}` is not a valid identifier", name),
///     labels = ["this name"],
///     help = format!("try {}", "escape_underscores".fg(EXPR)),
/// )]
/// pub struct InvalidIdentifier {
///     pub name: String,
/// }
/// ```
///
/// | Tag       | Expression                                                              |
/// | --------- | ----------------------------------------------------------------------- |
/// | `message` | Anything implementing [`ToString`]; the one-line summary of the error.  |
/// | `labels`  | An iterable of strings, one for each span of the error, in order.       |
/// | `help`    | Anything implementing [`ToString`]; how the user can fix the error.     |
///
/// The named fields of the struct are in scope in every tag expression. Tuple structs, enums and
/// unions are rejected.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error_kind::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
