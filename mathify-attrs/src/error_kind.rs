use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, Data, DeriveInput, Expr, Fields, Ident, Result};

/// The tags of the `error` attribute.
#[derive(Default)]
struct ErrorAttr {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl ErrorAttr {
    /// Reads the first `error` attribute of the item. Every tag is optional.
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut tags = Self::default();
        let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident("error")) else {
            return Ok(tags);
        };

        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("message") {
                &mut tags.message
            } else if meta.path.is_ident("labels") {
                &mut tags.labels
            } else if meta.path.is_ident("help") {
                &mut tags.help
            } else {
                return Err(meta.error("expected `message`, `labels` or `help`"));
            };
            *slot = Some(meta.value()?.parse()?);
            Ok(())
        })?;
        Ok(tags)
    }
}

/// Binds every named field of `self` to a local of the same name, so that tag expressions can
/// refer to them.
fn bind_fields(name: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().filter_map(|field| field.ident.as_ref());
            quote! {
                #[allow(unused_variables)]
                let #name { #(#idents),* } = self;
            }
        },
        Fields::Unnamed(unnamed) => quote_spanned! { unnamed.span() =>
            compile_error!("`ErrorKind` cannot be derived for tuple structs");
        },
        Fields::Unit => TokenStream2::new(),
    }
}

/// Generates the `ErrorKind` implementation for a struct.
pub fn expand(input: DeriveInput) -> Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(input.ident.span(), "`ErrorKind` can only be derived for structs"));
    };
    let tags = ErrorAttr::from_input(&input)?;
    let name = &input.ident;
    let bindings = bind_fields(name, &data.fields);

    let message = tags.message.map_or_else(|| quote! { "an error occurred" }, |expr| quote! { #expr });
    let labels = tags.labels.map_or_else(|| quote! { [""] }, |expr| quote! { #expr });
    let help = tags.help.map(|expr| quote! { report.set_help(#expr); });

    Ok(quote! {
        impl mathify_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn message(&self) -> String {
                #bindings
                (#message).to_string()
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bindings
                let start = spans.first().map_or(0, |span| span.start);
                let labels = (#labels)
                    .into_iter()
                    .zip(spans)
                    .map(|(text, span)| {
                        let text = text.to_string();
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(mathify_error::EXPR);
                        if text.is_empty() { label } else { label.with_message(text) }
                    })
                    .collect::<Vec<_>>();

                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, start)
                    .with_message(self.message())
                    .with_labels(labels);
                #help
                report.finish()
            }
        }
    })
}
