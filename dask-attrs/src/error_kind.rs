use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Data,
    DeriveInput,
    Expr,
    Fields,
    Ident,
    Result,
    Token,
};

/// One `tag = expr` pair inside the `error` attribute.
enum Tag {
    Message(Expr),
    Labels(Expr),
    Help(Expr),
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;
        input.parse::<Token![=]>()?;

        let tag = match ident.to_string().as_str() {
            "message" => Tag::Message(input.parse()?),
            "labels" => Tag::Labels(input.parse()?),
            "help" => Tag::Help(input.parse()?),
            other => {
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!("unknown tag `{}`, expected `message`, `labels` or `help`", other),
                ));
            },
        };
        Ok(tag)
    }
}

/// The contents of the `error` attribute.
#[derive(Default)]
struct ErrorArgs {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Parse for ErrorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ErrorArgs::default();
        for tag in Punctuated::<Tag, Token![,]>::parse_terminated(input)? {
            match tag {
                Tag::Message(expr) => args.message = Some(expr),
                Tag::Labels(expr) => args.labels = Some(expr),
                Tag::Help(expr) => args.help = Some(expr),
            }
        }
        Ok(args)
    }
}

/// A struct that [`ErrorKind`] is derived for.
pub struct ErrorKindTarget {
    pub name: Ident,
    fields: Fields,
    message: Expr,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let input = input.parse::<DeriveInput>()?;
        let Data::Struct(data) = input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`ErrorKind` can only be derived for structs",
            ));
        };

        let args = match input.attrs.iter().find(|attr| attr.path().is_ident("error")) {
            Some(attr) => attr.parse_args::<ErrorArgs>()?,
            None => ErrorArgs::default(),
        };
        let Some(message) = args.message else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "missing `#[error(message = ...)]` attribute",
            ));
        };

        Ok(Self {
            name: input.ident,
            fields: data.fields,
            message,
            labels: args.labels,
            help: args.help,
        })
    }
}

impl ErrorKindTarget {
    /// Brings the named fields into scope for the tag expressions.
    fn bind_fields(&self) -> TokenStream2 {
        let name = &self.name;
        match &self.fields {
            Fields::Named(named) => {
                let idents = named.named.iter().filter_map(|field| field.ident.as_ref());
                quote! {
                    #[allow(unused_variables)]
                    let #name { #(#idents),* } = self;
                }
            },
            Fields::Unnamed(_) => quote_spanned! {
                name.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs");
            },
            Fields::Unit => TokenStream2::new(),
        }
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let bind_fields = self.bind_fields();
        let message = &self.message;
        let labels = match &self.labels {
            Some(labels) => quote! { #labels },
            None => quote! { [""] },
        };
        let help = self.help.as_ref().map(|help| quote! { report = report.with_help(#help); });

        tokens.extend(quote! {
            fn message(&self) -> String {
                #bind_fields
                (#message).to_string()
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bind_fields

                let start = spans.iter().map(|span| span.start).min().unwrap_or(0);
                let labels = #labels.into_iter().zip(spans).map(|(text, span)| {
                    let label = ariadne::Label::new((src_id, span.clone()))
                        .with_color(dask_error::EXPR);
                    match text.to_string() {
                        text if text.is_empty() => label,
                        text => label.with_message(text),
                    }
                });

                #[allow(unused_mut)]
                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, start)
                    .with_message(#message)
                    .with_labels(labels);
                #help
                report.finish()
            }
        });
    }
}
