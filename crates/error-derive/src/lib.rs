//! `#[derive(Error)]` for the error enums used throughout the rasterizer crates.
//!
//! Every variant needs a `#[msg = "..."]` attribute, which becomes its [Display](std::fmt::Display)
//! output. Variants may be
//! * unit variants
//! * tuple variants with exactly one field, which also get a `From` impl and are reported
//!   as the error `source()`
//! * struct variants, whose fields can be referenced by name inside the message
//!   (`#[msg = "need {required} bytes"]`)

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

#[proc_macro_derive(Error, attributes(msg))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    let item: syn::ItemEnum = syn::parse(input).expect("#[derive(Error)] only supports enums");

    let name = &item.ident;
    let (impl_generics, type_generics, where_clause) = item.generics.split_for_impl();

    let mut display_arms = vec![];
    let mut source_arms = vec![];
    let mut from_impls = vec![];

    for variant in &item.variants {
        let ident = &variant.ident;
        let message = find_message(variant);

        match &variant.fields {
            syn::Fields::Unit => {
                display_arms.push(quote!(Self::#ident => f.write_str(#message)));
            },
            syn::Fields::Unnamed(fields) => {
                assert_eq!(
                    fields.unnamed.len(),
                    1,
                    "tuple variant {ident} must have exactly one field"
                );
                let ty = &fields.unnamed[0].ty;

                display_arms.push(quote!(Self::#ident(_) => f.write_str(#message)));
                source_arms.push(quote!(Self::#ident(ref inner) => Some(inner)));
                from_impls.push(quote!(
                    #[automatically_derived]
                    impl #impl_generics From<#ty> for #name #type_generics #where_clause {
                        fn from(value: #ty) -> Self {
                            Self::#ident(value)
                        }
                    }
                ));
            },
            syn::Fields::Named(fields) => {
                let field_names: Vec<_> = fields
                    .named
                    .iter()
                    .map(|field| field.ident.clone().expect("named field without a name"))
                    .collect();

                display_arms.push(quote!(
                    #[allow(unused_variables)]
                    Self::#ident { #(#field_names),* } => ::std::write!(f, #message)
                ));
            },
        }
    }

    let source_impl = source_body(&source_arms);

    quote!(
        #[automatically_derived]
        impl #impl_generics ::std::fmt::Display for #name #type_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(#display_arms,)*
                }
            }
        }

        #(#from_impls)*

        #[automatically_derived]
        impl #impl_generics ::std::error::Error for #name #type_generics #where_clause {
            #source_impl
        }
    )
    .into()
}

/// Extract the literal from the `#[msg = "..."]` attribute of a variant
fn find_message(variant: &syn::Variant) -> syn::LitStr {
    let message = variant.attrs.iter().find_map(|attr| {
        let syn::Meta::NameValue(name_value) = &attr.meta else {
            return None;
        };

        if !name_value.path.is_ident("msg") {
            return None;
        }

        match &name_value.value {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(literal),
                ..
            }) => Some(literal.clone()),
            _ => panic!("#[msg] must be a string literal"),
        }
    });

    message.unwrap_or_else(|| panic!("variant {} needs a #[msg = \"...\"] attribute", variant.ident))
}

fn source_body(source_arms: &[TokenStream2]) -> TokenStream2 {
    if source_arms.is_empty() {
        return quote!();
    }

    quote!(
        fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
            match self {
                #(#source_arms,)*
                _ => None,
            }
        }
    )
}
