//! Implementation of the #[derive(Annotate)] proc macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse2};

/// Expand the #[derive(Annotate)] macro.
pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut other = false;
    for attr in &input.attrs {
        if !attr.path().is_ident("annotate") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("other") {
                other = true;
                Ok(())
            } else {
                Err(meta.error("unknown annotate attribute"))
            }
        })?;
    }

    let body = if other {
        quote! { ::toolspec_core::TypeAnnotation::other(stringify!(#name)) }
    } else {
        quote! { ::toolspec_core::TypeAnnotation::model::<Self>() }
    };

    Ok(quote! {
        impl #impl_generics ::toolspec_core::Annotate for #name #ty_generics #where_clause {
            fn annotation() -> ::toolspec_core::TypeAnnotation {
                #body
            }
        }
    })
}
