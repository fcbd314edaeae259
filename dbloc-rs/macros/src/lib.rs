//! Derive macros for dbloc-rs: `#[derive(Query)]` and `#[derive(Command)]` implement `Request`
//! plus the marker trait, so you don't write `impl Request for T { type Output = ...; }` by hand.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Type};

/// Implements `Request` and `Query`. The result type is required: `#[query(output = String)]`.
#[proc_macro_derive(Query, attributes(query))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let output = match parse_output(&input, "query") {
        Ok(Some(ty)) => quote! { #ty },
        Ok(None) => {
            return syn::Error::new_spanned(&input.ident, "missing `#[query(output = Type)]`")
                .to_compile_error()
                .into()
        }
        Err(e) => return e.to_compile_error().into(),
    };
    expand(&input, output, quote! { ::dbloc_rs::Query }).into()
}

/// Implements `Request` and `Command`. `#[command(output = Type)]` is optional; defaults to `()`.
#[proc_macro_derive(Command, attributes(command))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let output = match parse_output(&input, "command") {
        Ok(Some(ty)) => quote! { #ty },
        Ok(None) => quote! { () },
        Err(e) => return e.to_compile_error().into(),
    };
    expand(&input, output, quote! { ::dbloc_rs::Command }).into()
}

fn parse_output(input: &DeriveInput, attr_name: &str) -> syn::Result<Option<Type>> {
    let mut output = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident(attr_name)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("output") {
                output = Some(meta.value()?.parse::<Type>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported attribute, expected `output = Type`"))
            }
        })?;
    }
    Ok(output)
}

fn expand(input: &DeriveInput, output: TokenStream2, marker: TokenStream2) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics ::dbloc_rs::Request for #name #ty_generics #where_clause {
            type Output = #output;
        }

        impl #impl_generics #marker for #name #ty_generics #where_clause {}
    }
}
