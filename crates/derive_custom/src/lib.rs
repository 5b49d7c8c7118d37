use proc_macro2::Literal;
use quote::quote;
use syn::*;

/// Turns a struct or enum into a parameter section. The section name
/// is given as a string literal: `#[quadsim_parameters("quadtree")]`.
#[proc_macro_attribute]
pub fn quadsim_parameters(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    parameter_attr_derive(args, input)
}

pub(crate) fn parameter_attr_derive(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let args: proc_macro2::TokenStream = args.into();
    let name: Literal = match args.into_iter().next() {
        Some(proc_macro2::TokenTree::Literal(s)) => s,
        _ => panic!("quadsim_parameters requires a section name, e.g. #[quadsim_parameters(\"section\")]"),
    };

    let trait_impl: proc_macro2::TokenStream = parameters_trait_impl(input.clone(), name).into();
    let input: proc_macro2::TokenStream = input.into();
    let output = quote! {
        #[derive(Clone, serde::Serialize, serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        #[serde(rename_all = "snake_case")]
        #input

        #trait_impl
    };
    output.into()
}

pub(crate) fn parameters_trait_impl(
    input: proc_macro::TokenStream,
    section_name: Literal,
) -> proc_macro::TokenStream {
    let ast: DeriveInput = syn::parse(input).unwrap();
    let type_name = &ast.ident;
    let (impl_generics, type_generics, where_clause) = &ast.generics.split_for_impl();

    let gen = quote! {
        impl #impl_generics ::derive_traits::QuadsimParameters for #type_name #type_generics #where_clause {
            fn section_name() -> &'static str {
                #section_name
            }
        }
    };
    gen.into()
}
