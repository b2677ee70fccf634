mod decode_field;

use decode_field::decode_field;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

/// Derives a property-path accessor over the struct's named fields.
///
/// Every non-skipped field answers to its own name and, for snake_case
/// fields, to the camelCase spelling as well. Fields marked
/// `#[fetch(nested)]` delegate the remainder of a dotted path to their own
/// accessor; `#[fetch(rename = "...")]` replaces the matched name and
/// `#[fetch(skip)]` hides the field entirely.
#[proc_macro_derive(Fetch, attributes(fetch))]
pub fn derive_fetch(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let name = &item.ident;
    let (impl_generics, type_generics, where_clause) = item.generics.split_for_impl();
    let arms = item
        .fields
        .iter()
        .map(decode_field)
        .filter(|metadata| !metadata.skip)
        .map(|metadata| {
            let ident = &metadata.ident;
            let field_name = &metadata.name;
            let matched = match &metadata.alias {
                Some(alias) => quote! {
                    ::grout::name_matches(step, #field_name)
                        || ::grout::name_matches(step, #alias)
                },
                None => quote!(::grout::name_matches(step, #field_name)),
            };
            if metadata.nested {
                quote! {
                    if #matched {
                        return if rest.is_empty() {
                            Ok(None)
                        } else {
                            ::grout::Fetch::fetch(&self.#ident, rest)
                        };
                    }
                }
            } else {
                quote! {
                    if #matched {
                        return if rest.is_empty() {
                            Ok(Some(::grout::Binding::value(self.#ident.clone())))
                        } else {
                            Ok(None)
                        };
                    }
                }
            }
        });
    quote! {
        impl #impl_generics ::grout::Fetch for #name #type_generics #where_clause {
            fn fetch(&self, path: &str) -> ::grout::Result<Option<::grout::Binding>> {
                let (step, rest) = ::grout::split_path(path);
                #(#arms)*
                Ok(None)
            }
        }
    }
    .into()
}
