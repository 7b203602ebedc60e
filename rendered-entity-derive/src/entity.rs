use std::collections::BTreeSet;

use convert_case::Case;
use darling::{FromDeriveInput, FromMeta};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::DeriveInput;

use crate::util::{found_crate, renamed_name};

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity))]
struct EntityTypeOptions {
    ident: Ident,
    /// entity type id, defaults to the snake_case struct name
    rename: Option<String>,
    #[darling(multiple)]
    view_mode: Vec<ViewModeOptions>,
}

#[derive(Debug, FromMeta)]
struct ViewModeOptions {
    name: String,
    label: Option<String>,
}

pub fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let found_crate = found_crate();

    let attr = EntityTypeOptions::from_derive_input(input)?;
    let ident = &attr.ident;
    let type_id = renamed_name(ident.to_string(), attr.rename.as_ref(), Some(Case::Snake));

    let mut seen = BTreeSet::new();
    let mut view_modes = TokenStream::new();
    for mode in &attr.view_mode {
        if mode.name.is_empty() {
            return Err(syn::Error::new_spanned(
                ident,
                "view mode names must not be empty",
            ));
        }
        if !seen.insert(mode.name.as_str()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("view mode `{}` is declared more than once", mode.name),
            ));
        }
        let name = &mode.name;
        let label = renamed_name(mode.name.clone(), mode.label.as_ref(), Some(Case::Title));
        view_modes.extend(quote! {
            (#name, #label),
        });
    }

    Ok(quote! {
        #[automatically_derived]
        impl #found_crate::EntityType for #ident {
            fn entity_type_id() -> &'static ::std::primitive::str {
                #type_id
            }
            fn view_modes() -> &'static [(&'static ::std::primitive::str, &'static ::std::primitive::str)] {
                &[#view_modes]
            }
        }
    })
}
