use std::borrow::Cow;

use convert_case::{Case, Casing};
use proc_macro2::{Ident, Span, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

pub fn found_crate() -> TokenStream {
    let found_crate =
        crate_name("rendered-entity").expect("rendered-entity is present in `Cargo.toml`");
    match found_crate {
        FoundCrate::Itself => quote!(rendered_entity),
        FoundCrate::Name(name) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!( ::#ident )
        }
    }
}

pub fn renamed_name<'a>(
    s: String,
    rename: Option<impl Into<Cow<'a, str>>>,
    case: Option<Case>,
) -> Cow<'a, str> {
    rename.map(Into::into).unwrap_or_else(|| match case {
        Some(case) => s.to_case(case).into(),
        None => s.into(),
    })
}
