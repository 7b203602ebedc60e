use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput};

mod entity;
mod util;

#[proc_macro_derive(EntityType, attributes(entity))]
pub fn derive_entity_type(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match &input.data {
        Data::Struct(_) | Data::Enum(_) => {
            entity::derive(&input).unwrap_or_else(syn::Error::into_compile_error)
        }
        _ => quote!(compile_error!(
            "`EntityType` can only be derived for `struct`s and `enum`s"
        )),
    }
    .into()
}
