// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_json_class;
mod trait_json_field;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use trait_json_class::impl_trait_json_class;
use trait_json_field::impl_trait_json_field;

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::JsonStruct;

/// Generates all impls for a `#[derive(JsonClass)]` struct.
pub(crate) fn impl_json_class(json_struct: &JsonStruct) -> TokenStream {
    let json_field_impl = impl_trait_json_field(json_struct);
    let json_class_impl = impl_trait_json_class(json_struct);
    let auto_register = get_auto_register_impl(json_struct.meta());

    quote! {
        const _: () = {
            #json_field_impl

            #json_class_impl

            #auto_register
        };
    }
}
