use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::JsonStruct;

/// Generate the `JsonField` impl, which defers to the class schema.
pub(crate) fn impl_trait_json_field(json_struct: &JsonStruct) -> TokenStream {
    let meta = json_struct.meta();
    let vc_json_path = meta.vc_json_path();
    let json_field_ = crate::path::json_field_(vc_json_path);
    let json_class_ = crate::path::json_class_(vc_json_path);
    let field_kind_ = crate::path::field_kind_(vc_json_path);
    let json_error_ = crate::path::json_error_(vc_json_path);
    let value_ = crate::path::value_(vc_json_path);
    let macro_exports_ = crate::path::macro_exports_(vc_json_path);
    let cow_ = crate::path::cow_();
    let result_ = crate::path::result_();

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = json_struct.split_generics();

    let type_name = if meta.impl_with_generic() {
        quote! {
            #cow_::Borrowed(<Self as #json_class_>::schema().info().type_name())
        }
    } else {
        let name = real_ident.to_string();
        quote! { #cow_::Borrowed(#name) }
    };

    quote! {
        impl #impl_generics #json_field_ for #real_ident #ty_generics #where_clause {
            const KIND: #field_kind_ = #field_kind_::Object;

            fn type_name() -> #cow_<'static, str> {
                #type_name
            }

            #[inline]
            fn matches(value: &#value_) -> bool {
                <Self as #json_class_>::schema().matches(value)
            }

            #[inline]
            fn from_json(value: &#value_) -> #result_<Self, #json_error_> {
                #macro_exports_::class_from_json::<Self>(value)
            }

            #[inline]
            fn to_json(&self) -> #value_ {
                <Self as #json_class_>::serialize(self)
            }
        }
    }
}
