use crate::derive_data::JsonMeta;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &JsonMeta) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    if let Some(span) = meta.attrs().auto_register {
        // Invalid for generic types.
        if meta.impl_with_generic() {
            return crate::utils::empty();
        }

        let vc_json_path = meta.vc_json_path();
        let auto_register_ = crate::path::auto_register_(vc_json_path);
        let real_ident = meta.real_ident();

        quote_spanned! { span =>
            #auto_register_::inventory::submit!{
                #auto_register_::__AutoRegisterFunc(
                    #auto_register_::__register::<#real_ident>
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &JsonMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
