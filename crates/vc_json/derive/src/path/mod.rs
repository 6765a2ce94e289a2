//! This independent module is used to provide the required path.
//! So as to minimize changes when the `vc_json` structure is modified.
//!
//! The only special feature is the path of vc_json itself,
//! See [`vc_json`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_json` crate.
///
/// Not all crates can access the runtime crate itself through `vc_json`,
/// we have to scan the builder's `cargo.toml`.
///
/// 1. For crates that depend on `vc_json`, `::vc_json` is returned here.
/// 2. For crates that depend on `vc_json_kit`, `::vc_json_kit::json` is returned here.
/// 3. For other situations, `::vc_json` is returned here, but this may be incorrect.
///
/// The cost of this function is relatively high (accessing files, obtaining read-write lock permissions, querying content...),
/// so the crate path is mainly obtained through parameter passing rather than reacquiring.
pub(crate) fn vc_json() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_json"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn json_class_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::JsonClass
    }
}

#[inline(always)]
pub(crate) fn json_field_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::JsonField
    }
}

#[inline(always)]
pub(crate) fn field_kind_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::FieldKind
    }
}

#[inline(always)]
pub(crate) fn json_error_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::JsonError
    }
}

#[inline(always)]
pub(crate) fn value_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::Value
    }
}

#[inline(always)]
pub(crate) fn class_schema_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::schema::ClassSchema
    }
}

#[inline(always)]
pub(crate) fn field_descriptor_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::schema::FieldDescriptor
    }
}

#[inline(always)]
pub(crate) fn non_generic_schema_cell_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::schema::NonGenericSchemaCell
    }
}

#[inline(always)]
pub(crate) fn generic_schema_cell_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::schema::GenericSchemaCell
    }
}

#[inline(always)]
pub(crate) fn macro_exports_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_json_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_json_path::__macro_exports::auto_register
    }
}

// -----------------------------------------------------------------------------
// Std items

#[inline(always)]
pub(crate) fn cow_() -> TokenStream {
    quote! { ::std::borrow::Cow }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote! { ::core::default::Default }
}
