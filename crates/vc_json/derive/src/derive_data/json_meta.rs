use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, Path};

use super::TypeAttributes;

/// Type-level information shared by all generated impls.
pub(crate) struct JsonMeta<'a> {
    vc_json_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl core::fmt::Debug for JsonMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JsonMeta")
            .field("vc_json_path", &self.vc_json_path.to_token_stream())
            .field("ident", &self.ident)
            .finish()
    }
}

impl<'a> JsonMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            vc_json_path: crate::path::vc_json(),
            attrs,
            ident,
            generics,
        }
    }

    #[inline]
    pub fn vc_json_path(&self) -> &Path {
        &self.vc_json_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn real_ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn generics(&self) -> &Generics {
        self.generics
    }

    /// Whether the type has type or const parameters.
    ///
    /// Lifetime-only types still have a single schema per `TypeId`,
    /// but they cannot be `'static` anyway.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
            || self.generics.const_params().next().is_some()
    }

    /// An expression of type `&'static str` naming the class.
    ///
    /// Non-generic classes use the bare identifier; generic ones use
    /// the full type name so that every instantiation is distinct.
    pub fn type_name_expr(&self) -> TokenStream {
        if self.impl_with_generic() {
            quote! { ::core::any::type_name::<Self>() }
        } else {
            let name = self.ident.to_string();
            quote! { #name }
        }
    }

    /// The identifiers of all type parameters.
    pub fn type_param_idents(&self) -> Vec<Ident> {
        self.generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect()
    }
}
