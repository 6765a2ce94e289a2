use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Path};

use crate::JSON_ATTRIBUTE_NAME;
use crate::utils::{parse_path_value, set_flag};

/// Attributes placed on the struct itself.
///
/// ```ignore
/// #[derive(JsonClass, Default)]
/// #[json(discard_extra_fields, auto_register)]
/// #[json(post_deserialize = Self::validate)]
/// struct Foo { /* ... */ }
/// ```
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// Do not keep unconsumed members even if the struct has an `ExtraFields` member.
    pub discard_extra_fields: Option<Span>,
    /// Submit the class to the automatic registration list.
    pub auto_register: Option<Span>,
    pub pre_deserialize: Vec<Path>,
    pub post_deserialize: Vec<Path>,
    pub pre_serialize: Vec<Path>,
    pub post_serialize: Vec<Path>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(JSON_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let path = &meta.path;
        if path.is_ident("discard_extra_fields") {
            set_flag(&mut self.discard_extra_fields, meta)
        } else if path.is_ident("auto_register") {
            set_flag(&mut self.auto_register, meta)
        } else if path.is_ident("pre_deserialize") {
            self.pre_deserialize.push(parse_path_value(meta)?);
            Ok(())
        } else if path.is_ident("post_deserialize") {
            self.post_deserialize.push(parse_path_value(meta)?);
            Ok(())
        } else if path.is_ident("pre_serialize") {
            self.pre_serialize.push(parse_path_value(meta)?);
            Ok(())
        } else if path.is_ident("post_serialize") {
            self.post_serialize.push(parse_path_value(meta)?);
            Ok(())
        } else {
            Err(meta.error(
                "unknown type attribute, expected one of `discard_extra_fields`, `auto_register`, \
                 `pre_deserialize`, `post_deserialize`, `pre_serialize` or `post_serialize`",
            ))
        }
    }
}
