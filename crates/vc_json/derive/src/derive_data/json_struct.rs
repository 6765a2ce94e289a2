use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, ImplGenerics, LitStr, Type, TypeGenerics};

use super::{DefaultBehavior, FieldAttributes, JsonMeta, TypeAttributes};
use crate::utils::{is_any_ident_in_token_stream, is_extra_fields, option_inner};

// -----------------------------------------------------------------------------
// StructField

/// How a defaulted or optional member falls back.
pub(crate) enum FieldPolicy<'a> {
    Required,
    /// `Option<T>` member, holds `T`.
    Optional(&'a Type),
    Defaulted(Span, DefaultBehavior),
}

/// What a struct member contributes to the schema.
pub(crate) enum FieldRole<'a> {
    Mapped {
        names: Vec<LitStr>,
        policy: FieldPolicy<'a>,
    },
    Flatten,
    Extra,
    Skip,
}

pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub role: FieldRole<'a>,
}

impl<'a> StructField<'a> {
    fn new(field: &'a syn::Field) -> syn::Result<Self> {
        let ident = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new(field.span(), "`JsonClass` requires named fields")
        })?;
        let ty = &field.ty;
        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;

        let role = if attrs.skip.is_some() {
            FieldRole::Skip
        } else if attrs.flatten.is_some() {
            FieldRole::Flatten
        } else if attrs.extra.is_some() || is_extra_fields(ty) {
            FieldRole::Extra
        } else {
            let canonical = attrs
                .name
                .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));
            let mut names = vec![canonical];
            names.extend(attrs.aliases);

            let policy = match (attrs.default, option_inner(ty)) {
                (Some((span, behavior)), _) => FieldPolicy::Defaulted(span, behavior),
                (None, Some(inner)) => FieldPolicy::Optional(inner),
                (None, None) => FieldPolicy::Required,
            };
            FieldRole::Mapped { names, policy }
        };

        Ok(Self { ident, ty, role })
    }

    /// The type that must implement `JsonField` (or `JsonClass` for
    /// flattened members), if any.
    fn bound(&self, json_field_: &TokenStream, json_class_: &TokenStream) -> Option<TokenStream> {
        let ty = self.ty;
        match &self.role {
            FieldRole::Mapped {
                policy: FieldPolicy::Optional(inner),
                ..
            } => Some(quote! { #inner: #json_field_ }),
            FieldRole::Mapped {
                policy: FieldPolicy::Defaulted(_, DefaultBehavior::Trait),
                ..
            } => Some(quote! { #ty: #json_field_ + ::core::default::Default }),
            FieldRole::Mapped { .. } => Some(quote! { #ty: #json_field_ }),
            FieldRole::Flatten => Some(quote! { #ty: #json_class_ }),
            FieldRole::Extra | FieldRole::Skip => None,
        }
    }
}

// -----------------------------------------------------------------------------
// JsonStruct

/// A parsed `#[derive(JsonClass)]` input.
pub(crate) struct JsonStruct<'a> {
    meta: JsonMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> JsonStruct<'a> {
    pub fn from_derive_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => &named.named,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`JsonClass` cannot be derived for tuple structs, use named fields",
                    ));
                }
                Fields::Unit => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`JsonClass` cannot be derived for unit structs",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`JsonClass` cannot be derived for enums, use `JsonOption` for values of several types",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`JsonClass` cannot be derived for unions",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = JsonMeta::new(attrs, &input.ident, &input.generics);

        let fields = fields
            .iter()
            .map(StructField::new)
            .collect::<syn::Result<Vec<_>>>()?;

        let mut extra = fields.iter().filter(|f| matches!(f.role, FieldRole::Extra));
        if let (Some(_), Some(second)) = (extra.next(), extra.next()) {
            return Err(syn::Error::new(
                second.ident.span(),
                "a class can only have one extra fields member",
            ));
        }

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &JsonMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// The member storing extra fields, unless they are discarded.
    pub fn extra_field(&self) -> Option<&StructField<'a>> {
        if self.meta.attrs().discard_extra_fields.is_some() {
            return None;
        }
        self.fields
            .iter()
            .find(|f| matches!(f.role, FieldRole::Extra))
    }

    /// Returns `impl_generics`, `ty_generics` and a full where clause.
    ///
    /// Every member type mentioning a type parameter gets the trait bound
    /// its role needs.
    pub fn split_generics(&self) -> (ImplGenerics<'_>, TypeGenerics<'_>, TokenStream) {
        let meta = &self.meta;
        let generics = meta.generics();

        let mut generic_where_clause = quote! { where };

        if meta.impl_with_generic() {
            generic_where_clause.extend(quote! {
                Self: ::core::default::Default + 'static,
            });
        } else if generics.lifetimes().next().is_some() {
            generic_where_clause.extend(quote! { Self: 'static, });
        }

        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        // Maintain existing where clause bounds, if any.
        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        let type_param_idents = meta.type_param_idents();
        if !type_param_idents.is_empty() {
            let json_field_ = crate::path::json_field_(meta.vc_json_path());
            let json_class_ = crate::path::json_class_(meta.vc_json_path());
            for field in &self.fields {
                if !is_any_ident_in_token_stream(&type_param_idents, field.ty.to_token_stream()) {
                    continue;
                }
                if let Some(bound) = field.bound(&json_field_, &json_class_) {
                    generic_where_clause.extend(quote! { #bound, });
                }
            }
        }

        (impl_generics, ty_generics, generic_where_clause)
    }
}
