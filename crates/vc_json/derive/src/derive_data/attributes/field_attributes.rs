use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, LitStr, Path};

use crate::JSON_ATTRIBUTE_NAME;
use crate::utils::{parse_path_value, set_flag};

/// How a defaulted field gets its fallback value.
pub(crate) enum DefaultBehavior {
    /// `#[json(default)]`, uses `Default::default()`.
    Trait,
    /// `#[json(default = expr)]`.
    Expr(Box<Expr>),
    /// `#[json(default_with = path)]`, calls `path(&self, &raw)`.
    Func(Path),
}

/// Attributes placed on a struct member.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// Canonical JSON name, defaults to the member ident.
    pub name: Option<LitStr>,
    /// Additional names accepted when reading.
    pub aliases: Vec<LitStr>,
    pub default: Option<(Span, DefaultBehavior)>,
    pub flatten: Option<Span>,
    pub extra: Option<Span>,
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(JSON_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
            }
        }
        this.validate()?;
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let path = &meta.path;
        if path.is_ident("name") {
            if self.name.is_some() {
                return Err(meta.error("duplicate attribute"));
            }
            self.name = Some(meta.value()?.parse()?);
        } else if path.is_ident("alias") {
            self.aliases.push(meta.value()?.parse()?);
        } else if path.is_ident("default") {
            let behavior = if meta.input.peek(syn::Token![=]) {
                DefaultBehavior::Expr(Box::new(meta.value()?.parse()?))
            } else {
                DefaultBehavior::Trait
            };
            self.set_default(meta, behavior)?;
        } else if path.is_ident("default_with") {
            let behavior = DefaultBehavior::Func(parse_path_value(meta)?);
            self.set_default(meta, behavior)?;
        } else if path.is_ident("flatten") {
            set_flag(&mut self.flatten, meta)?;
        } else if path.is_ident("extra") {
            set_flag(&mut self.extra, meta)?;
        } else if path.is_ident("skip") {
            set_flag(&mut self.skip, meta)?;
        } else {
            return Err(meta.error(
                "unknown field attribute, expected one of `name`, `alias`, `default`, \
                 `default_with`, `flatten`, `extra` or `skip`",
            ));
        }
        Ok(())
    }

    fn set_default(&mut self, meta: &ParseNestedMeta, behavior: DefaultBehavior) -> syn::Result<()> {
        if self.default.is_some() {
            return Err(meta.error("a field can only have one default"));
        }
        self.default = Some((meta.path.span(), behavior));
        Ok(())
    }

    /// `skip`, `flatten` and `extra` exclude every other attribute.
    fn validate(&self) -> syn::Result<()> {
        let has_mapping = self.name.is_some() || !self.aliases.is_empty() || self.default.is_some();
        let exclusive = [
            (self.skip, "skip"),
            (self.flatten, "flatten"),
            (self.extra, "extra"),
        ];
        for (slot, name) in exclusive {
            let Some(span) = slot else { continue };
            let others = exclusive.iter().filter(|(s, _)| s.is_some()).count() > 1;
            if has_mapping || others {
                return Err(syn::Error::new(
                    span,
                    format!("`{name}` cannot be combined with other `json` attributes"),
                ));
            }
        }
        Ok(())
    }
}
