use proc_macro2::{Span, TokenStream};
use syn::meta::ParseNestedMeta;
use syn::{GenericArgument, Ident, LitStr, Path, PathArguments, Type};

/// An empty token stream.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Records a flag attribute such as `skip`, rejecting duplicates.
pub(crate) fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *slot = Some(meta.path.require_ident()?.span());
    Ok(())
}

/// Parses `key = path` or `key = "path"`.
pub(crate) fn parse_path_value(meta: &ParseNestedMeta) -> syn::Result<Path> {
    let input = meta.value()?;
    if input.peek(LitStr) {
        input.parse::<LitStr>()?.parse()
    } else {
        input.parse()
    }
}

/// Returns the last segment of a plain path type, like `Option` in
/// `std::option::Option<T>`.
fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        _ => None,
    }
}

/// Returns `T` if `ty` is `Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Returns `true` if `ty` names `ExtraFields`.
pub(crate) fn is_extra_fields(ty: &Type) -> bool {
    last_segment(ty)
        .is_some_and(|segment| segment.ident == "ExtraFields" && segment.arguments.is_none())
}

/// Do any of the identifiers in `idents` appear in `token_stream`?
pub(crate) fn is_any_ident_in_token_stream(idents: &[Ident], token_stream: TokenStream) -> bool {
    for token_tree in token_stream {
        match token_tree {
            proc_macro2::TokenTree::Ident(ident) => {
                if idents.contains(&ident) {
                    return true;
                }
            }
            proc_macro2::TokenTree::Group(group) => {
                if is_any_ident_in_token_stream(idents, group.stream()) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
