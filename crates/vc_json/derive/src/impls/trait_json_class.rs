use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::{DefaultBehavior, FieldPolicy, FieldRole, JsonStruct, StructField};

/// Generate the `JsonClass` impl, whose schema is built lazily from the
/// struct members in declaration order.
pub(crate) fn impl_trait_json_class(json_struct: &JsonStruct) -> TokenStream {
    let meta = json_struct.meta();
    let vc_json_path = meta.vc_json_path();
    let json_class_ = crate::path::json_class_(vc_json_path);
    let class_schema_ = crate::path::class_schema_(vc_json_path);

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = json_struct.split_generics();

    let type_name = meta.type_name_expr();
    let attrs = meta.attrs();
    let pre_deserialize = &attrs.pre_deserialize;
    let post_deserialize = &attrs.post_deserialize;
    let pre_serialize = &attrs.pre_serialize;
    let post_serialize = &attrs.post_serialize;

    let fields = json_struct
        .fields()
        .iter()
        .map(|field| get_field_tokens(json_struct, field));

    let keep_extra_fields = match json_struct.extra_field() {
        Some(StructField { ident, .. }) => quote! {
            .keep_extra_fields(|this| &this.#ident, |this| &mut this.#ident)
        },
        None => crate::utils::empty(),
    };

    let builder = quote! {
        #class_schema_::<Self>::builder(#type_name)
            #( .deserialize_action(#pre_deserialize) )*
            #( .serialize_action(#pre_serialize) )*
            #( #fields )*
            #( .deserialize_action(#post_deserialize) )*
            #( .serialize_action(#post_serialize) )*
            #keep_extra_fields
            .build()
    };

    let cell = if meta.generics().params.is_empty() {
        let non_generic_schema_cell_ = crate::path::non_generic_schema_cell_(vc_json_path);
        quote! {
            static CELL: #non_generic_schema_cell_<#real_ident> = #non_generic_schema_cell_::new();
            CELL.get_or_init(|| #builder)
        }
    } else {
        let generic_schema_cell_ = crate::path::generic_schema_cell_(vc_json_path);
        quote! {
            static CELL: #generic_schema_cell_ = #generic_schema_cell_::new();
            CELL.get_or_insert::<Self>(|| #builder)
        }
    };

    quote! {
        impl #impl_generics #json_class_ for #real_ident #ty_generics #where_clause {
            fn schema() -> &'static #class_schema_<Self> {
                #cell
            }
        }
    }
}

/// One builder call for a member, empty for skipped and extra members.
fn get_field_tokens(json_struct: &JsonStruct, field: &StructField) -> TokenStream {
    let vc_json_path = json_struct.meta().vc_json_path();
    let field_descriptor_ = crate::path::field_descriptor_(vc_json_path);
    let default_ = crate::path::default_();

    let StructField { ident, ty, role } = field;

    match role {
        FieldRole::Skip | FieldRole::Extra => crate::utils::empty(),
        FieldRole::Flatten => quote! {
            .flatten::<#ty>(|this| &this.#ident, |this| &mut this.#ident)
        },
        FieldRole::Mapped { names, policy } => {
            let names = quote! { &[#(#names),*] };
            match policy {
                FieldPolicy::Required => quote! {
                    .field(#field_descriptor_::<Self>::required::<#ty>(
                        #names,
                        |this| &this.#ident,
                        |this| &mut this.#ident,
                    ))
                },
                FieldPolicy::Optional(inner) => quote! {
                    .field(#field_descriptor_::<Self>::optional::<#inner>(
                        #names,
                        |this| &this.#ident,
                        |this| &mut this.#ident,
                    ))
                },
                FieldPolicy::Defaulted(span, behavior) => {
                    let default = match behavior {
                        DefaultBehavior::Trait => quote_spanned! { *span =>
                            |_, _| <#ty as #default_>::default()
                        },
                        DefaultBehavior::Expr(expr) => quote_spanned! { *span =>
                            |_, _| #expr
                        },
                        DefaultBehavior::Func(path) => quote_spanned! { *span =>
                            #path
                        },
                    };
                    quote! {
                        .field(#field_descriptor_::<Self>::defaulted::<#ty>(
                            #names,
                            |this| &this.#ident,
                            |this| &mut this.#ident,
                            #default,
                        ))
                    }
                }
            }
        }
    }
}
