//! See following macros:
//!
//! - [`JsonClass`]
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static JSON_ATTRIBUTE_NAME: &str = "json";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # JSON Class Derivation
///
/// `#[derive(JsonClass)]` implements the following traits for a struct with named fields:
///
/// - `JsonField`
/// - `JsonClass`
///
/// The type must also implement `Default`, which is the starting point of every read.
///
/// Tuple structs, unit structs, enums and unions are rejected.
///
/// ## Member Mapping
///
/// Every member is mapped to a JSON member with the same name, in declaration order.
///
/// | Member type / attribute | Behavior |
/// |---|---|
/// | `T` | Required. A missing or mismatched member is an error. |
/// | `Option<T>` | Optional. Missing or mismatched reads as `None`; `None` is not written. |
/// | `#[json(default)]` | Defaulted with `Default::default()`. |
/// | `#[json(default = expr)]` | Defaulted with `expr`, evaluated on every fallback. |
/// | `#[json(default_with = path)]` | Defaulted with `path(&self, &raw)`. |
///
/// A defaulted value is computed after the preceding members were read,
/// so `default_with` functions can look at them.
///
/// ```rust, ignore
/// #[derive(JsonClass, Default)]
/// struct Window {
///     #[json(name = "Width")]
///     width: u32,
///     #[json(name = "Height", default_with = Self::square)]
///     height: u32,
///     title: Option<String>,
/// }
///
/// impl Window {
///     fn square(&self, _: &Value) -> u32 {
///         self.width
///     }
/// }
/// ```
///
/// ### Names
///
/// - `#[json(name = "X")]`: the canonical name, used for writing and tried first when reading.
/// - `#[json(alias = "Y")]`: an additional name only used when reading. Can be repeated.
///
/// ### Composition
///
/// - `#[json(flatten)]`: the member is a `JsonClass` whose fields live in the same JSON object.
/// - `#[json(skip)]`: the member is not mapped and keeps its value on read.
///
/// ### Extra Fields
///
/// A member of type `ExtraFields` (or marked `#[json(extra)]`) receives every
/// member no field consumed, and they are written back on serialization.
/// Use `#[json(discard_extra_fields)]` on the type to drop them instead.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(JsonClass, Default)]
/// #[json(auto_register)]
/// #[json(post_deserialize = Self::validate, pre_serialize = Self::stamp)]
/// struct Foo { /* ... */ }
///
/// impl Foo {
///     fn validate(&mut self, raw: &Value) -> Result<(), JsonError> { /* ... */ }
///     fn stamp(&self, object: &mut JsonObject) { /* ... */ }
/// }
/// ```
///
/// - `pre_deserialize`/`post_deserialize`: run before the first or after the last field is read.
///   An error aborts the read.
/// - `pre_serialize`/`post_serialize`: run before the first or after the last field is written.
/// - `auto_register`: add the type to `SchemaRegistry::auto_register`.
///   Ignored for generic types. Requires the `auto_register` feature.
/// - `discard_extra_fields`: see above.
///
/// ## Generics
///
/// Generic structs are supported. Bounds are added for member types
/// that mention a type parameter, and every instantiation gets its own schema.
#[proc_macro_derive(JsonClass, attributes(json))]
pub fn derive_json_class(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::JsonStruct::from_derive_input(&ast) {
        Ok(json_struct) => impls::impl_json_class(&json_struct).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
