#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `vc_json` in doc testing.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `vc_json` can be used as an alias for `crate`.
extern crate self as vc_json;

// -----------------------------------------------------------------------------
// Modules

mod class;
mod error;
mod extra;
mod field;
mod hash;
mod impls;
mod union;

pub mod dispatch;
pub mod document;
pub mod registry;
pub mod scalar;
pub mod schema;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use vc_json_derive as derive;

pub use derive::JsonClass;

pub use class::JsonClass;
pub use document::{Format, read_from_file, read_from_file_into, read_from_str, read_from_str_into};
pub use document::{write_to_file, write_to_string};
pub use error::{JsonError, JsonErrorKind, PathSegment};
pub use extra::ExtraFields;
pub use field::{FieldKind, JsonField};
pub use impls::StringKeyedMap;
pub use union::{Candidates, JsonOption};

pub use serde_json::Value;

/// A JSON object, with members in insertion order.
pub type JsonObject = serde_json::Map<String, Value>;
