//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod json_meta;
mod json_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{DefaultBehavior, FieldAttributes, TypeAttributes};

pub(crate) use json_meta::JsonMeta;
pub(crate) use json_struct::{FieldPolicy, FieldRole, JsonStruct, StructField};
