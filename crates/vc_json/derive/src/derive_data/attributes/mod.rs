//! Provide some tools for parsing `#[json(...)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::{DefaultBehavior, FieldAttributes};
pub(crate) use type_attributes::TypeAttributes;
