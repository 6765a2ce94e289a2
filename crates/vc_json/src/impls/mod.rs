//! [`JsonField`](crate::JsonField) implementations for foreign types.
//!
//! ## Implemented Menu
//!
//! - scalar:
//!     - `bool`, `String`
//!     - `i8`-`i64`, `u8`-`u64`, `isize`, `usize`: integers within range only
//!     - `f32`, `f64`: any JSON number
//! - array: `Vec<T>`
//! - map: `BTreeMap<String, T>`, `HashMap<String, T, S>`
//! - transparent: `Option<T>` (`null` is `None`), `Box<T>`
//! - any: `serde_json::Value`
//!
//! Derived classes and [`JsonOption`](crate::JsonOption) implement the
//! trait in their own modules.

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod primitives;
mod wrappers;

// -----------------------------------------------------------------------------
// Exports

pub use collections::StringKeyedMap;
