use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::JsonError;

/// The shape a field takes in JSON, fixed once per field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Booleans, numbers and strings.
    Scalar,
    /// A nested [`JsonClass`](crate::JsonClass).
    Object,
    /// A vector of values.
    Array,
    /// A string-keyed map of values.
    Map,
    /// A [`JsonOption`](crate::JsonOption).
    Union,
    /// An untyped [`Value`].
    Any,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Object => "object",
            Self::Array => "array",
            Self::Map => "map",
            Self::Union => "union",
            Self::Any => "any",
        })
    }
}

/// A type that can be stored in a field of a [`JsonClass`](crate::JsonClass).
///
/// Implemented for `bool`, the integer and float primitives, [`String`],
/// [`Vec`], string-keyed maps, [`Option`], [`Box`], [`Value`],
/// [`JsonOption`](crate::JsonOption) and every derived class.
///
/// [`matches`](JsonField::matches) is a structural check: it returns
/// `true` whenever [`from_json`](JsonField::from_json) would succeed.
/// For scalars, collections and unions the converse holds as well. A
/// class only checks its required fields and does not run its
/// deserialize actions, so an action may still reject a matching value.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_json::JsonField;
///
/// assert!(u8::matches(&json!(200)));
/// assert!(!u8::matches(&json!(300)));
/// assert!(f32::matches(&json!(3)));
///
/// let values = Vec::<i32>::from_json(&json!([1, 2, 3])).unwrap();
/// assert_eq!(values.to_json(), json!([1, 2, 3]));
/// ```
pub trait JsonField: Sized {
    const KIND: FieldKind;

    /// A readable name of the type, used in error messages.
    fn type_name() -> Cow<'static, str>;

    /// Returns `true` if `value` can be read as `Self`.
    fn matches(value: &Value) -> bool;

    fn from_json(value: &Value) -> Result<Self, JsonError>;

    fn to_json(&self) -> Value;
}
