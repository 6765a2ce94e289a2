//! Per-field read and write against a JSON object.
//!
//! Every schema entry created for a declared field ends up here. The
//! functions are public so hand-written schemas and deserialize actions
//! can reuse the same lookup rules.

use std::fmt;

use serde_json::Value;

use crate::{JsonError, JsonField, JsonObject};

// -----------------------------------------------------------------------------
// Policy

/// What happens when a field cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// The failure aborts the whole read.
    Required,
    /// The field is left empty and not written back.
    Optional,
    /// The field is filled with its default value.
    Defaulted,
}

impl Policy {
    /// Returns `true` if failures fall back instead of propagating.
    #[inline]
    pub const fn is_lenient(self) -> bool {
        !matches!(self, Self::Required)
    }
}

// -----------------------------------------------------------------------------
// FieldNames

/// The candidate JSON names of a field.
///
/// The first name is canonical and is the only one written; all of them
/// are tried in order when reading.
///
/// # Examples
///
/// ```
/// use vc_json::dispatch::FieldNames;
///
/// let names = FieldNames::new(&["Color", "Colour"]);
/// assert_eq!(names.canonical(), "Color");
/// assert_eq!(names.to_string(), "(Color or Colour)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldNames(&'static [&'static str]);

impl FieldNames {
    /// # Panics
    ///
    /// Panics if `names` is empty.
    pub const fn new(names: &'static [&'static str]) -> Self {
        assert!(!names.is_empty(), "a field needs at least one json name");
        Self(names)
    }

    #[inline]
    pub const fn canonical(&self) -> &'static str {
        self.0[0]
    }

    /// Names accepted on read besides the canonical one.
    #[inline]
    pub fn aliases(&self) -> &'static [&'static str] {
        &self.0[1..]
    }

    #[inline]
    pub const fn all(&self) -> &'static [&'static str] {
        self.0
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name)
    }

    /// Returns the first candidate present in `object` with its value.
    pub fn locate<'v>(&self, object: &'v JsonObject) -> Option<(&'static str, &'v Value)> {
        self.0
            .iter()
            .find_map(|&name| object.get(name).map(|value| (name, value)))
    }
}

impl fmt::Display for FieldNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [name] => f.write_str(name),
            names => write!(f, "({})", names.join(" or ")),
        }
    }
}

// -----------------------------------------------------------------------------
// Lookup

/// The outcome of a lenient read.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<F> {
    Found(F),
    /// The field was absent or unreadable and the caller should use its
    /// fallback.
    Fallback,
}

impl<F> Lookup<F> {
    #[inline]
    pub fn found(self) -> Option<F> {
        match self {
            Self::Found(v) => Some(v),
            Self::Fallback => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Operations

/// Reads a field from `object` under the first present candidate name.
///
/// With [`Policy::Required`] any failure is returned with the field name
/// prepended to its path. The lenient policies turn every failure, nested
/// ones included, into [`Lookup::Fallback`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_json::dispatch::{self, FieldNames, Lookup, Policy};
///
/// let object = json!({ "Colour": 3 });
/// let object = object.as_object().unwrap();
/// let names = FieldNames::new(&["Color", "Colour"]);
///
/// let found = dispatch::read_field::<i32>(object, &names, Policy::Required).unwrap();
/// assert_eq!(found, Lookup::Found(3));
///
/// let err = dispatch::read_field::<i32>(object, &FieldNames::new(&["Size"]), Policy::Required)
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Size not found");
///
/// let fallback = dispatch::read_field::<String>(object, &names, Policy::Defaulted).unwrap();
/// assert_eq!(fallback, Lookup::Fallback);
/// ```
pub fn read_field<F: JsonField>(
    object: &JsonObject,
    names: &FieldNames,
    policy: Policy,
) -> Result<Lookup<F>, JsonError> {
    let result = match names.locate(object) {
        Some((name, value)) => F::from_json(value).map_err(|err| err.within_field(name)),
        None => Err(JsonError::not_found().within_field(names.to_string())),
    };

    match result {
        Ok(v) => Ok(Lookup::Found(v)),
        Err(err) if policy.is_lenient() => {
            log::trace!("{err}; using the {policy:?} fallback");
            Ok(Lookup::Fallback)
        }
        Err(err) => Err(err),
    }
}

/// Writes `value` under the canonical name, replacing an existing member.
#[inline]
pub fn write_field<F: JsonField>(object: &mut JsonObject, names: &FieldNames, value: &F) {
    object.insert(names.canonical().to_owned(), value.to_json());
}

/// Returns `true` if reading the field with `policy` would not fail.
pub fn field_matches<F: JsonField>(object: &JsonObject, names: &FieldNames, policy: Policy) -> bool {
    policy.is_lenient() || names.locate(object).is_some_and(|(_, value)| F::matches(value))
}

/// Removes every candidate name of a consumed field.
pub fn consume(remaining: Option<&mut JsonObject>, names: &FieldNames) {
    if let Some(remaining) = remaining {
        for name in names.all() {
            remaining.shift_remove(*name);
        }
    }
}

/// Returns the object a class is read from.
pub fn expect_object<'v>(value: &'v Value, type_name: &str) -> Result<&'v JsonObject, JsonError> {
    match value {
        Value::Object(object) => Ok(object),
        _ => Err(JsonError::type_mismatch(value, type_name.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(object) => object,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn first_present_name_wins() {
        let obj = object(json!({ "b": 2, "a": 1 }));
        let names = FieldNames::new(&["a", "b"]);
        let value = read_field::<i32>(&obj, &names, Policy::Required).unwrap();
        assert_eq!(value.found(), Some(1));
    }

    #[test]
    fn missing_names_are_listed() {
        let obj = object(json!({}));
        let names = FieldNames::new(&["A", "B", "C"]);
        let err = read_field::<i32>(&obj, &names, Policy::Required).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "(A or B or C) not found");
    }

    #[test]
    fn mismatch_names_the_matched_key() {
        let obj = object(json!({ "Colour": "red" }));
        let names = FieldNames::new(&["Color", "Colour"]);
        let err = read_field::<u8>(&obj, &names, Policy::Required).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Colour was an unexpected type (string), type expected was: u8"
        );
    }

    #[test]
    fn lenient_policies_swallow_nested_failures() {
        let obj = object(json!({ "v": [1, "x"] }));
        let names = FieldNames::new(&["v"]);
        for policy in [Policy::Optional, Policy::Defaulted] {
            let lookup = read_field::<Vec<i32>>(&obj, &names, policy).unwrap();
            assert_eq!(lookup, Lookup::Fallback);
        }
        let err = read_field::<Vec<i32>>(&obj, &names, Policy::Required).unwrap_err();
        assert_eq!(err.path_string(), "v[1]");
    }

    #[test]
    fn match_and_consume() {
        let obj = object(json!({ "x": 1, "y": "s" }));
        assert!(field_matches::<i32>(&obj, &FieldNames::new(&["x"]), Policy::Required));
        assert!(!field_matches::<i32>(&obj, &FieldNames::new(&["y"]), Policy::Required));
        assert!(field_matches::<i32>(&obj, &FieldNames::new(&["z"]), Policy::Optional));

        let mut remaining = obj.clone();
        consume(Some(&mut remaining), &FieldNames::new(&["x", "y"]));
        assert!(remaining.is_empty());
    }

    #[test]
    fn write_uses_canonical_name() {
        let mut obj = JsonObject::new();
        write_field(&mut obj, &FieldNames::new(&["Color", "Colour"]), &7_i32);
        assert_eq!(Value::Object(obj), json!({ "Color": 7 }));
    }
}
