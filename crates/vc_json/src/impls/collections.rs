use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

use crate::{FieldKind, JsonError, JsonField};

/// The map type used for string-keyed fields.
///
/// Any `HashMap<String, T, S>` works as well; this alias keeps keys in
/// sorted order, which makes the written JSON deterministic.
pub type StringKeyedMap<T> = BTreeMap<String, T>;

// -----------------------------------------------------------------------------
// Vec

impl<T: JsonField> JsonField for Vec<T> {
    const KIND: FieldKind = FieldKind::Array;

    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("Vec<{}>", T::type_name()))
    }

    fn matches(value: &Value) -> bool {
        value
            .as_array()
            .is_some_and(|items| items.iter().all(T::matches))
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        let Value::Array(items) = value else {
            return Err(JsonError::type_mismatch(value, Self::type_name()));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| T::from_json(item).map_err(|err| err.within_index(index)))
            .collect()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(T::to_json).collect())
    }
}

// -----------------------------------------------------------------------------
// Maps

fn map_matches<T: JsonField>(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.values().all(T::matches))
}

fn map_entries<'a, T: JsonField>(
    object: &'a Map<String, Value>,
) -> impl Iterator<Item = Result<(String, T), JsonError>> + 'a {
    object.iter().map(|(key, item)| match T::from_json(item) {
        Ok(v) => Ok((key.clone(), v)),
        Err(err) => Err(err.within_key(key.as_str())),
    })
}

impl<T: JsonField> JsonField for BTreeMap<String, T> {
    const KIND: FieldKind = FieldKind::Map;

    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("BTreeMap<String, {}>", T::type_name()))
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        map_matches::<T>(value)
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        match value {
            Value::Object(object) => map_entries(object).collect(),
            _ => Err(JsonError::type_mismatch(value, Self::type_name())),
        }
    }

    fn to_json(&self) -> Value {
        Value::Object(self.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
    }
}

impl<T: JsonField, S: BuildHasher + Default> JsonField for HashMap<String, T, S> {
    const KIND: FieldKind = FieldKind::Map;

    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("HashMap<String, {}>", T::type_name()))
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        map_matches::<T>(value)
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        match value {
            Value::Object(object) => map_entries(object).collect(),
            _ => Err(JsonError::type_mismatch(value, Self::type_name())),
        }
    }

    fn to_json(&self) -> Value {
        Value::Object(self.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vector_errors_carry_the_index() {
        let err = Vec::<i32>::from_json(&json!([1, 2, "three"])).unwrap_err();
        assert_eq!(err.path_string(), "[2]");
        assert!(err.is_type_mismatch());

        assert!(Vec::<i32>::matches(&json!([])));
        assert!(!Vec::<i32>::matches(&json!([1, 2.5])));
        assert!(!Vec::<i32>::matches(&json!({})));
    }

    #[test]
    fn nested_vectors() {
        let value = json!([[1, 2], [], [3]]);
        let nested = Vec::<Vec<u8>>::from_json(&value).unwrap();
        assert_eq!(nested, vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(nested.to_json(), value);
        assert_eq!(Vec::<Vec<u8>>::type_name(), "Vec<Vec<u8>>");
    }

    #[test]
    fn map_round_trip() {
        let value = json!({ "a": 1, "b": 2 });
        let map = StringKeyedMap::<i32>::from_json(&value).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["b"], 2);
        assert_eq!(map.to_json(), value);

        let map = HashMap::<String, i32>::from_json(&value).unwrap();
        assert_eq!(map["a"], 1);
        assert_eq!(map.to_json()["b"], json!(2));
    }

    #[test]
    fn map_errors_carry_the_key() {
        let err = StringKeyedMap::<i32>::from_json(&json!({ "a": 1, "left": "x" })).unwrap_err();
        assert_eq!(err.path_string(), "[left]");

        let err = StringKeyedMap::<i32>::from_json(&json!([1])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value was an unexpected type (array), type expected was: BTreeMap<String, i32>"
        );
    }
}
