use serde_json::Value;

use crate::JsonObject;

/// Members of an incoming object that no declared field consumed.
///
/// A class that has a field of this type keeps unknown keys across a
/// read/write cycle: they are captured on deserialize and written back
/// before the declared fields on serialize. Mark the class
/// `#[json(discard_extra_fields)]` to opt out.
///
/// # Examples
///
/// ```
/// use vc_json::{ExtraFields, JsonClass};
///
/// #[derive(JsonClass, Default)]
/// struct Window {
///     width: u32,
///     rest: ExtraFields,
/// }
///
/// let window: Window = vc_json::read_from_str(r#"{"width": 3, "theme": "dark"}"#).unwrap();
/// assert_eq!(window.rest.len(), 1);
/// assert_eq!(window.rest.get("theme").unwrap(), "dark");
///
/// let text = vc_json::write_to_string(&window, vc_json::Format::Compact);
/// assert_eq!(text, r#"{"theme":"dark","width":3}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraFields {
    fields: JsonObject,
}

impl ExtraFields {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Adds a member that will be written with the object.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn as_object(&self) -> &JsonObject {
        &self.fields
    }

    #[inline]
    pub fn into_object(self) -> JsonObject {
        self.fields
    }
}

impl From<JsonObject> for ExtraFields {
    #[inline]
    fn from(fields: JsonObject) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order() {
        let mut extra = ExtraFields::new();
        extra.insert("z", json!(1));
        extra.insert("a", json!(2));
        let keys: Vec<&str> = extra.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a"]);

        assert_eq!(extra.remove("z"), Some(json!(1)));
        assert_eq!(extra.len(), 1);
        extra.clear();
        assert!(extra.is_empty());
    }
}
