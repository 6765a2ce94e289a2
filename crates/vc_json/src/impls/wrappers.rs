use std::borrow::Cow;

use serde_json::Value;

use crate::{FieldKind, JsonError, JsonField};

/// `null` reads as `None`, everything else is read as `T`.
///
/// As a class member an `Option<T>` field is optional: absent or
/// unreadable values leave it `None` and `None` is not written.
impl<T: JsonField> JsonField for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("Option<{}>", T::type_name()))
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        value.is_null() || T::matches(value)
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        match value {
            Value::Null => Ok(None),
            _ => T::from_json(value).map(Some),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Some(v) => v.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: JsonField> JsonField for Box<T> {
    const KIND: FieldKind = T::KIND;

    #[inline]
    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        T::matches(value)
    }

    #[inline]
    fn from_json(value: &Value) -> Result<Self, JsonError> {
        T::from_json(value).map(Box::new)
    }

    #[inline]
    fn to_json(&self) -> Value {
        T::to_json(self)
    }
}

impl JsonField for Value {
    const KIND: FieldKind = FieldKind::Any;

    #[inline]
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Value")
    }

    #[inline]
    fn matches(_: &Value) -> bool {
        true
    }

    #[inline]
    fn from_json(value: &Value) -> Result<Self, JsonError> {
        Ok(value.clone())
    }

    #[inline]
    fn to_json(&self) -> Value {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::{FieldKind, JsonField};
    use serde_json::{Value, json};

    #[test]
    fn option_maps_null() {
        let values = Vec::<Option<i32>>::from_json(&json!([1, null, 3])).unwrap();
        assert_eq!(values, vec![Some(1), None, Some(3)]);
        assert_eq!(values.to_json(), json!([1, null, 3]));
        assert!(Option::<i32>::from_json(&json!("x")).is_err());
        assert_eq!(<Option<Vec<i32>>>::KIND, FieldKind::Array);
    }

    #[test]
    fn box_is_transparent() {
        let boxed = Box::<u16>::from_json(&json!(7)).unwrap();
        assert_eq!(*boxed, 7);
        assert_eq!(boxed.to_json(), json!(7));
        assert_eq!(Box::<u16>::type_name(), "u16");
    }

    #[test]
    fn value_accepts_anything() {
        let raw = json!({ "nested": [1, "two", null] });
        assert!(Value::matches(&raw));
        assert_eq!(Value::from_json(&raw).unwrap(), raw);
        assert_eq!(Value::KIND, FieldKind::Any);
    }
}
