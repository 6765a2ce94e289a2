use std::borrow::Cow;

use serde_json::Value;

use crate::scalar::integer;
use crate::{FieldKind, JsonError, JsonField};

macro_rules! impl_json_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl JsonField for $ty {
            const KIND: FieldKind = FieldKind::Scalar;

            #[inline]
            fn type_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($ty))
            }

            #[inline]
            fn matches(value: &Value) -> bool {
                integer::<$ty>(value).is_some()
            }

            fn from_json(value: &Value) -> Result<Self, JsonError> {
                integer::<$ty>(value).ok_or_else(|| JsonError::type_mismatch(value, Self::type_name()))
            }

            #[inline]
            fn to_json(&self) -> Value {
                Value::from(*self)
            }
        }
    )*};
}

impl_json_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl JsonField for f64 {
    const KIND: FieldKind = FieldKind::Scalar;

    #[inline]
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("f64")
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        value.is_number()
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        value
            .as_f64()
            .ok_or_else(|| JsonError::type_mismatch(value, Self::type_name()))
    }

    /// Non-finite values have no JSON form and are written as `null`.
    #[inline]
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl JsonField for f32 {
    const KIND: FieldKind = FieldKind::Scalar;

    #[inline]
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("f32")
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        value.is_number()
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| JsonError::type_mismatch(value, Self::type_name()))
    }

    #[inline]
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl JsonField for bool {
    const KIND: FieldKind = FieldKind::Scalar;

    #[inline]
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        value.is_boolean()
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        value
            .as_bool()
            .ok_or_else(|| JsonError::type_mismatch(value, Self::type_name()))
    }

    #[inline]
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl JsonField for String {
    const KIND: FieldKind = FieldKind::Scalar;

    #[inline]
    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("String")
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        value.is_string()
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(JsonError::type_mismatch(value, Self::type_name())),
        }
    }

    #[inline]
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}
