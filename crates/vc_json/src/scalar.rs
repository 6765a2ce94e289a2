//! Classification of JSON values.
//!
//! The tags produced here are the ones used in error messages, so
//! `5` reads as `int` and `4294967296` as `int64`.

use serde_json::{Number, Value};

/// Returns the JSON type tag of `value`.
///
/// Booleans are split into `false` and `true`. Numbers are reported as
/// the first of `int`, `uint`, `int64`, `uint64`, `float`, `double`
/// that can hold them exactly.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_json::scalar::json_type_name;
///
/// assert_eq!(json_type_name(&json!(null)), "null");
/// assert_eq!(json_type_name(&json!(false)), "false");
/// assert_eq!(json_type_name(&json!(-7)), "int");
/// assert_eq!(json_type_name(&json!(3_000_000_000u32)), "uint");
/// assert_eq!(json_type_name(&json!(0.5)), "float");
/// assert_eq!(json_type_name(&json!(0.1)), "double");
/// ```
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(false) => "false",
        Value::Bool(true) => "true",
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(number) => number_type_name(number),
    }
}

fn number_type_name(number: &Number) -> &'static str {
    if let Some(v) = number.as_i64() {
        if i32::try_from(v).is_ok() {
            "int"
        } else if u32::try_from(v).is_ok() {
            "uint"
        } else {
            "int64"
        }
    } else if number.is_u64() {
        "uint64"
    } else {
        match number.as_f64() {
            Some(v) if f64::from(v as f32) == v => "float",
            _ => "double",
        }
    }
}

/// Reads a JSON integer that fits in `T`.
///
/// Floats and out-of-range integers are rejected.
pub(crate) fn integer<T>(value: &Value) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(v) = number.as_i64() {
        T::try_from(v).ok()
    } else {
        number.as_u64().and_then(|v| T::try_from(v).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_tags() {
        assert_eq!(json_type_name(&json!(0)), "int");
        assert_eq!(json_type_name(&json!(i64::from(i32::MIN))), "int");
        assert_eq!(json_type_name(&json!(u32::MAX)), "uint");
        assert_eq!(json_type_name(&json!(i64::MIN)), "int64");
        assert_eq!(json_type_name(&json!(u64::MAX)), "uint64");
        assert_eq!(json_type_name(&json!(2.5)), "float");
        assert_eq!(json_type_name(&json!(1e300)), "double");
    }

    #[test]
    fn integer_ranges() {
        assert_eq!(integer::<u8>(&json!(255)), Some(255));
        assert_eq!(integer::<u8>(&json!(256)), None);
        assert_eq!(integer::<u8>(&json!(-1)), None);
        assert_eq!(integer::<i64>(&json!(u64::MAX)), None);
        assert_eq!(integer::<u64>(&json!(u64::MAX)), Some(u64::MAX));
        assert_eq!(integer::<i32>(&json!(1.0)), None);
        assert_eq!(integer::<i32>(&json!("1")), None);
    }
}
