//! Fields that accept one of several types.
//!
//! A [`JsonOption`] keeps the raw JSON value it was read from and answers
//! type queries lazily, so a value written back is byte-for-byte the
//! numeral or string that was read.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::{FieldKind, JsonError, JsonField};

// -----------------------------------------------------------------------------
// Candidates

/// An ordered list of candidate types, implemented for tuples of up to
/// 8 [`JsonField`] types.
///
/// The first candidate supplies the default value; earlier candidates win
/// when several accept a value.
pub trait Candidates: 'static {
    const LEN: usize;

    /// The candidates as a tuple, e.g. `(i32, f32)`.
    fn type_name() -> Cow<'static, str>;

    /// The first candidate's default value, encoded.
    fn default_value() -> Value;

    /// Returns the index of the first candidate accepting `value`.
    fn position(value: &Value) -> Option<usize>;

    /// Re-encodes `value` through the first candidate that accepts it.
    fn coerce(value: &Value) -> Option<Value>;
}

macro_rules! impl_candidates {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first, $($rest),*> Candidates for ($first, $($rest,)*)
        where
            $first: JsonField + Default + 'static,
            $($rest: JsonField + 'static,)*
        {
            const LEN: usize = [stringify!($first) $(, stringify!($rest))*].len();

            fn type_name() -> Cow<'static, str> {
                let names = [<$first as JsonField>::type_name() $(, <$rest as JsonField>::type_name())*];
                Cow::Owned(format!("({})", names.join(", ")))
            }

            #[inline]
            fn default_value() -> Value {
                <$first as Default>::default().to_json()
            }

            fn position(value: &Value) -> Option<usize> {
                let checks: &[fn(&Value) -> bool] =
                    &[<$first as JsonField>::matches $(, <$rest as JsonField>::matches)*];
                checks.iter().position(|check| check(value))
            }

            fn coerce(value: &Value) -> Option<Value> {
                let coercions: &[fn(&Value) -> Option<Value>] =
                    &[recode::<$first> $(, recode::<$rest>)*];
                coercions.iter().find_map(|coerce| coerce(value))
            }
        }
    };
}

fn recode<T: JsonField>(value: &Value) -> Option<Value> {
    T::from_json(value).ok().map(|v| v.to_json())
}

impl_candidates!(T0);
impl_candidates!(T0, T1);
impl_candidates!(T0, T1, T2);
impl_candidates!(T0, T1, T2, T3);
impl_candidates!(T0, T1, T2, T3, T4);
impl_candidates!(T0, T1, T2, T3, T4, T5);
impl_candidates!(T0, T1, T2, T3, T4, T5, T6);
impl_candidates!(T0, T1, T2, T3, T4, T5, T6, T7);

// -----------------------------------------------------------------------------
// JsonOption

/// A field holding a value of one of the candidate types `L`.
///
/// Reading tries the candidates in order and stores the raw value of the
/// first match. Writing emits the stored value unchanged.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_json::{JsonField, JsonOption};
///
/// let five = JsonOption::<(i32, f32)>::from_json(&json!(5)).unwrap();
/// assert!(five.is::<i32>());
/// assert_eq!(five.get::<i32>(), Some(5));
///
/// let half = JsonOption::<(i32, f32)>::from_json(&json!(5.5)).unwrap();
/// assert!(!half.is::<i32>());
/// assert!(half.is::<f32>());
/// assert_eq!(half.to_json(), json!(5.5));
///
/// assert!(JsonOption::<(i32, f32)>::from_json(&json!("five")).is_err());
/// ```
pub struct JsonOption<L: Candidates> {
    value: Value,
    _marker: PhantomData<fn() -> L>,
}

impl<L: Candidates> JsonOption<L> {
    /// Wraps `value` if some candidate accepts it.
    pub fn from_value(value: Value) -> Result<Self, JsonError> {
        match L::position(&value) {
            Some(_) => Ok(Self::from_raw(value)),
            None => Err(JsonError::union_no_match(&value, Self::type_name())),
        }
    }

    #[inline]
    fn from_raw(value: Value) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the stored value matches `T`.
    ///
    /// See [`JsonField::matches`] for what a class checks.
    #[inline]
    pub fn is<T: JsonField>(&self) -> bool {
        T::matches(&self.value)
    }

    /// Reads the stored value as `T`.
    #[inline]
    pub fn get<T: JsonField>(&self) -> Option<T> {
        T::from_json(&self.value).ok()
    }

    /// Stores `value`, converted to the first candidate that accepts it.
    ///
    /// Setting `2_i32` on a `JsonOption<(f64, i32)>` stores the float
    /// `2.0`. Nothing is stored if no candidate accepts the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use vc_json::JsonOption;
    ///
    /// let mut v = JsonOption::<(f64, i32)>::default();
    /// v.set(2_i32).unwrap();
    /// assert_eq!(v.raw(), &json!(2.0));
    ///
    /// assert!(v.set(String::from("x")).is_err());
    /// assert_eq!(v.raw(), &json!(2.0));
    /// ```
    pub fn set<T: JsonField>(&mut self, value: T) -> Result<(), JsonError> {
        let encoded = value.to_json();
        match L::coerce(&encoded) {
            Some(coerced) => {
                self.value = coerced;
                Ok(())
            }
            None => Err(JsonError::union_no_match(&encoded, Self::type_name())),
        }
    }

    /// Returns the index of the first candidate accepting the stored value.
    #[inline]
    pub fn matched_index(&self) -> Option<usize> {
        L::position(&self.value)
    }

    #[inline]
    pub fn raw(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn into_raw(self) -> Value {
        self.value
    }
}

impl<L: Candidates> Default for JsonOption<L> {
    #[inline]
    fn default() -> Self {
        Self::from_raw(L::default_value())
    }
}

impl<L: Candidates> Clone for JsonOption<L> {
    #[inline]
    fn clone(&self) -> Self {
        Self::from_raw(self.value.clone())
    }
}

impl<L: Candidates> PartialEq for JsonOption<L> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<L: Candidates> fmt::Debug for JsonOption<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonOption").field(&self.value).finish()
    }
}

impl<L: Candidates> JsonField for JsonOption<L> {
    const KIND: FieldKind = FieldKind::Union;

    fn type_name() -> Cow<'static, str> {
        Cow::Owned(format!("JsonOption<{}>", L::type_name()))
    }

    #[inline]
    fn matches(value: &Value) -> bool {
        L::position(value).is_some()
    }

    fn from_json(value: &Value) -> Result<Self, JsonError> {
        match L::position(value) {
            Some(_) => Ok(Self::from_raw(value.clone())),
            None => Err(JsonError::union_no_match(value, Self::type_name())),
        }
    }

    #[inline]
    fn to_json(&self) -> Value {
        self.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Number = JsonOption<(i32, f32)>;

    #[test]
    fn declared_order_wins() {
        let v = JsonOption::<(f64, i32)>::from_json(&json!(3)).unwrap();
        assert_eq!(v.matched_index(), Some(0));
        assert!(v.is::<i32>());

        let v = Number::from_json(&json!(3)).unwrap();
        assert_eq!(v.matched_index(), Some(0));
    }

    #[test]
    fn literal_passes_through() {
        for text in ["5", "5.5", "-0.25", "12345678901"] {
            let raw: Value = serde_json::from_str(text).unwrap();
            let Ok(v) = JsonOption::<(i64, f64)>::from_json(&raw) else {
                panic!("{text} rejected");
            };
            assert_eq!(serde_json::to_string(&v.to_json()).unwrap(), text);
        }
    }

    #[test]
    fn no_match_names_the_union() {
        let err = Number::from_json(&json!("x")).unwrap_err();
        assert!(err.is_union_no_match());
        assert_eq!(
            err.to_string(),
            "value matched no candidate type (string), type expected was: JsonOption<(i32, f32)>"
        );
    }

    #[test]
    fn default_is_first_candidate() {
        assert_eq!(Number::default().raw(), &json!(0));
        assert_eq!(JsonOption::<(String, i32)>::default().raw(), &json!(""));
        assert_eq!(<(i32, f32, bool) as Candidates>::LEN, 3);
    }

    #[test]
    fn set_coerces_to_first_accepting_candidate() {
        let mut v = Number::default();
        v.set(7.25_f64).unwrap();
        assert_eq!(v.matched_index(), Some(1));
        assert_eq!(v.get::<f32>(), Some(7.25));

        let mut v = JsonOption::<(u8, String)>::default();
        assert!(v.set(300_i32).is_err());
        v.set(String::from("big")).unwrap();
        assert_eq!(v.get::<String>().as_deref(), Some("big"));
    }

    #[test]
    fn nested_candidates() {
        let v = JsonOption::<(Vec<i32>, String)>::from_json(&json!([1, 2])).unwrap();
        assert_eq!(v.get::<Vec<i32>>(), Some(vec![1, 2]));
        assert!(JsonOption::<(Vec<i32>, String)>::matches(&json!("s")));
        assert!(!JsonOption::<(Vec<i32>, String)>::matches(&json!([1.5])));
    }
}
