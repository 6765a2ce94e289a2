use serde_json::Value;

use crate::schema::ClassSchema;
use crate::{JsonError, JsonField};

/// A struct with a JSON schema.
///
/// Usually derived with `#[derive(JsonClass)]`, which also implements
/// [`JsonField`] so the class can be nested in other classes, vectors,
/// maps and unions.
///
/// The schema is built on the first call to [`schema`](JsonClass::schema)
/// and shared by every instance afterwards.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_json::JsonClass;
///
/// #[derive(JsonClass, Default, Debug, PartialEq)]
/// struct Sub {
///     #[json(name = "FloatValue", default)]
///     value: f32,
/// }
///
/// #[derive(JsonClass, Default, Debug, PartialEq)]
/// struct Outer {
///     #[json(name = "Subclass")]
///     sub: Sub,
///     #[json(name = "SubVector")]
///     subs: Vec<Sub>,
/// }
///
/// let mut outer = Outer::default();
/// outer
///     .deserialize(&json!({ "Subclass": {}, "SubVector": [{ "FloatValue": 2 }] }))
///     .unwrap();
/// assert_eq!(outer.subs[0].value, 2.0);
///
/// assert_eq!(
///     outer.serialize(),
///     json!({ "Subclass": { "FloatValue": 0.0 }, "SubVector": [{ "FloatValue": 2.0 }] }),
/// );
/// ```
pub trait JsonClass: JsonField + Default + 'static {
    fn schema() -> &'static ClassSchema<Self>;

    /// Fills `self` from the object `value`.
    ///
    /// Fields missing from `value` that are optional or defaulted are
    /// reset; skipped fields keep their current value.
    #[inline]
    fn deserialize(&mut self, value: &Value) -> Result<(), JsonError> {
        Self::schema().deserialize(self, value)
    }

    #[inline]
    fn serialize(&self) -> Value {
        Self::schema().serialize(self)
    }
}

/// Reads a fresh instance of a class, for [`JsonField::from_json`].
#[inline]
pub fn class_from_json<T: JsonClass>(value: &Value) -> Result<T, JsonError> {
    let mut this = T::default();
    T::schema().deserialize(&mut this, value)?;
    Ok(this)
}

/// Implements [`JsonField`] for a type with a hand-written
/// [`JsonClass`] implementation.
///
/// Generic parameters go in brackets after `impl`, before the type.
///
/// ```ignore
/// impl_json_field_for_class!(Point);
/// impl_json_field_for_class!(impl [T: JsonField + Default + 'static] Wrapper<T>);
/// ```
#[macro_export]
macro_rules! impl_json_field_for_class {
    (impl [$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> $crate::JsonField for $ty {
            const KIND: $crate::FieldKind = $crate::FieldKind::Object;

            fn type_name() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed(
                    <Self as $crate::JsonClass>::schema().info().type_name()
                )
            }

            #[inline]
            fn matches(value: &$crate::Value) -> bool {
                <Self as $crate::JsonClass>::schema().matches(value)
            }

            #[inline]
            fn from_json(value: &$crate::Value) -> ::core::result::Result<Self, $crate::JsonError> {
                $crate::__macro_exports::class_from_json::<Self>(value)
            }

            #[inline]
            fn to_json(&self) -> $crate::Value {
                <Self as $crate::JsonClass>::serialize(self)
            }
        }
    };
    ($ty:ty) => {
        $crate::impl_json_field_for_class!(impl [] $ty);
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::schema::{ClassSchema, FieldDescriptor, GenericSchemaCell, NonGenericSchemaCell};
    use crate::{FieldKind, JsonClass, JsonField};

    #[derive(Default, Debug, PartialEq)]
    struct Point {
        x: i32,
    }

    impl JsonClass for Point {
        fn schema() -> &'static ClassSchema<Self> {
            static CELL: NonGenericSchemaCell<Point> = NonGenericSchemaCell::new();
            CELL.get_or_init(|| {
                ClassSchema::<Point>::builder("Point")
                    .field(FieldDescriptor::required(&["x"], |p| &p.x, |p| &mut p.x))
                    .build()
            })
        }
    }

    crate::impl_json_field_for_class!(Point);

    #[derive(Default, Debug, PartialEq)]
    struct Pair<A, B> {
        first: A,
        second: Option<B>,
    }

    impl<A, B> JsonClass for Pair<A, B>
    where
        A: JsonField + Default + 'static,
        B: JsonField + Default + 'static,
    {
        fn schema() -> &'static ClassSchema<Self> {
            static CELL: GenericSchemaCell = GenericSchemaCell::new();
            CELL.get_or_insert::<Self>(|| {
                ClassSchema::<Self>::builder("Pair")
                    .field(FieldDescriptor::<Self>::required(
                        &["first"],
                        |p| &p.first,
                        |p| &mut p.first,
                    ))
                    .field(FieldDescriptor::<Self>::optional(
                        &["second"],
                        |p| &p.second,
                        |p| &mut p.second,
                    ))
                    .build()
            })
        }
    }

    crate::impl_json_field_for_class!(
        impl [A: JsonField + Default + 'static, B: JsonField + Default + 'static] Pair<A, B>
    );

    #[test]
    fn hand_written_class() {
        assert_eq!(Point::KIND, FieldKind::Object);
        assert_eq!(Point::type_name(), "Point");
        assert_eq!(Point::from_json(&json!({ "x": 4 })).unwrap(), Point { x: 4 });
        assert!(!Point::matches(&json!({ "x": "4" })));
        assert_eq!(Point { x: 1 }.to_json(), json!({ "x": 1 }));
    }

    #[test]
    fn hand_written_generic_class() {
        let pair = Pair::<Point, String>::from_json(&json!({ "first": { "x": 2 } })).unwrap();
        assert_eq!(pair, Pair { first: Point { x: 2 }, second: None });
        assert!(Pair::<u8, bool>::matches(&json!({ "first": 3, "second": "x" })));
        assert!(!Pair::<u8, bool>::matches(&json!({ "first": 300 })));
        assert_eq!(
            Pair::<u8, bool> { first: 1, second: Some(true) }.to_json(),
            json!({ "first": 1, "second": true }),
        );

        let a = Pair::<u8, bool>::schema().info();
        let b = Pair::<u16, bool>::schema().info();
        assert!(a.type_is::<Pair<u8, bool>>());
        assert!(b.type_is::<Pair<u16, bool>>());
    }
}
