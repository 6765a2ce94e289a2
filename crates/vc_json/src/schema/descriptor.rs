use serde_json::Value;

use crate::dispatch::{self, FieldNames, Lookup, Policy};
use crate::schema::FieldInfo;
use crate::{JsonError, JsonField, JsonObject};

pub(crate) type ReadFn<T> = Box<
    dyn Fn(&mut T, &JsonObject, &Value, Option<&mut JsonObject>) -> Result<(), JsonError>
        + Send
        + Sync,
>;
pub(crate) type WriteFn<T> = Box<dyn Fn(&T, &mut JsonObject) + Send + Sync>;
pub(crate) type MatchFn = Box<dyn Fn(&JsonObject) -> bool + Send + Sync>;

/// One declared field of a class: its names, accessors and policy.
///
/// Built with [`required`](Self::required), [`optional`](Self::optional)
/// or [`defaulted`](Self::defaulted) and handed to
/// [`ClassSchemaBuilder::field`](crate::schema::ClassSchemaBuilder::field).
pub struct FieldDescriptor<T> {
    info: FieldInfo,
    pub(crate) read: ReadFn<T>,
    pub(crate) write: WriteFn<T>,
    pub(crate) matches: MatchFn,
}

impl<T: 'static> FieldDescriptor<T> {
    /// A field that must be present and readable.
    ///
    /// # Panics
    ///
    /// Panics if `names` is empty.
    pub fn required<F: JsonField + 'static>(
        names: &'static [&'static str],
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        let names = FieldNames::new(names);
        Self {
            info: FieldInfo::new::<F>(names, Policy::Required),
            read: Box::new(move |this, object, _, remaining| {
                if let Lookup::Found(v) = dispatch::read_field::<F>(object, &names, Policy::Required)? {
                    *get_mut(this) = v;
                    dispatch::consume(remaining, &names);
                }
                Ok(())
            }),
            write: Box::new(move |this, object| dispatch::write_field(object, &names, get(this))),
            matches: Box::new(move |object| {
                dispatch::field_matches::<F>(object, &names, Policy::Required)
            }),
        }
    }

    /// A field stored as `Option<F>`.
    ///
    /// Reading sets `None` when the member is absent or unreadable;
    /// writing skips `None`.
    ///
    /// # Panics
    ///
    /// Panics if `names` is empty.
    pub fn optional<F: JsonField + 'static>(
        names: &'static [&'static str],
        get: fn(&T) -> &Option<F>,
        get_mut: fn(&mut T) -> &mut Option<F>,
    ) -> Self {
        let names = FieldNames::new(names);
        Self {
            info: FieldInfo::new::<Option<F>>(names, Policy::Optional),
            read: Box::new(move |this, object, _, remaining| {
                let v = dispatch::read_field::<F>(object, &names, Policy::Optional)?.found();
                if v.is_some() {
                    dispatch::consume(remaining, &names);
                }
                *get_mut(this) = v;
                Ok(())
            }),
            write: Box::new(move |this, object| {
                if let Some(v) = get(this) {
                    dispatch::write_field(object, &names, v);
                }
            }),
            matches: Box::new(|_| true),
        }
    }

    /// A field replaced by `default` when absent or unreadable.
    ///
    /// `default` runs on every fallback. It receives the object being
    /// filled, with the fields declared before this one already read, and
    /// the raw incoming value.
    ///
    /// # Panics
    ///
    /// Panics if `names` is empty.
    pub fn defaulted<F: JsonField + 'static>(
        names: &'static [&'static str],
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
        default: impl Fn(&T, &Value) -> F + Send + Sync + 'static,
    ) -> Self {
        let names = FieldNames::new(names);
        Self {
            info: FieldInfo::new::<F>(names, Policy::Defaulted),
            read: Box::new(move |this, object, raw, remaining| {
                match dispatch::read_field::<F>(object, &names, Policy::Defaulted)? {
                    Lookup::Found(v) => {
                        *get_mut(this) = v;
                        dispatch::consume(remaining, &names);
                    }
                    Lookup::Fallback => {
                        let v = default(&*this, raw);
                        *get_mut(this) = v;
                    }
                }
                Ok(())
            }),
            write: Box::new(move |this, object| dispatch::write_field(object, &names, get(this))),
            matches: Box::new(|_| true),
        }
    }

    #[inline]
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default, Debug, PartialEq)]
    struct Sample {
        count: i32,
        label: Option<String>,
        ratio: f64,
    }

    fn run(desc: &FieldDescriptor<Sample>, sample: &mut Sample, raw: &Value) -> JsonObject {
        let object = raw.as_object().unwrap();
        let mut remaining = object.clone();
        (desc.read)(sample, object, raw, Some(&mut remaining)).unwrap();
        remaining
    }

    #[test]
    fn required_consumes_all_names() {
        let desc = FieldDescriptor::<Sample>::required(&["count", "n"], |s| &s.count, |s| &mut s.count);
        let mut sample = Sample::default();
        let remaining = run(&desc, &mut sample, &json!({ "n": 1, "count": 2, "other": 0 }));

        assert_eq!(sample.count, 2);
        assert_eq!(Value::Object(remaining), json!({ "other": 0 }));
    }

    #[test]
    fn optional_leaves_bad_values_in_place() {
        let desc = FieldDescriptor::<Sample>::optional(&["label"], |s| &s.label, |s| &mut s.label);
        let mut sample = Sample {
            label: Some("old".into()),
            ..Sample::default()
        };
        let remaining = run(&desc, &mut sample, &json!({ "label": 5 }));

        assert_eq!(sample.label, None);
        assert_eq!(Value::Object(remaining), json!({ "label": 5 }));

        let mut out = JsonObject::new();
        (desc.write)(&sample, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn default_sees_earlier_fields() {
        let desc = FieldDescriptor::<Sample>::defaulted(
            &["ratio"],
            |s| &s.ratio,
            |s| &mut s.ratio,
            |s, _| f64::from(s.count) / 2.0,
        );
        let mut sample = Sample {
            count: 5,
            ..Sample::default()
        };
        run(&desc, &mut sample, &json!({ "ratio": "wide" }));
        assert_eq!(sample.ratio, 2.5);
        assert_eq!(desc.info().policy(), Policy::Defaulted);
    }
}
