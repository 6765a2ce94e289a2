//! Per-class schemas: the ordered entries a class is read and written by.
//!
//! A [`ClassSchema`] is a list of entries in declaration order. Each entry
//! is a [`FieldDescriptor`], a flattened class, or a hook action. The
//! order is the order in which members are consumed, errors are reported
//! and actions run.
//!
//! Schemas are usually generated by `#[derive(JsonClass)]`. They can also
//! be written by hand with [`ClassSchema::builder`], stored in a
//! [`NonGenericSchemaCell`] or [`GenericSchemaCell`].

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod descriptor;
mod info;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericSchemaCell, NonGenericSchemaCell};
pub use descriptor::FieldDescriptor;
pub use info::{ClassInfo, FieldInfo};

use std::borrow::Cow;

use serde_json::Value;

use crate::{ExtraFields, JsonClass, JsonError, JsonObject, dispatch};

// -----------------------------------------------------------------------------
// Entries

type ActionReadFn<T> = Box<dyn Fn(&mut T, &Value) -> Result<(), JsonError> + Send + Sync>;
type ActionWriteFn<T> = Box<dyn Fn(&T, &mut JsonObject) + Send + Sync>;

struct Flatten<T> {
    read: descriptor::ReadFn<T>,
    write: descriptor::WriteFn<T>,
    matches: descriptor::MatchFn,
}

enum Entry<T> {
    Field(FieldDescriptor<T>),
    Flatten(Flatten<T>),
    DeserializeAction(ActionReadFn<T>),
    SerializeAction(ActionWriteFn<T>),
}

struct ExtraAccess<T> {
    get: fn(&T) -> &ExtraFields,
    get_mut: fn(&mut T) -> &mut ExtraFields,
}

// -----------------------------------------------------------------------------
// ClassSchema

/// The complete read/write description of a class.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_json::schema::{ClassSchema, FieldDescriptor};
///
/// #[derive(Default)]
/// struct Pair {
///     left: i32,
///     right: Option<i32>,
/// }
///
/// let schema = ClassSchema::<Pair>::builder("Pair")
///     .field(FieldDescriptor::required(&["left"], |p| &p.left, |p| &mut p.left))
///     .field(FieldDescriptor::optional(&["right"], |p| &p.right, |p| &mut p.right))
///     .build();
///
/// let mut pair = Pair::default();
/// schema.deserialize(&mut pair, &json!({ "left": 1 })).unwrap();
/// assert_eq!((pair.left, pair.right), (1, None));
///
/// assert_eq!(schema.serialize(&pair), json!({ "left": 1 }));
/// assert!(schema.matches(&json!({ "left": 2, "right": "x" })));
/// assert!(!schema.matches(&json!({ "right": 2 })));
/// ```
pub struct ClassSchema<T> {
    info: ClassInfo,
    entries: Box<[Entry<T>]>,
    extra: Option<ExtraAccess<T>>,
}

impl<T: 'static> ClassSchema<T> {
    /// Starts a schema for the class named `type_name`.
    ///
    /// The name appears in type mismatch messages.
    #[inline]
    pub fn builder(type_name: impl Into<Cow<'static, str>>) -> ClassSchemaBuilder<T> {
        ClassSchemaBuilder {
            type_name: type_name.into(),
            entries: Vec::new(),
            fields: Vec::new(),
            extra: None,
        }
    }

    #[inline]
    pub fn info(&self) -> &ClassInfo {
        &self.info
    }

    /// Fills `this` from `value`, which must be an object.
    ///
    /// Entries run in declaration order. On error the members read so far
    /// keep their new values.
    pub fn deserialize(&self, this: &mut T, value: &Value) -> Result<(), JsonError> {
        let object = dispatch::expect_object(value, self.info.type_name())?;
        let mut remaining = self.extra.as_ref().map(|_| object.clone());

        self.read_entries(this, object, value, remaining.as_mut())?;

        if let Some(extra) = &self.extra
            && let Some(remaining) = remaining
        {
            *(extra.get_mut)(this) = ExtraFields::from(remaining);
        }
        Ok(())
    }

    /// Writes `this` as a JSON object.
    ///
    /// Kept extra fields come first; declared fields follow and replace
    /// extra members of the same name.
    pub fn serialize(&self, this: &T) -> Value {
        let mut object = match &self.extra {
            Some(extra) => (extra.get)(this).as_object().clone(),
            None => JsonObject::new(),
        };
        self.write_entries(this, &mut object);
        Value::Object(object)
    }

    /// Returns `true` if `value` is an object whose required fields,
    /// flattened ones included, hold acceptable values.
    ///
    /// Deserialize actions are not run, so one that rejects the value
    /// still makes [`deserialize`](Self::deserialize) fail.
    pub fn matches(&self, value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|object| self.match_entries(object))
    }

    fn read_entries(
        &self,
        this: &mut T,
        object: &JsonObject,
        raw: &Value,
        mut remaining: Option<&mut JsonObject>,
    ) -> Result<(), JsonError> {
        for entry in self.entries.iter() {
            match entry {
                Entry::Field(field) => (field.read)(this, object, raw, remaining.as_deref_mut())?,
                Entry::Flatten(flatten) => {
                    (flatten.read)(this, object, raw, remaining.as_deref_mut())?;
                }
                Entry::DeserializeAction(action) => action(this, raw)?,
                Entry::SerializeAction(_) => {}
            }
        }
        Ok(())
    }

    fn write_entries(&self, this: &T, object: &mut JsonObject) {
        for entry in self.entries.iter() {
            match entry {
                Entry::Field(field) => (field.write)(this, object),
                Entry::Flatten(flatten) => (flatten.write)(this, object),
                Entry::SerializeAction(action) => action(this, object),
                Entry::DeserializeAction(_) => {}
            }
        }
    }

    fn match_entries(&self, object: &JsonObject) -> bool {
        self.entries.iter().all(|entry| match entry {
            Entry::Field(field) => (field.matches)(object),
            Entry::Flatten(flatten) => (flatten.matches)(object),
            Entry::DeserializeAction(_) | Entry::SerializeAction(_) => true,
        })
    }
}

// -----------------------------------------------------------------------------
// ClassSchemaBuilder

/// Collects the entries of a [`ClassSchema`] in registration order.
pub struct ClassSchemaBuilder<T> {
    type_name: Cow<'static, str>,
    entries: Vec<Entry<T>>,
    fields: Vec<FieldInfo>,
    extra: Option<ExtraAccess<T>>,
}

impl<T: 'static> ClassSchemaBuilder<T> {
    /// Appends a declared field.
    pub fn field(mut self, field: FieldDescriptor<T>) -> Self {
        self.fields.push(field.info().clone());
        self.entries.push(Entry::Field(field));
        self
    }

    /// Splices the entries of class `C`, stored in `T` as a member, at
    /// this position.
    ///
    /// `C` reads and writes the same JSON object as `T`. Members consumed
    /// by `C` are not captured as extra fields of `T`, and extra fields
    /// kept by `C` itself are ignored.
    pub fn flatten<C: JsonClass>(mut self, get: fn(&T) -> &C, get_mut: fn(&mut T) -> &mut C) -> Self {
        let schema = C::schema();
        self.fields.extend(schema.info().iter().cloned());
        self.entries.push(Entry::Flatten(Flatten {
            read: Box::new(move |this, object, raw, remaining| {
                C::schema().read_entries(get_mut(this), object, raw, remaining)
            }),
            write: Box::new(move |this, object| C::schema().write_entries(get(this), object)),
            matches: Box::new(|object| C::schema().match_entries(object)),
        }));
        self
    }

    /// Appends an action run at this position while deserializing.
    ///
    /// It receives the raw incoming value. An error aborts the read.
    pub fn deserialize_action(
        mut self,
        action: impl Fn(&mut T, &Value) -> Result<(), JsonError> + Send + Sync + 'static,
    ) -> Self {
        self.entries.push(Entry::DeserializeAction(Box::new(action)));
        self
    }

    /// Appends an action run at this position while serializing.
    ///
    /// It may add, change or remove members of the output object.
    pub fn serialize_action(
        mut self,
        action: impl Fn(&T, &mut JsonObject) + Send + Sync + 'static,
    ) -> Self {
        self.entries.push(Entry::SerializeAction(Box::new(action)));
        self
    }

    /// Keeps members no field consumed in the given [`ExtraFields`].
    pub fn keep_extra_fields(
        mut self,
        get: fn(&T) -> &ExtraFields,
        get_mut: fn(&mut T) -> &mut ExtraFields,
    ) -> Self {
        self.extra = Some(ExtraAccess { get, get_mut });
        self
    }

    pub fn build(self) -> ClassSchema<T> {
        ClassSchema {
            info: ClassInfo::new::<T>(self.type_name, self.fields, self.extra.is_some()),
            entries: self.entries.into_boxed_slice(),
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Debug)]
    struct Node {
        id: u32,
        tags: Vec<String>,
        rest: ExtraFields,
    }

    fn node_schema() -> ClassSchema<Node> {
        ClassSchema::<Node>::builder("Node")
            .field(FieldDescriptor::required(&["id"], |n| &n.id, |n| &mut n.id))
            .field(FieldDescriptor::defaulted(
                &["tags"],
                |n| &n.tags,
                |n| &mut n.tags,
                |_, _| vec!["none".to_owned()],
            ))
            .keep_extra_fields(|n| &n.rest, |n| &mut n.rest)
            .build()
    }

    #[test]
    fn carrier_must_be_an_object() {
        let mut node = Node::default();
        let err = node_schema().deserialize(&mut node, &json!([1])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value was an unexpected type (array), type expected was: Node"
        );
    }

    #[test]
    fn extra_fields_round_trip() {
        let schema = node_schema();
        let mut node = Node::default();
        schema
            .deserialize(&mut node, &json!({ "id": 3, "tags": 5, "color": "red" }))
            .unwrap();

        assert_eq!(node.tags, ["none"]);
        // an unreadable defaulted member is not consumed
        assert_eq!(node.rest.len(), 2);
        assert_eq!(node.rest.get("color"), Some(&json!("red")));

        let out = schema.serialize(&node);
        assert_eq!(out, json!({ "id": 3, "tags": ["none"], "color": "red" }));
        assert!(schema.info().keeps_extra_fields());
    }

    #[test]
    fn actions_run_at_their_position() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (first, second) = (log.clone(), log.clone());

        let schema = ClassSchema::<Node>::builder("Node")
            .deserialize_action(move |n, _| {
                first.lock().unwrap().push(format!("before {}", n.id));
                Ok(())
            })
            .field(FieldDescriptor::required(&["id"], |n| &n.id, |n| &mut n.id))
            .deserialize_action(move |n, _| {
                second.lock().unwrap().push(format!("after {}", n.id));
                Ok(())
            })
            .serialize_action(|n, object| {
                object.insert("double".into(), json!(n.id * 2));
            })
            .build();

        let mut node = Node::default();
        schema.deserialize(&mut node, &json!({ "id": 4 })).unwrap();
        assert_eq!(*log.lock().unwrap(), ["before 0", "after 4"]);
        assert_eq!(schema.serialize(&node), json!({ "id": 4, "double": 8 }));
    }

    #[test]
    fn failing_action_aborts() {
        let schema = ClassSchema::<Node>::builder("Node")
            .deserialize_action(|_, raw| match raw.get("locked") {
                Some(_) => Err(JsonError::custom("node is locked")),
                None => Ok(()),
            })
            .build();

        let mut node = Node::default();
        let err = schema
            .deserialize(&mut node, &json!({ "locked": true }))
            .unwrap_err();
        assert_eq!(err.to_string(), "node is locked");
    }
}
