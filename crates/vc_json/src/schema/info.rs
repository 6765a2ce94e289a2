use std::any::{Any, TypeId};
use std::borrow::Cow;

use crate::dispatch::{FieldNames, Policy};
use crate::{FieldKind, JsonField};

// -----------------------------------------------------------------------------
// FieldInfo

/// Type-erased description of one declared field.
///
/// # Examples
///
/// ```
/// use vc_json::{FieldKind, JsonClass, dispatch::Policy};
///
/// #[derive(JsonClass, Default)]
/// struct Foo {
///     #[json(name = "Items", alias = "items")]
///     items: Vec<u8>,
/// }
///
/// let field = Foo::schema().info().field("items").unwrap();
///
/// assert_eq!(field.name(), "Items");
/// assert_eq!(field.kind(), FieldKind::Array);
/// assert_eq!(field.policy(), Policy::Required);
/// assert!(field.type_is::<Vec<u8>>());
/// ```
#[derive(Clone, Debug)]
pub struct FieldInfo {
    ty_id: TypeId,
    names: FieldNames,
    kind: FieldKind,
    policy: Policy,
    // Generic type names allocate, so they are built on request.
    type_name: fn() -> Cow<'static, str>,
}

impl FieldInfo {
    /// Creates a [`FieldInfo`] for a field stored as `F`.
    #[inline]
    pub fn new<F: JsonField + Any>(names: FieldNames, policy: Policy) -> Self {
        Self {
            ty_id: TypeId::of::<F>(),
            names,
            kind: F::KIND,
            policy,
            type_name: F::type_name,
        }
    }

    /// Returns the canonical JSON name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.names.canonical()
    }

    #[inline]
    pub const fn names(&self) -> &FieldNames {
        &self.names
    }

    #[inline]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    #[inline]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    #[inline]
    pub fn type_name(&self) -> Cow<'static, str> {
        (self.type_name)()
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }
}

// -----------------------------------------------------------------------------
// ClassInfo

/// Type-erased description of a class schema.
///
/// Flattened classes contribute their fields in place, so
/// [`iter`](ClassInfo::iter) lists every JSON member the class reads.
#[derive(Clone, Debug)]
pub struct ClassInfo {
    ty_id: TypeId,
    type_name: Cow<'static, str>,
    fields: Box<[FieldInfo]>,
    keeps_extra_fields: bool,
}

impl ClassInfo {
    pub(crate) fn new<T: Any>(
        type_name: Cow<'static, str>,
        fields: Vec<FieldInfo>,
        keeps_extra_fields: bool,
    ) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            type_name,
            fields: fields.into_boxed_slice(),
            keeps_extra_fields,
        }
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the field read under `name`, aliases included.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.names.contains(name))
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldInfo> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if unknown members survive a read/write cycle.
    #[inline]
    pub const fn keeps_extra_fields(&self) -> bool {
        self.keeps_extra_fields
    }
}
