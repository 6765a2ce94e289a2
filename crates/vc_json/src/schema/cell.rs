//! Containers for static storage of class schemas.
//!
//! [`JsonClass::schema`](crate::JsonClass::schema) returns a `&'static`
//! schema that is built on first use.
//!
//! ## NonGenericSchemaCell
//!
//! For non generic types. Internally an [`OnceLock`], so the schema is
//! built exactly once even when first used from several threads.
//!
//! ## GenericSchemaCell
//!
//! If the type is generic, the `static CELL` inside the function is shared
//! by every instantiation. Therefore the inner of this container is a
//! `TypeId` map wrapped in [`RwLock`], and each schema is leaked once.

use std::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::TypeIdMap;
use crate::schema::ClassSchema;

/// Container for static storage of a non-generic class schema.
///
/// ## Example
///
/// ```
/// use vc_json::JsonClass;
/// use vc_json::schema::{ClassSchema, FieldDescriptor, NonGenericSchemaCell};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
/// }
///
/// impl JsonClass for Point {
///     fn schema() -> &'static ClassSchema<Self> {
///         static CELL: NonGenericSchemaCell<Point> = NonGenericSchemaCell::new();
///         CELL.get_or_init(|| {
///             ClassSchema::<Point>::builder("Point")
///                 .field(FieldDescriptor::required(&["x"], |p| &p.x, |p| &mut p.x))
///                 .build()
///         })
///     }
/// }
/// # vc_json::impl_json_field_for_class!(Point);
///
/// assert_eq!(Point::schema().info().field_len(), 1);
/// ```
pub struct NonGenericSchemaCell<T>(OnceLock<ClassSchema<T>>);

impl<T> NonGenericSchemaCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored schema, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> ClassSchema<T>) -> &ClassSchema<T> {
        self.0.get_or_init(f)
    }
}

/// Container for static storage of generic class schemas.
///
/// ## Example
///
/// ```
/// use vc_json::{JsonClass, JsonField};
/// use vc_json::schema::{ClassSchema, FieldDescriptor, GenericSchemaCell};
///
/// #[derive(Default)]
/// struct Wrapper<T> {
///     inner: T,
/// }
///
/// impl<T: JsonField + Default + 'static> JsonClass for Wrapper<T> {
///     fn schema() -> &'static ClassSchema<Self> {
///         static CELL: GenericSchemaCell = GenericSchemaCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             ClassSchema::<Self>::builder(std::any::type_name::<Self>())
///                 .field(FieldDescriptor::required(&["inner"], |w| &w.inner, |w| &mut w.inner))
///                 .build()
///         })
///     }
/// }
/// vc_json::impl_json_field_for_class!(impl [T: JsonField + Default + 'static] Wrapper<T>);
///
/// let a = Wrapper::<u8>::schema().info();
/// let b = Wrapper::<String>::schema().info();
/// assert!(a.type_is::<Wrapper<u8>>());
/// assert!(b.type_is::<Wrapper<String>>());
/// ```
pub struct GenericSchemaCell(RwLock<TypeIdMap<&'static (dyn Any + Send + Sync)>>);

impl GenericSchemaCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the schema stored for `T`.
    ///
    /// If there is no entry found, a new one is built from the given
    /// function. The lock is not held while building, so `f` may request
    /// schemas of other instantiations sharing this cell. When two threads
    /// race on the first access only one schema is kept.
    #[inline(always)]
    pub fn get_or_insert<T: 'static>(
        &self,
        f: impl FnOnce() -> ClassSchema<T>,
    ) -> &'static ClassSchema<T> {
        let entry = match self.get_by_type_id(TypeId::of::<T>()) {
            Some(entry) => entry,
            None => self.insert_by_type_id(TypeId::of::<T>(), Box::new(f())),
        };
        // keyed by `TypeId::of::<T>()`, so the downcast cannot fail
        entry
            .downcast_ref::<ClassSchema<T>>()
            .expect("schema cell entry has a foreign type")
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static (dyn Any + Send + Sync)> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(
        &self,
        type_id: TypeId,
        value: Box<dyn Any + Send + Sync>,
    ) -> &'static (dyn Any + Send + Sync) {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *map.get_or_insert(type_id, || &*Box::leak(value))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    use super::*;
    use crate::schema::FieldDescriptor;

    #[derive(Default)]
    struct Counted {
        value: i32,
    }

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    fn counted_schema() -> &'static ClassSchema<Counted> {
        static CELL: NonGenericSchemaCell<Counted> = NonGenericSchemaCell::new();
        CELL.get_or_init(|| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            ClassSchema::<Counted>::builder("Counted")
                .field(FieldDescriptor::required(
                    &["value"],
                    |c| &c.value,
                    |c| &mut c.value,
                ))
                .build()
        })
    }

    #[test]
    fn built_once_under_concurrent_first_use() {
        const THREADS: usize = 8;
        let barrier = Barrier::new(THREADS);

        let addresses: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        counted_schema() as *const ClassSchema<Counted> as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn generic_cell_is_keyed_by_type() {
        static CELL: GenericSchemaCell = GenericSchemaCell::new();

        let a = CELL.get_or_insert::<u8>(|| ClassSchema::<u8>::builder("u8").build());
        let b = CELL.get_or_insert::<u16>(|| ClassSchema::<u16>::builder("u16").build());
        let again = CELL.get_or_insert::<u8>(|| unreachable!());

        assert_eq!(a.info().type_name(), "u8");
        assert_eq!(b.info().type_name(), "u16");
        assert!(std::ptr::eq(a, again));
    }
}
