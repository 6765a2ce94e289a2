use std::any::TypeId;

use crate::JsonClass;
use crate::hash::{HashMap, HashSet, TypeIdMap};
use crate::schema::ClassInfo;

// -----------------------------------------------------------------------------
// SchemaRegistry

/// A catalogue of known classes, keyed by [`TypeId`] and type name.
///
/// Classes are added one by one with [`register`](Self::register) or all
/// at once with [`auto_register`](Self::auto_register).
///
/// # Example
///
/// ```
/// use std::any::TypeId;
/// use vc_json::{JsonClass, registry::SchemaRegistry};
///
/// #[derive(JsonClass, Default)]
/// struct Player {
///     name: String,
/// }
///
/// let mut registry = SchemaRegistry::new();
/// assert!(registry.register::<Player>());
/// assert!(!registry.register::<Player>());
///
/// let info = registry.get_with_type_name("Player").unwrap();
/// assert_eq!(info.field("name").unwrap().type_name(), "String");
/// assert!(registry.contains(TypeId::of::<Player>()));
/// ```
#[derive(Default)]
pub struct SchemaRegistry {
    classes: TypeIdMap<&'static ClassInfo>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    auto_registered: bool,
}

impl SchemaRegistry {
    /// Create a empty [`SchemaRegistry`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `T` if it is not registered yet.
    ///
    /// Returns `true` if `T` was added.
    pub fn register<T: JsonClass>(&mut self) -> bool {
        self.insert(T::schema().info())
    }

    /// Adds a class by its info. Returns `false` if it already exists.
    pub fn insert(&mut self, info: &'static ClassInfo) -> bool {
        let type_id = info.ty_id();
        if !self.classes.try_insert(type_id, || info) {
            return false;
        }

        // Two classes with one name make the name unusable for lookups.
        let type_name = info.type_name();
        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.remove(type_name).is_some() {
                log::warn!("class name `{type_name}` is ambiguous in the schema registry");
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, type_id);
            }
        }
        true
    }

    /// Registers every class marked `#[json(auto_register)]`.
    ///
    /// Returns `true` if automatic registration is supported, which needs
    /// the `auto_register` feature and a platform supported by the
    /// `inventory` crate. Otherwise this does nothing and returns `false`.
    ///
    /// Generic classes cannot be registered automatically.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::any::TypeId;
    /// use vc_json::{JsonClass, registry::SchemaRegistry};
    ///
    /// #[derive(JsonClass, Default)]
    /// #[json(auto_register)]
    /// struct Settings {
    ///     volume: u8,
    /// }
    ///
    /// let mut registry = SchemaRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Settings>()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            // Reduce the cost of duplicate registrations.
            if !self.auto_registered {
                auto_register::__register_types(self);
            }
            self.auto_registered
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[cfg(feature = "auto_register")]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.classes.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static ClassInfo> {
        self.classes.get(&type_id).copied()
    }

    /// Returns the class with the given short type name.
    ///
    /// Returns `None` if no class or more than one class has this name.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static ClassInfo> {
        self.get(*self.type_name_to_id.get(type_name)?)
    }

    /// Returns `true` if the given type name matches multiple registered classes.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static ClassInfo> + '_ {
        self.classes.values().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod first {
        #[derive(crate::JsonClass, Default)]
        pub struct Item {
            pub id: u32,
        }
    }

    mod second {
        #[derive(crate::JsonClass, Default)]
        pub struct Item {
            pub label: String,
        }
    }

    #[derive(crate::JsonClass, Default)]
    #[json(auto_register)]
    struct Registered {
        value: i32,
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = SchemaRegistry::new();
        registry.register::<first::Item>();
        assert!(registry.get_with_type_name("Item").is_some());

        registry.register::<second::Item>();
        assert!(registry.is_ambiguous("Item"));
        assert!(registry.get_with_type_name("Item").is_none());
        assert!(registry.get(TypeId::of::<second::Item>()).is_some());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.iter().count(), 2);
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_registration() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.auto_register());
        assert!(registry.contains(TypeId::of::<Registered>()));
        assert!(!registry.contains(TypeId::of::<first::Item>()));
        assert!(registry.auto_register());
    }

    #[cfg(not(feature = "auto_register"))]
    #[test]
    fn auto_registration_unavailable() {
        let mut registry = SchemaRegistry::new();
        assert!(!registry.auto_register());
        assert!(registry.is_empty());
    }
}
