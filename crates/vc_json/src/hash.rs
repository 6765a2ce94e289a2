//! Hash containers for the registry and the schema cells.
//!
//! `HashMap` and `HashSet` are *hashbrown* containers with a fixed
//! *foldhash* seed. `TypeIdMap` skips hashing, since a `TypeId` is
//! already a hash.

use core::any::TypeId;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};
use hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Builds foldhash hashers from a fixed seed.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;
pub(crate) type HashSet<K> = hashbrown::HashSet<K, FixedHashState>;

// -----------------------------------------------------------------------------
// NoOpHasher

/// Passes a written `u64` through as the hash.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // rotate left so that `write_u32(10)` equals `write_u64(10)`
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map with [`TypeId`] keys.
pub(crate) struct TypeIdMap<V>(hashbrown::HashMap<TypeId, V, NoOpHashState>);

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TypeIdMap<V> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self(hashbrown::HashMap::with_hasher(NoOpHashState))
    }

    /// Inserts `f()` if `type_id` is absent. Returns `true` if it did.
    #[inline]
    pub(crate) fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => {
                entry.insert(f());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the value of `type_id`, inserting `f()` first if absent.
    #[inline]
    pub(crate) fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        self.0.entry(type_id).or_insert_with(f)
    }

    #[inline]
    pub(crate) fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub(crate) fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub(crate) fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_hasher() {
        let state = NoOpHashState;
        assert_eq!(state.hash_one(1234_u64), 1234);
        assert_eq!(state.hash_one(1234_u32), 1234);
        assert_eq!(state.hash_one(1234_i16), 1234);
    }

    #[test]
    fn fixed_hash_state_is_stable() {
        assert_eq!(FixedHashState.hash_one("Item"), FixedHashState.hash_one("Item"));

        let mut names = HashMap::<&str, u32>::default();
        names.insert("Item", 1);
        assert_eq!(names.get("Item"), Some(&1));
        assert!(HashSet::<&str>::default().insert("Item"));
    }

    #[test]
    fn type_id_map() {
        let mut map = TypeIdMap::<&str>::new();
        assert!(map.is_empty());
        assert!(map.try_insert(TypeId::of::<u8>(), || "u8"));
        assert!(!map.try_insert(TypeId::of::<u8>(), || unreachable!()));
        assert_eq!(*map.get_or_insert(TypeId::of::<u16>(), || "u16"), "u16");
        assert_eq!(*map.get_or_insert(TypeId::of::<u16>(), || unreachable!()), "u16");

        assert!(map.contains(&TypeId::of::<u8>()));
        assert_eq!(map.get(&TypeId::of::<u16>()), Some(&"u16"));
        assert_eq!(map.get(&TypeId::of::<u32>()), None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.values().count(), 2);
    }
}
