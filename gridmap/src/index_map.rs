use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Error, MapCategory, Renumbering, Result};

/// The value every entry of an [`IndexMap`] starts with.
#[derive(Clone)]
pub enum InitialValue<T> {
    /// The same value for every index.
    Value(T),
    /// A value derived from the physical index it is stored for.
    Provider(Arc<dyn Fn(usize) -> T + Send + Sync>),
}

impl<T: Clone> InitialValue<T> {
    pub(crate) fn resolve(&self, index: usize) -> T {
        match self {
            Self::Value(v) => v.clone(),
            Self::Provider(f) => f(index),
        }
    }
}

impl InitialValue<usize> {
    /// Every entry starts out pointing at its own physical index.
    pub fn identity() -> Self {
        Self::Provider(Arc::new(|index| index))
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for InitialValue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// An ordered association from physical index (`0..len`) to one value per index.
///
/// A map does not know about its siblings. It only grows, shrinks and reorders itself when
/// physical indexes are inserted or removed, following its [`Renumbering`] policy.
///
/// Every mutation bumps [`IndexMap::revision`], which is how owners (collections, the mapper)
/// detect that a map changed and that derived caches must be rebuilt.
#[derive(Clone)]
pub struct IndexMap<T> {
    values: Vec<T>,
    initial: InitialValue<T>,
    renumbering: Renumbering<T>,
    category: MapCategory,
    revision: u64,
}

impl<T: Clone> IndexMap<T> {
    /// Creates a generic value map where every index starts as `initial`.
    pub fn new(initial: T) -> Self {
        Self::from_parts(InitialValue::Value(initial), MapCategory::Generic)
    }

    /// Creates a generic value map whose initial values are derived from the physical index.
    pub fn with_provider(initial: impl Fn(usize) -> T + Send + Sync + 'static) -> Self {
        Self::from_parts(InitialValue::Provider(Arc::new(initial)), MapCategory::Generic)
    }

    fn from_parts(initial: InitialValue<T>, category: MapCategory) -> Self {
        Self {
            values: Vec::new(),
            initial,
            renumbering: Renumbering::physical(),
            category,
            revision: 0,
        }
    }

    pub fn with_renumbering(mut self, renumbering: Renumbering<T>) -> Self {
        self.renumbering = renumbering;
        self
    }

    pub fn category(&self) -> MapCategory {
        self.category
    }

    pub fn initial_value(&self) -> &InitialValue<T> {
        &self.initial
    }

    /// Discards all values and fills the map with `length` initial values.
    pub fn init(&mut self, length: usize) {
        self.values.clear();
        self.values
            .extend((0..length).map(|index| self.initial.resolve(index)));
        self.touch();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Replaces all values at once. The new list must have the current length.
    pub fn set_values(&mut self, values: Vec<T>) -> Result<()> {
        if values.len() != self.values.len() {
            gwarn!(
                expected = self.values.len(),
                actual = values.len(),
                "IndexMap::set_values: length mismatch"
            );
            return Err(Error::LengthMismatch {
                expected: self.values.len(),
                actual: values.len(),
            });
        }
        self.values = values;
        self.touch();
        Ok(())
    }

    pub fn value_at(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Sets the value for `index`. Returns `false` (and changes nothing) when out of range.
    pub fn set_value_at(&mut self, index: usize, value: T) -> bool {
        let Some(slot) = self.values.get_mut(index) else {
            return false;
        };
        *slot = value;
        self.touch();
        true
    }

    /// Resets every entry to its initial value, keeping the length.
    pub fn clear(&mut self) {
        self.init(self.values.len());
    }

    /// Inserts entries for `inserted` physical indexes.
    ///
    /// `position` is the sequence position picked by the mapper; physically keyed policies
    /// ignore it and splice at the first inserted index instead.
    pub fn insert(&mut self, position: usize, inserted: &[usize]) {
        if inserted.is_empty() {
            return;
        }
        let initial = &self.initial;
        self.renumbering
            .insert(&mut self.values, position, inserted, &|index| initial.resolve(index));
        self.touch();
    }

    /// Removes the entries for `removed` physical indexes (any order, duplicates ignored).
    pub fn remove(&mut self, removed: &[usize]) {
        if removed.is_empty() {
            return;
        }
        let mut removed = removed.to_vec();
        removed.sort_unstable();
        removed.dedup();
        self.renumbering.remove(&mut self.values, &removed);
        self.touch();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl IndexMap<bool> {
    /// A flag map whose `true` entries are excluded from data iteration and rendering.
    pub fn trimming() -> Self {
        Self::from_parts(InitialValue::Value(false), MapCategory::Trimming)
    }

    /// A flag map whose `true` entries stay in the data but are not rendered.
    pub fn hiding() -> Self {
        Self::from_parts(InitialValue::Value(false), MapCategory::Hiding)
    }

    /// Physical indexes flagged `true` in this map, ascending.
    pub fn flagged_indexes(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, &flag)| flag.then_some(index))
            .collect()
    }
}

impl IndexMap<usize> {
    /// The visual order of physical indexes; starts as the identity permutation.
    pub fn indexes_sequence() -> Self {
        Self::from_parts(InitialValue::identity(), MapCategory::Generic)
            .with_renumbering(Renumbering::sequence())
    }

    /// A physical-index-to-physical-index remap that keeps pointing at the same rows across
    /// inserts and removals.
    pub fn loose_binds() -> Self {
        Self::from_parts(InitialValue::identity(), MapCategory::Generic)
            .with_renumbering(Renumbering::loose_binds())
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for IndexMap<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexMap")
            .field("category", &self.category)
            .field("values", &self.values)
            .field("initial", &self.initial)
            .field("revision", &self.revision)
            .finish()
    }
}
