use alloc::string::String;
use alloc::vec::Vec;

use crate::{IndexMap, MapCollection, Result};

/// Reduces the values every member map holds for one index into a single value.
pub type Aggregation<T> = fn(&[T]) -> T;

/// Logical OR: one map flagging an index is enough to flag it for the whole collection.
pub fn any_true(values: &[bool]) -> bool {
    values.iter().any(|&value| value)
}

/// A [`MapCollection`] that also reduces its members into one value per physical index.
///
/// The reduction is cached. Reads through [`AggregatedCollection::merged_values`] and
/// [`AggregatedCollection::merged_value_at`] are served from the cache, which the owner must
/// refresh with [`AggregatedCollection::update_cache`] once per logical structural change
/// (not once per member change) to avoid recomputing `members × len` values repeatedly.
pub struct AggregatedCollection<T> {
    maps: MapCollection<IndexMap<T>>,
    aggregate: Aggregation<T>,
    fallback: T,
    merged: Vec<T>,
}

impl<T: Clone + 'static> AggregatedCollection<T> {
    pub fn new(aggregate: Aggregation<T>, fallback: T) -> Self {
        Self {
            maps: MapCollection::new(),
            aggregate,
            fallback,
            merged: Vec::new(),
        }
    }

    pub fn maps(&self) -> &MapCollection<IndexMap<T>> {
        &self.maps
    }

    pub(crate) fn maps_mut(&mut self) -> &mut MapCollection<IndexMap<T>> {
        &mut self.maps
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        map: IndexMap<T>,
    ) -> Result<&mut IndexMap<T>> {
        self.maps.register(name, map)
    }

    pub fn unregister(&mut self, name: &str) -> Option<IndexMap<T>> {
        self.maps.unregister(name)
    }

    pub fn get(&self, name: &str) -> Option<&IndexMap<T>> {
        self.maps.get(name)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    pub fn init_every(&mut self, length: usize) {
        self.maps.init_every(length);
    }

    pub fn insert_to_every(&mut self, position: usize, inserted: &[usize]) {
        self.maps.insert_to_every(position, inserted);
    }

    pub fn remove_from_every(&mut self, removed: &[usize]) {
        self.maps.remove_from_every(removed);
    }

    /// Cached merged values, one per physical index. Empty when no map is registered.
    pub fn merged_values(&self) -> &[T] {
        &self.merged
    }

    /// Recomputes the merged values without touching the cache.
    pub fn compute_merged_values(&self) -> Vec<T> {
        let Some((_, first)) = self.maps.iter().next() else {
            return Vec::new();
        };
        let length = first.len();
        let mut for_index = Vec::with_capacity(self.maps.len());

        (0..length)
            .map(|index| {
                for_index.clear();
                for_index.extend(
                    self.maps
                        .iter()
                        .filter_map(|(_, map)| map.value_at(index).cloned()),
                );
                (self.aggregate)(&for_index)
            })
            .collect()
    }

    /// Cached merged value for `index`, or the fallback when `index` is out of range.
    pub fn merged_value_at(&self, index: usize) -> T {
        self.merged
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn update_cache(&mut self) {
        self.merged = self.compute_merged_values();
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for AggregatedCollection<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AggregatedCollection")
            .field("maps", &self.maps)
            .field("fallback", &self.fallback)
            .field("merged", &self.merged)
            .finish_non_exhaustive()
    }
}
