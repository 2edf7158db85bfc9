use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use crate::{Error, IndexMap, Result};

/// The structural operations a collection forwards to its members.
///
/// This trait is object safe so heterogeneous value maps can share one collection.
pub trait IndexMapOps {
    fn init(&mut self, length: usize);
    fn insert(&mut self, position: usize, inserted: &[usize]);
    fn remove(&mut self, removed: &[usize]);
    fn len(&self) -> usize;
    fn revision(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> IndexMapOps for IndexMap<T> {
    fn init(&mut self, length: usize) {
        IndexMap::init(self, length);
    }

    fn insert(&mut self, position: usize, inserted: &[usize]) {
        IndexMap::insert(self, position, inserted);
    }

    fn remove(&mut self, removed: &[usize]) {
        IndexMap::remove(self, removed);
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn revision(&self) -> u64 {
        IndexMap::revision(self)
    }
}

/// A type-erased [`IndexMap`] that can be downcast back to its concrete value type.
pub trait AnyIndexMap: IndexMapOps + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Clone + 'static> AnyIndexMap for IndexMap<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl IndexMapOps for Box<dyn AnyIndexMap> {
    fn init(&mut self, length: usize) {
        (**self).init(length);
    }

    fn insert(&mut self, position: usize, inserted: &[usize]) {
        (**self).insert(position, inserted);
    }

    fn remove(&mut self, removed: &[usize]) {
        (**self).remove(removed);
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn revision(&self) -> u64 {
        (**self).revision()
    }
}

/// An ordered, named set of maps sharing one purpose.
///
/// Structural operations are fanned out to every member in registration order. Name
/// uniqueness is only checked within this collection; the mapper enforces it across all of
/// its collections.
pub struct MapCollection<M> {
    entries: Vec<(String, M)>,
}

impl<M> Default for MapCollection<M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<M: IndexMapOps> MapCollection<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, map: M) -> Result<&mut M> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(Error::DuplicateName { name });
        }
        let index = self.entries.len();
        self.entries.push((name, map));
        Ok(&mut self.entries[index].1)
    }

    /// Removes the map registered under `name`. No-op (returns `None`) when absent.
    pub fn unregister(&mut self, name: &str) -> Option<M> {
        let position = self.position(name)?;
        Some(self.entries.remove(position).1)
    }

    pub fn get(&self, name: &str) -> Option<&M> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, map)| map)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut M> {
        self.entries
            .iter_mut()
            .find(|(entry, _)| entry == name)
            .map(|(_, map)| map)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Members in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &M)> + '_ {
        self.entries.iter().map(|(name, map)| (name.as_str(), map))
    }

    pub fn init_every(&mut self, length: usize) {
        for (_, map) in &mut self.entries {
            map.init(length);
        }
    }

    pub fn insert_to_every(&mut self, position: usize, inserted: &[usize]) {
        for (_, map) in &mut self.entries {
            map.insert(position, inserted);
        }
    }

    pub fn remove_from_every(&mut self, removed: &[usize]) {
        for (_, map) in &mut self.entries {
            map.remove(removed);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| entry == name)
    }
}

impl<M> core::fmt::Debug for MapCollection<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}
