use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::{Error, MapCategory, Result};

#[cfg(feature = "std")]
type NameMap = HashMap<String, MapCategory>;
#[cfg(not(feature = "std"))]
type NameMap = BTreeMap<String, MapCategory>;

/// Map names are unique across all of the mapper's collections, not per collection.
#[derive(Clone, Debug, Default)]
pub(crate) struct NameRegistry {
    names: NameMap,
}

impl NameRegistry {
    pub(crate) fn claim(&mut self, name: &str, category: MapCategory) -> Result<()> {
        if self.names.contains_key(name) {
            gwarn!(name, "map name already registered");
            return Err(Error::DuplicateName {
                name: name.to_string(),
            });
        }
        self.names.insert(name.to_string(), category);
        Ok(())
    }

    pub(crate) fn release(&mut self, name: &str) -> Option<MapCategory> {
        self.names.remove(name)
    }

    pub(crate) fn category_of(&self, name: &str) -> Option<MapCategory> {
        self.names.get(name).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}
