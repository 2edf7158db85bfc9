use alloc::string::String;
use alloc::vec::Vec;

use gridmap::{IndexMap, IndexMapper, Result};

use crate::physical_indexes;

/// Hides rows or columns through a hiding map registered on an [`IndexMapper`].
///
/// Indexes are addressed visually, the way a user picks them, and stored physically so the
/// hidden state follows its row/column through moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HiddenIndexes {
    name: String,
}

impl HiddenIndexes {
    pub const DEFAULT_NAME: &'static str = "hidden";

    pub fn register(mapper: &mut IndexMapper) -> Result<Self> {
        Self::register_with_name(mapper, Self::DEFAULT_NAME)
    }

    pub fn register_with_name(mapper: &mut IndexMapper, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        mapper.register_map(name.as_str(), IndexMap::hiding())?;
        pdebug!(name = name.as_str(), "HiddenIndexes::register");
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hides the given visual indexes. Nothing changes when one of them is out of range.
    pub fn hide(&self, mapper: &mut IndexMapper, visual: &[usize]) -> Result<()> {
        self.set(mapper, visual, true)
    }

    pub fn show(&self, mapper: &mut IndexMapper, visual: &[usize]) -> Result<()> {
        self.set(mapper, visual, false)
    }

    pub fn show_all(&self, mapper: &mut IndexMapper) -> Result<()> {
        mapper.update_map::<bool, _>(&self.name, |map| {
            if map.values().iter().any(|&hidden| hidden) {
                map.clear();
            }
        })
    }

    /// Whether this plugin hides `visual`. Other hiding maps are not consulted.
    pub fn is_hidden(&self, mapper: &IndexMapper, visual: usize) -> bool {
        let Some(physical) = mapper.physical_from_visual(visual) else {
            return false;
        };
        mapper
            .map::<bool>(&self.name)
            .and_then(|map| map.value_at(physical).copied())
            .unwrap_or(false)
    }

    /// Visual indexes hidden by this plugin, ascending.
    pub fn hidden_indexes(&self, mapper: &IndexMapper) -> Vec<usize> {
        let Some(map) = mapper.map::<bool>(&self.name) else {
            return Vec::new();
        };
        mapper
            .not_trimmed_indexes()
            .iter()
            .enumerate()
            .filter(|&(_, &physical)| map.value_at(physical).copied().unwrap_or(false))
            .map(|(visual, _)| visual)
            .collect()
    }

    /// Unregisters the map, showing everything it hid.
    pub fn disable(self, mapper: &mut IndexMapper) -> bool {
        mapper.unregister_map(&self.name)
    }

    fn set(&self, mapper: &mut IndexMapper, visual: &[usize], hidden: bool) -> Result<()> {
        let physical = physical_indexes(mapper, visual)?;
        mapper.update_map::<bool, _>(&self.name, |map| {
            for index in physical {
                if map.value_at(index) != Some(&hidden) {
                    map.set_value_at(index, hidden);
                }
            }
        })
    }
}
