use alloc::string::String;
use alloc::vec::Vec;

use gridmap::{IndexMap, IndexMapper, Result};

use crate::check_physical;

/// Removes rows or columns from the visual space (e.g. filtered out) without deleting them.
///
/// Trimming is addressed by physical index: once trimmed, an index has no visual index left
/// to address it by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrimmedIndexes {
    name: String,
}

impl TrimmedIndexes {
    pub const DEFAULT_NAME: &'static str = "trimmed";

    pub fn register(mapper: &mut IndexMapper) -> Result<Self> {
        Self::register_with_name(mapper, Self::DEFAULT_NAME)
    }

    pub fn register_with_name(mapper: &mut IndexMapper, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        mapper.register_map(name.as_str(), IndexMap::trimming())?;
        pdebug!(name = name.as_str(), "TrimmedIndexes::register");
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trim(&self, mapper: &mut IndexMapper, physical: &[usize]) -> Result<()> {
        self.set(mapper, physical, true)
    }

    pub fn untrim(&self, mapper: &mut IndexMapper, physical: &[usize]) -> Result<()> {
        self.set(mapper, physical, false)
    }

    pub fn untrim_all(&self, mapper: &mut IndexMapper) -> Result<()> {
        mapper.update_map::<bool, _>(&self.name, |map| {
            if map.values().iter().any(|&trimmed| trimmed) {
                map.clear();
            }
        })
    }

    pub fn is_trimmed(&self, mapper: &IndexMapper, physical: usize) -> bool {
        mapper
            .map::<bool>(&self.name)
            .and_then(|map| map.value_at(physical).copied())
            .unwrap_or(false)
    }

    /// Physical indexes trimmed by this plugin, ascending.
    pub fn trimmed_indexes(&self, mapper: &IndexMapper) -> Vec<usize> {
        mapper
            .map::<bool>(&self.name)
            .map(|map| map.flagged_indexes())
            .unwrap_or_default()
    }

    pub fn disable(self, mapper: &mut IndexMapper) -> bool {
        mapper.unregister_map(&self.name)
    }

    fn set(&self, mapper: &mut IndexMapper, physical: &[usize], trimmed: bool) -> Result<()> {
        check_physical(mapper, physical)?;
        mapper.update_map::<bool, _>(&self.name, |map| {
            for &index in physical {
                if map.value_at(index) != Some(&trimmed) {
                    map.set_value_at(index, trimmed);
                }
            }
        })
    }
}
