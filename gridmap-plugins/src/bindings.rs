use alloc::string::String;
use alloc::vec::Vec;

use gridmap::{IndexMap, IndexMapper, Result};

/// Binds row header numbers to rows instead of visual positions.
///
/// Backed by a loose-binds map: after a move a row keeps its header, and inserts or removals
/// above a row renumber its header along with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderBindings {
    name: String,
}

impl HeaderBindings {
    pub const DEFAULT_NAME: &'static str = "header-bindings";

    pub fn register(mapper: &mut IndexMapper) -> Result<Self> {
        Self::register_with_name(mapper, Self::DEFAULT_NAME)
    }

    pub fn register_with_name(mapper: &mut IndexMapper, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        mapper.register_map(name.as_str(), IndexMap::loose_binds())?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header_for_physical(&self, mapper: &IndexMapper, physical: usize) -> Option<usize> {
        mapper
            .map::<usize>(&self.name)?
            .value_at(physical)
            .copied()
    }

    pub fn header_for_visual(&self, mapper: &IndexMapper, visual: usize) -> Option<usize> {
        self.header_for_physical(mapper, mapper.physical_from_visual(visual)?)
    }

    /// Header of every visual index, in visual order.
    pub fn headers(&self, mapper: &IndexMapper) -> Vec<usize> {
        mapper
            .not_trimmed_indexes()
            .iter()
            .filter_map(|&physical| self.header_for_physical(mapper, physical))
            .collect()
    }

    pub fn disable(self, mapper: &mut IndexMapper) -> bool {
        mapper.unregister_map(&self.name)
    }
}
