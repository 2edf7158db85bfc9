use alloc::string::String;

use gridmap::{IndexMap, IndexMapper, Result};

/// Per-row or per-column sizes (e.g. manual column widths), keyed by physical index.
///
/// `None` means "no explicit size"; [`SizeMap::effective_size`] falls back to the default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeMap {
    name: String,
    default_size: u32,
}

impl SizeMap {
    pub fn register(
        mapper: &mut IndexMapper,
        name: impl Into<String>,
        default_size: u32,
    ) -> Result<Self> {
        let name = name.into();
        mapper.register_map(name.as_str(), IndexMap::new(None::<u32>))?;
        pdebug!(name = name.as_str(), default_size, "SizeMap::register");
        Ok(Self { name, default_size })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    /// Explicit size of `visual`, if one was set.
    pub fn size(&self, mapper: &IndexMapper, visual: usize) -> Option<u32> {
        let physical = mapper.physical_from_visual(visual)?;
        mapper
            .map::<Option<u32>>(&self.name)?
            .value_at(physical)
            .copied()
            .flatten()
    }

    pub fn effective_size(&self, mapper: &IndexMapper, visual: usize) -> u32 {
        self.size(mapper, visual).unwrap_or(self.default_size)
    }

    /// Returns `false` when `visual` is out of range.
    pub fn set_size(&self, mapper: &mut IndexMapper, visual: usize, size: u32) -> Result<bool> {
        self.store(mapper, visual, Some(size))
    }

    pub fn clear_size(&self, mapper: &mut IndexMapper, visual: usize) -> Result<bool> {
        self.store(mapper, visual, None)
    }

    /// Sum of the effective sizes of every renderable index.
    pub fn renderable_total(&self, mapper: &IndexMapper) -> u64 {
        let map = mapper.map::<Option<u32>>(&self.name);
        mapper
            .renderable_indexes()
            .iter()
            .map(|&physical| {
                u64::from(
                    map.and_then(|map| map.value_at(physical).copied().flatten())
                        .unwrap_or(self.default_size),
                )
            })
            .sum()
    }

    pub fn disable(self, mapper: &mut IndexMapper) -> bool {
        mapper.unregister_map(&self.name)
    }

    fn store(&self, mapper: &mut IndexMapper, visual: usize, size: Option<u32>) -> Result<bool> {
        let Some(physical) = mapper.physical_from_visual(visual) else {
            return Ok(false);
        };
        mapper.update_map::<Option<u32>, _>(&self.name, |map| {
            if map.value_at(physical) != Some(&size) {
                map.set_value_at(physical, size);
            }
            true
        })
    }
}
