use alloc::sync::Arc;

use crate::{CacheChanges, IndexMapper, MapChange};

/// A callback fired after a registered map (or the indexes sequence) changed.
///
/// It runs after the cache has been rebuilt, so the mapper it receives is consistent.
pub type OnChangeCallback = Arc<dyn Fn(&IndexMapper, MapChange<'_>) + Send + Sync>;

/// A callback fired once per cache rebuild, with the kinds of change that triggered it.
pub type OnCacheUpdatedCallback = Arc<dyn Fn(&IndexMapper, CacheChanges) + Send + Sync>;

/// A callback fired after `init_to_length` reseeded every map.
pub type OnInitCallback = Arc<dyn Fn(&IndexMapper) + Send + Sync>;

/// Configuration for [`crate::IndexMapper`].
///
/// Callbacks are stored in `Arc`s so options are cheap to clone.
#[derive(Clone, Default)]
pub struct IndexMapperOptions {
    /// When non-zero, the mapper is initialized to this many indexes on construction.
    pub initial_length: usize,

    pub on_change: Option<OnChangeCallback>,

    pub on_cache_updated: Option<OnCacheUpdatedCallback>,

    pub on_init: Option<OnInitCallback>,
}

impl IndexMapperOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_length(mut self, initial_length: usize) -> Self {
        self.initial_length = initial_length;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&IndexMapper, MapChange<'_>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_cache_updated(
        mut self,
        on_cache_updated: Option<impl Fn(&IndexMapper, CacheChanges) + Send + Sync + 'static>,
    ) -> Self {
        self.on_cache_updated = on_cache_updated.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_init(
        mut self,
        on_init: Option<impl Fn(&IndexMapper) + Send + Sync + 'static>,
    ) -> Self {
        self.on_init = on_init.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for IndexMapperOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexMapperOptions")
            .field("initial_length", &self.initial_length)
            .field("on_change", &self.on_change.is_some())
            .field("on_cache_updated", &self.on_cache_updated.is_some())
            .field("on_init", &self.on_init.is_some())
            .finish()
    }
}
