use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::Any;
use core::ops::{Deref, DerefMut};

use crate::registry::NameRegistry;
use crate::{
    AggregatedCollection, AnyIndexMap, CacheChanges, ChangeSource, Direction, Error, IndexCache,
    IndexMap, IndexMapperOptions, MapCategory, MapChange, MapCollection, Result, any_true,
};

#[derive(Clone, Debug)]
enum PendingEvent {
    Change {
        source: ChangeSource,
        name: Option<String>,
    },
    Init,
}

/// The translation authority between physical, visual and renderable indexes of one axis.
///
/// The mapper owns:
/// - the indexes sequence (physical indexes in visual order, before trimming/hiding)
/// - a trimming and a hiding [`AggregatedCollection`] whose members are OR-ed together
/// - a collection of arbitrary value maps carried along during CRUD
///
/// Every mutating entry point leaves the cache consistent before returning, batched or not.
/// A batch only holds back the notifications until the outermost batch ends. Callbacks run
/// after the cache is rebuilt and
/// receive `&IndexMapper`, so they always observe a consistent state and cannot mutate the
/// mapper re-entrantly.
pub struct IndexMapper {
    options: IndexMapperOptions,
    indexes_sequence: IndexMap<usize>,
    trimming: AggregatedCollection<bool>,
    hiding: AggregatedCollection<bool>,
    values: MapCollection<Box<dyn AnyIndexMap>>,
    names: NameRegistry,
    cache: IndexCache,

    batch_depth: usize,
    changes: CacheChanges,
    pending: Vec<PendingEvent>,
}

impl Default for IndexMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexMapper {
    /// Creates an empty mapper (no indexes, no maps).
    pub fn new() -> Self {
        Self::with_options(IndexMapperOptions::default())
    }

    /// Creates a mapper from options.
    ///
    /// If `options.initial_length` is non-zero, the mapper is initialized to that length
    /// immediately (firing `on_init`).
    pub fn with_options(options: IndexMapperOptions) -> Self {
        gdebug!(
            initial_length = options.initial_length,
            "IndexMapper::new"
        );
        let initial_length = options.initial_length;
        let mut mapper = Self {
            options,
            indexes_sequence: IndexMap::indexes_sequence(),
            trimming: AggregatedCollection::new(any_true, false),
            hiding: AggregatedCollection::new(any_true, false),
            values: MapCollection::new(),
            names: NameRegistry::default(),
            cache: IndexCache::default(),
            batch_depth: 0,
            changes: CacheChanges::default(),
            pending: Vec::new(),
        };
        if initial_length > 0 {
            mapper.init_to_length(initial_length);
        }
        mapper
    }

    pub fn options(&self) -> &IndexMapperOptions {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&IndexMapper, MapChange<'_>) + Send + Sync + 'static>,
    ) {
        self.options = core::mem::take(&mut self.options).with_on_change(on_change);
    }

    pub fn set_on_cache_updated(
        &mut self,
        on_cache_updated: Option<impl Fn(&IndexMapper, CacheChanges) + Send + Sync + 'static>,
    ) {
        self.options = core::mem::take(&mut self.options).with_on_cache_updated(on_cache_updated);
    }

    pub fn set_on_init(&mut self, on_init: Option<impl Fn(&IndexMapper) + Send + Sync + 'static>) {
        self.options = core::mem::take(&mut self.options).with_on_init(on_init);
    }

    // ---------------------------------------------------------------------------------------
    // Batching
    // ---------------------------------------------------------------------------------------

    pub fn is_batched(&self) -> bool {
        self.batch_depth > 0
    }

    /// Defers `on_cache_updated`, `on_change` and `on_init` until the matching
    /// [`IndexMapper::end_batch`]. Getters keep reflecting the current state inside the batch.
    ///
    /// Batches nest; only the outermost `end_batch` notifies.
    pub fn begin_batch(&mut self) {
        self.batch_depth = self.batch_depth.saturating_add(1);
    }

    pub fn end_batch(&mut self) {
        debug_assert!(self.batch_depth > 0, "end_batch without begin_batch");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        self.settle();
    }

    /// Runs `f` as one batch: `on_cache_updated` fires at most once, after `f` returns.
    ///
    /// When called inside another batch, nothing is announced until that outer batch ends.
    pub fn execute_batch_operations<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_batch();
        let result = f(self);
        self.end_batch();
        result
    }

    /// Starts a batch that ends when the returned guard is dropped.
    pub fn batch(&mut self) -> BatchGuard<'_> {
        self.begin_batch();
        BatchGuard { mapper: self }
    }

    /// Rebuilds the cache if anything structural changed and no batch is open.
    pub fn update_cache(&mut self) {
        if self.batch_depth == 0 && self.changes.any() {
            self.rebuild_cache();
        }
    }

    /// Unconditionally recomputes the aggregated flags and every derived index list.
    pub fn rebuild_cache(&mut self) {
        self.recompute_layout();
        let changes = core::mem::take(&mut self.changes);
        gtrace!(
            indexes_sequence = changes.indexes_sequence,
            trimmed = changes.trimmed,
            hidden = changes.hidden,
            not_trimmed = self.cache.not_trimmed().len(),
            renderable = self.cache.renderable().len(),
            "IndexMapper::rebuild_cache"
        );
        if let Some(cb) = &self.options.on_cache_updated {
            cb(self, changes);
        }
    }

    fn recompute_layout(&mut self) {
        self.trimming.update_cache();
        self.hiding.update_cache();
        self.cache = IndexCache::compute(
            self.indexes_sequence.values(),
            self.trimming.merged_values(),
            self.hiding.merged_values(),
        );
    }

    /// Inside a batch the layout is still recomputed after every structural change, so reads
    /// see the current state. Only the pending change flags and the notifications wait for
    /// the outermost batch to end.
    fn settle(&mut self) {
        if self.batch_depth > 0 {
            if self.changes.any() {
                self.recompute_layout();
            }
            return;
        }
        self.update_cache();
        self.flush_events();
    }

    fn flush_events(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let pending = core::mem::take(&mut self.pending);
        for event in &pending {
            match event {
                PendingEvent::Change { source, name } => {
                    if let Some(cb) = &self.options.on_change {
                        cb(
                            self,
                            MapChange {
                                source: *source,
                                name: name.as_deref(),
                            },
                        );
                    }
                }
                PendingEvent::Init => {
                    if let Some(cb) = &self.options.on_init {
                        cb(self);
                    }
                }
            }
        }
    }

    fn record(&mut self, source: ChangeSource, name: Option<&str>) {
        self.changes.mark(source);
        self.pending.push(PendingEvent::Change {
            source,
            name: name.map(ToString::to_string),
        });
    }

    /// Records a change of the sequence and of every registered map.
    fn record_every(&mut self) {
        self.record(ChangeSource::IndexesSequence, None);
        let changed: Vec<(ChangeSource, String)> = self
            .trimming
            .maps()
            .names()
            .map(|name| (MapCategory::Trimming, name))
            .chain(
                self.hiding
                    .maps()
                    .names()
                    .map(|name| (MapCategory::Hiding, name)),
            )
            .chain(self.values.names().map(|name| (MapCategory::Generic, name)))
            .map(|(category, name)| (ChangeSource::Collection(category), name.to_string()))
            .collect();
        for (source, name) in &changed {
            self.record(*source, Some(name.as_str()));
        }
    }

    // ---------------------------------------------------------------------------------------
    // Map registration
    // ---------------------------------------------------------------------------------------

    /// Registers `map` under a name that must be unique across all categories.
    ///
    /// The map goes into the trimming, hiding or value collection according to its
    /// [`MapCategory`], and is immediately initialized to the current number of indexes so it
    /// is never out of step with its siblings.
    pub fn register_map<T: Clone + 'static>(
        &mut self,
        name: impl Into<String>,
        mut map: IndexMap<T>,
    ) -> Result<&IndexMap<T>> {
        let name = name.into();
        let category = map.category();
        self.names.claim(&name, category)?;

        let length = self.number_of_indexes();
        map.init(length);
        gdebug!(
            name = name.as_str(),
            ?category,
            length,
            "IndexMapper::register_map"
        );

        let registered = match category {
            MapCategory::Generic => self
                .values
                .register(name.as_str(), Box::new(map) as Box<dyn AnyIndexMap>)
                .map(|_| ()),
            MapCategory::Trimming | MapCategory::Hiding => into_flags(map, &name, category)
                .and_then(|flags| {
                    self.flags_mut(category)
                        .register(name.as_str(), flags)
                        .map(|_| ())
                }),
        };
        if let Err(err) = registered {
            self.names.release(&name);
            return Err(err);
        }

        if length > 0 {
            self.record(ChangeSource::Collection(category), Some(name.as_str()));
            self.settle();
        }

        self.map::<T>(&name).ok_or(Error::MapNotFound { name })
    }

    /// Removes the map registered under `name`. Returns `false` when no such map exists.
    pub fn unregister_map(&mut self, name: &str) -> bool {
        let Some(category) = self.names.release(name) else {
            return false;
        };
        gdebug!(name, ?category, "IndexMapper::unregister_map");
        match category {
            MapCategory::Generic => {
                self.values.unregister(name);
            }
            MapCategory::Trimming | MapCategory::Hiding => {
                self.flags_mut(category).unregister(name);
                self.changes.mark(ChangeSource::Collection(category));
                self.settle();
            }
        }
        true
    }

    /// Number of maps registered across all collections.
    pub fn registered_maps(&self) -> usize {
        self.names.len()
    }

    pub fn map_category(&self, name: &str) -> Option<MapCategory> {
        self.names.category_of(name)
    }

    /// Typed read access to a registered map.
    pub fn map<T: 'static>(&self, name: &str) -> Option<&IndexMap<T>> {
        let any: &dyn Any = match self.names.category_of(name)? {
            MapCategory::Trimming => self.trimming.get(name)?,
            MapCategory::Hiding => self.hiding.get(name)?,
            MapCategory::Generic => self.values.get(name)?.as_any(),
        };
        any.downcast_ref::<IndexMap<T>>()
    }

    /// Mutates a registered map through `f`.
    ///
    /// This is the only way to change a map after registration. When `f` changed the map, the
    /// affected caches are rebuilt (unless a batch is open) and `on_change` fires. A map whose
    /// length `f` changed is restored to its previous state and [`Error::LengthMismatch`] is
    /// returned.
    pub fn update_map<T: Clone + 'static, R>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut IndexMap<T>) -> R,
    ) -> Result<R> {
        let category = self
            .names
            .category_of(name)
            .ok_or_else(|| Error::MapNotFound {
                name: name.to_string(),
            })?;
        let expected_length = self.number_of_indexes();
        let map = self.map_mut::<T>(name, category)?;

        let backup = map.clone();
        let result = f(map);
        if map.len() != expected_length {
            let actual = map.len();
            *map = backup;
            gwarn!(
                name = name,
                expected = expected_length,
                actual,
                "IndexMapper::update_map: map length changed, update reverted"
            );
            return Err(Error::LengthMismatch {
                expected: expected_length,
                actual,
            });
        }
        let changed = map.revision() != backup.revision();

        if changed {
            self.record(ChangeSource::Collection(category), Some(name));
            self.settle();
        }
        Ok(result)
    }

    fn map_mut<T: 'static>(
        &mut self,
        name: &str,
        category: MapCategory,
    ) -> Result<&mut IndexMap<T>> {
        let any: Option<&mut dyn Any> = match category {
            MapCategory::Trimming => self
                .trimming
                .maps_mut()
                .get_mut(name)
                .map(|map| map as &mut dyn Any),
            MapCategory::Hiding => self
                .hiding
                .maps_mut()
                .get_mut(name)
                .map(|map| map as &mut dyn Any),
            MapCategory::Generic => self.values.get_mut(name).map(|map| map.as_any_mut()),
        };
        any.ok_or_else(|| Error::MapNotFound {
            name: name.to_string(),
        })?
        .downcast_mut::<IndexMap<T>>()
        .ok_or_else(|| Error::TypeMismatch {
            name: name.to_string(),
        })
    }

    fn flags_mut(&mut self, category: MapCategory) -> &mut AggregatedCollection<bool> {
        match category {
            MapCategory::Hiding => &mut self.hiding,
            _ => &mut self.trimming,
        }
    }

    pub fn trimming_collection(&self) -> &AggregatedCollection<bool> {
        &self.trimming
    }

    pub fn hiding_collection(&self) -> &AggregatedCollection<bool> {
        &self.hiding
    }

    pub fn value_collection(&self) -> &MapCollection<Box<dyn AnyIndexMap>> {
        &self.values
    }

    // ---------------------------------------------------------------------------------------
    // Translation
    // ---------------------------------------------------------------------------------------

    /// Physical index shown at `visual`, or `None` past the not-trimmed range.
    pub fn physical_from_visual(&self, visual: usize) -> Option<usize> {
        self.cache.not_trimmed().get(visual).copied()
    }

    pub fn physical_from_renderable(&self, renderable: usize) -> Option<usize> {
        self.cache.renderable().get(renderable).copied()
    }

    /// Visual index of `physical`, or `None` when it is trimmed or does not exist.
    pub fn visual_from_physical(&self, physical: usize) -> Option<usize> {
        self.cache.visual_of(physical)
    }

    pub fn visual_from_renderable(&self, renderable: usize) -> Option<usize> {
        self.physical_from_renderable(renderable)
            .and_then(|physical| self.visual_from_physical(physical))
    }

    /// Renderable index of `visual`, or `None` when it is out of range or hidden.
    ///
    /// Equals `visual` minus the number of hidden indexes at or before it.
    pub fn renderable_from_visual(&self, visual: usize) -> Option<usize> {
        let physical = self.physical_from_visual(visual)?;
        self.cache.renderable_of(physical)
    }

    /// Walks from `from_visual` in `direction` until it finds a visual index that is not
    /// hidden. `from_visual` itself is returned when it is not hidden.
    ///
    /// Returns `None` when the walk leaves the not-trimmed range.
    pub fn first_not_hidden_index(
        &self,
        from_visual: usize,
        direction: Direction,
    ) -> Option<usize> {
        let mut visual = from_visual;
        loop {
            let physical = self.physical_from_visual(visual)?;
            if !self.is_hidden(physical) {
                return Some(visual);
            }
            visual = direction.step(visual)?;
        }
    }

    /// Like [`IndexMapper::first_not_hidden_index`], but searches the opposite direction when
    /// nothing is found in `direction`.
    pub fn nearest_not_hidden_index(
        &self,
        from_visual: usize,
        direction: Direction,
    ) -> Option<usize> {
        self.first_not_hidden_index(from_visual, direction)
            .or_else(|| self.first_not_hidden_index(from_visual, direction.reverse()))
    }

    pub fn is_trimmed(&self, physical: usize) -> bool {
        self.trimming.merged_value_at(physical)
    }

    pub fn is_hidden(&self, physical: usize) -> bool {
        self.hiding.merged_value_at(physical)
    }

    // ---------------------------------------------------------------------------------------
    // Index lists
    // ---------------------------------------------------------------------------------------

    pub fn indexes_sequence(&self) -> &[usize] {
        self.indexes_sequence.values()
    }

    /// Replaces the visual order. `indexes` must be a permutation of `0..number_of_indexes`.
    pub fn set_indexes_sequence(&mut self, indexes: Vec<usize>) -> Result<()> {
        let length = self.number_of_indexes();
        if !is_permutation(&indexes, length) {
            gwarn!(length, "IndexMapper::set_indexes_sequence: not a permutation");
            return Err(Error::InvalidSequence { length });
        }
        self.indexes_sequence.set_values(indexes)?;
        self.record(ChangeSource::IndexesSequence, None);
        self.settle();
        Ok(())
    }

    pub fn number_of_indexes(&self) -> usize {
        self.indexes_sequence.len()
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// Physical indexes in visual order, skipping trimmed ones. Position = visual index.
    pub fn not_trimmed_indexes(&self) -> &[usize] {
        self.cache.not_trimmed()
    }

    pub fn not_trimmed_indexes_length(&self) -> usize {
        self.cache.not_trimmed().len()
    }

    /// Physical indexes in sequence order, skipping hidden ones.
    pub fn not_hidden_indexes(&self) -> &[usize] {
        self.cache.not_hidden()
    }

    pub fn not_hidden_indexes_length(&self) -> usize {
        self.cache.not_hidden().len()
    }

    /// Physical indexes that may be painted. Position = renderable index.
    pub fn renderable_indexes(&self) -> &[usize] {
        self.cache.renderable()
    }

    pub fn renderable_indexes_length(&self) -> usize {
        self.cache.renderable().len()
    }

    /// Recomputes the not-trimmed list from the maps, bypassing every cache.
    pub fn compute_not_trimmed_indexes(&self) -> Vec<usize> {
        let trimmed = self.trimming.compute_merged_values();
        filter_sequence(self.indexes_sequence(), |physical| !flag(&trimmed, physical))
    }

    /// Recomputes the not-hidden list from the maps, bypassing every cache.
    pub fn compute_not_hidden_indexes(&self) -> Vec<usize> {
        let hidden = self.hiding.compute_merged_values();
        filter_sequence(self.indexes_sequence(), |physical| !flag(&hidden, physical))
    }

    /// Recomputes the renderable list from the maps, bypassing every cache.
    pub fn compute_renderable_indexes(&self) -> Vec<usize> {
        let trimmed = self.trimming.compute_merged_values();
        let hidden = self.hiding.compute_merged_values();
        filter_sequence(self.indexes_sequence(), |physical| {
            !flag(&trimmed, physical) && !flag(&hidden, physical)
        })
    }

    // ---------------------------------------------------------------------------------------
    // CRUD
    // ---------------------------------------------------------------------------------------

    /// Resets the sequence to `0..length` and every registered map to its initial values.
    ///
    /// The cache is rebuilt once and `on_init` fires once; no per-map `on_change` is raised.
    pub fn init_to_length(&mut self, length: usize) {
        gdebug!(length, "IndexMapper::init_to_length");
        self.begin_batch();
        self.indexes_sequence.init(length);
        self.trimming.init_every(length);
        self.hiding.init_every(length);
        self.values.init_every(length);
        self.changes = CacheChanges {
            indexes_sequence: true,
            trimmed: true,
            hidden: true,
        };
        self.pending.push(PendingEvent::Init);
        self.end_batch();
    }

    /// Moves the rows/columns at `moved` visual indexes so they form a contiguous block
    /// starting at `final_index`, keeping the order in which they were given.
    ///
    /// Both `moved` and `final_index` are visual indexes, resolved against the current state.
    /// A destination that would push the block past the end places it at the end. Moving
    /// never changes which indexes are trimmed or hidden.
    pub fn move_indexes(&mut self, moved: &[usize], final_index: usize) -> Result<()> {
        if moved.is_empty() {
            return Ok(());
        }
        let sequence = {
            let not_trimmed = self.cache.not_trimmed();
            let mut is_moved = alloc::vec![false; self.number_of_indexes()];
            let mut physical_moved = Vec::with_capacity(moved.len());

            for &visual in moved {
                let physical =
                    not_trimmed
                        .get(visual)
                        .copied()
                        .ok_or(Error::VisualIndexOutOfRange {
                            index: visual,
                            length: not_trimmed.len(),
                        })?;
                if core::mem::replace(&mut is_moved[physical], true) {
                    return Err(Error::DuplicateIndex { index: visual });
                }
                physical_moved.push(physical);
            }

            let mut sequence: Vec<usize> = self
                .indexes_sequence()
                .iter()
                .copied()
                .filter(|&physical| !is_moved[physical])
                .collect();

            // Past the end (counting the moved block itself) means "append".
            let destination = if final_index.saturating_add(moved.len()) < not_trimmed.len() {
                sequence
                    .iter()
                    .enumerate()
                    .filter(|&(_, &physical)| self.cache.visual_of(physical).is_some())
                    .nth(final_index)
                    .map(|(position, _)| position)
            } else {
                None
            };
            let destination = destination.unwrap_or(sequence.len());
            gtrace!(
                moved = moved.len(),
                final_index,
                destination,
                "IndexMapper::move_indexes"
            );
            sequence.splice(destination..destination, physical_moved);
            sequence
        };

        self.indexes_sequence.set_values(sequence)?;
        self.record(ChangeSource::IndexesSequence, None);
        self.settle();
        Ok(())
    }

    /// Inserts `amount` new indexes at `first_visual` (appends when past the end).
    ///
    /// The new physical indexes take over the physical index found at the insertion point and
    /// every existing physical index at or above it shifts up, so physical indexes stay dense.
    pub fn insert_indexes(&mut self, first_visual: usize, amount: usize) {
        if amount == 0 {
            return;
        }
        let length = self.number_of_indexes();
        if length.checked_add(amount).is_none() {
            gwarn!(length, amount, "IndexMapper::insert_indexes: length overflow");
            return;
        }
        let at_visual = self.cache.not_trimmed().get(first_visual).copied();
        let first_physical = at_visual.unwrap_or(length);
        let position = at_visual
            .and_then(|physical| {
                self.indexes_sequence()
                    .iter()
                    .position(|&value| value == physical)
            })
            .unwrap_or(length);
        let inserted: Vec<usize> = (first_physical..first_physical + amount).collect();

        gdebug!(
            first_visual,
            amount,
            first_physical,
            position,
            "IndexMapper::insert_indexes"
        );
        self.execute_batch_operations(|mapper| {
            mapper.indexes_sequence.insert(position, &inserted);
            mapper.trimming.insert_to_every(position, &inserted);
            mapper.hiding.insert_to_every(position, &inserted);
            mapper.values.insert_to_every(position, &inserted);
            mapper.record_every();
        });
    }

    /// Removes the given physical indexes from the sequence and from every registered map.
    ///
    /// Remaining physical indexes above a removed one shift down. Order and duplicates in
    /// `removed` do not matter.
    pub fn remove_indexes(&mut self, removed: &[usize]) -> Result<()> {
        let length = self.number_of_indexes();
        if let Some(&index) = removed.iter().find(|&&index| index >= length) {
            gwarn!(index, length, "IndexMapper::remove_indexes: out of range");
            return Err(Error::PhysicalIndexOutOfRange { index, length });
        }
        if removed.is_empty() {
            return Ok(());
        }
        let mut removed = removed.to_vec();
        removed.sort_unstable();
        removed.dedup();

        gdebug!(removed = removed.len(), "IndexMapper::remove_indexes");
        self.execute_batch_operations(|mapper| {
            mapper.indexes_sequence.remove(&removed);
            mapper.trimming.remove_from_every(&removed);
            mapper.hiding.remove_from_every(&removed);
            mapper.values.remove_from_every(&removed);
            mapper.record_every();
        });
        Ok(())
    }
}

impl core::fmt::Debug for IndexMapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexMapper")
            .field("indexes_sequence", &self.indexes_sequence.values())
            .field("trimming", &self.trimming.maps())
            .field("hiding", &self.hiding.maps())
            .field("values", &self.values)
            .field("cache", &self.cache)
            .field("batch_depth", &self.batch_depth)
            .finish_non_exhaustive()
    }
}

/// Keeps a batch open on an [`IndexMapper`] until dropped.
#[derive(Debug)]
pub struct BatchGuard<'a> {
    mapper: &'a mut IndexMapper,
}

impl Deref for BatchGuard<'_> {
    type Target = IndexMapper;

    fn deref(&self) -> &IndexMapper {
        self.mapper
    }
}

impl DerefMut for BatchGuard<'_> {
    fn deref_mut(&mut self) -> &mut IndexMapper {
        self.mapper
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.mapper.end_batch();
    }
}

fn into_flags<T: 'static>(
    map: IndexMap<T>,
    name: &str,
    category: MapCategory,
) -> Result<IndexMap<bool>> {
    let any: Box<dyn Any> = Box::new(map);
    any.downcast::<IndexMap<bool>>()
        .map(|flags| *flags)
        .map_err(|_| Error::CategoryMismatch {
            name: name.to_string(),
            category,
        })
}

fn flag(flags: &[bool], physical: usize) -> bool {
    flags.get(physical).copied().unwrap_or(false)
}

fn filter_sequence(sequence: &[usize], keep: impl Fn(usize) -> bool) -> Vec<usize> {
    sequence
        .iter()
        .copied()
        .filter(|&physical| keep(physical))
        .collect()
}

fn is_permutation(indexes: &[usize], length: usize) -> bool {
    if indexes.len() != length {
        return false;
    }
    let mut seen = alloc::vec![false; length];
    indexes.iter().all(|&index| match seen.get_mut(index) {
        Some(slot) if !*slot => {
            *slot = true;
            true
        }
        _ => false,
    })
}
