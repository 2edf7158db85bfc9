use alloc::vec::Vec;

/// How an [`crate::IndexMap`] reacts to physical indexes being inserted or removed.
///
/// The policy is a pair of plain functions so it can be unit-tested in isolation and swapped
/// without subclassing the map:
/// - `insert(values, position, inserted, fill)` receives the sequence position chosen by the
///   mapper, the (contiguous, ascending) inserted physical indexes and a filler producing the
///   initial value for a given physical index.
/// - `remove(values, removed)` receives the removed physical indexes, sorted and de-duplicated.
pub struct Renumbering<T> {
    insert: RenumberInsertFn<T>,
    remove: RenumberRemoveFn<T>,
}

pub type RenumberInsertFn<T> = fn(&mut Vec<T>, usize, &[usize], &dyn Fn(usize) -> T);
pub type RenumberRemoveFn<T> = fn(&mut Vec<T>, &[usize]);

impl<T> Clone for Renumbering<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Renumbering<T> {}

impl<T> core::fmt::Debug for Renumbering<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Renumbering(..)")
    }
}

impl<T> Renumbering<T> {
    /// Creates a custom policy.
    pub fn new(insert: RenumberInsertFn<T>, remove: RenumberRemoveFn<T>) -> Self {
        Self { insert, remove }
    }

    /// Values keyed by physical index.
    ///
    /// New entries are spliced in at the first inserted physical index; removal deletes the
    /// entries stored at the removed positions. Values themselves are never rewritten.
    pub fn physical() -> Self {
        Self {
            insert: insert_physically::<T>,
            remove: remove_physically::<T>,
        }
    }

    pub(crate) fn insert(
        &self,
        values: &mut Vec<T>,
        position: usize,
        inserted: &[usize],
        fill: &dyn Fn(usize) -> T,
    ) {
        (self.insert)(values, position, inserted, fill);
    }

    pub(crate) fn remove(&self, values: &mut Vec<T>, removed: &[usize]) {
        (self.remove)(values, removed);
    }
}

impl Renumbering<usize> {
    /// The sequence of physical indexes in visual order.
    ///
    /// Values point at physical indexes, so existing values are shifted around the inserted or
    /// removed ones and the inserted indexes themselves are placed at `position`.
    pub fn sequence() -> Self {
        Self {
            insert: insert_sequence,
            remove: remove_sequence,
        }
    }

    /// Storage keyed by physical index whose values also point at physical indexes.
    ///
    /// Used for secondary structures (e.g. header-to-row bindings) that must keep pointing at
    /// the same row after rows above it are inserted or removed.
    pub fn loose_binds() -> Self {
        Self {
            insert: insert_loose_binds,
            remove: remove_loose_binds,
        }
    }
}

pub(crate) fn insert_physically<T>(
    values: &mut Vec<T>,
    _position: usize,
    inserted: &[usize],
    fill: &dyn Fn(usize) -> T,
) {
    let Some(&first) = inserted.first() else {
        return;
    };
    let at = first.min(values.len());
    values.splice(at..at, inserted.iter().map(|&index| fill(index)));
}

pub(crate) fn remove_physically<T>(values: &mut Vec<T>, removed: &[usize]) {
    if removed.is_empty() {
        return;
    }
    let mut position = 0usize;
    values.retain(|_| {
        let keep = removed.binary_search(&position).is_err();
        position += 1;
        keep
    });
}

pub(crate) fn insert_sequence(
    values: &mut Vec<usize>,
    position: usize,
    inserted: &[usize],
    _fill: &dyn Fn(usize) -> usize,
) {
    if inserted.is_empty() {
        return;
    }
    increase_indexes(values, inserted);
    let at = position.min(values.len());
    values.splice(at..at, inserted.iter().copied());
}

pub(crate) fn remove_sequence(values: &mut Vec<usize>, removed: &[usize]) {
    if removed.is_empty() {
        return;
    }
    values.retain(|value| removed.binary_search(value).is_err());
    decrease_indexes(values, removed);
}

pub(crate) fn insert_loose_binds(
    values: &mut Vec<usize>,
    position: usize,
    inserted: &[usize],
    fill: &dyn Fn(usize) -> usize,
) {
    increase_indexes(values, inserted);
    insert_physically(values, position, inserted, fill);
}

pub(crate) fn remove_loose_binds(values: &mut Vec<usize>, removed: &[usize]) {
    remove_physically(values, removed);
    decrease_indexes(values, removed);
}

/// Shifts every value at or above the first inserted index by the number of inserted indexes.
pub(crate) fn increase_indexes(values: &mut [usize], inserted: &[usize]) {
    let Some(&first) = inserted.first() else {
        return;
    };
    let amount = inserted.len();
    for value in values.iter_mut().filter(|value| **value >= first) {
        *value += amount;
    }
}

/// Shifts every value down by the number of removed indexes below it. `removed` must be sorted.
pub(crate) fn decrease_indexes(values: &mut [usize], removed: &[usize]) {
    for value in values.iter_mut() {
        let below = removed.partition_point(|&index| index < *value);
        *value = value.saturating_sub(below);
    }
}
