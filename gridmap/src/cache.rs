use alloc::vec::Vec;

/// Derived index spaces, rebuilt from the indexes sequence and the aggregated flags.
///
/// This is a pure function of `(sequence, trimmed, hidden)`: the mapper never patches it in
/// place, it recomputes it with [`IndexCache::compute`] once per structural change.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexCache {
    not_trimmed: Vec<usize>,
    not_hidden: Vec<usize>,
    renderable: Vec<usize>,
    // Inverse lookups, indexed by physical index.
    visual_of: Vec<Option<usize>>,
    renderable_of: Vec<Option<usize>>,
}

impl IndexCache {
    /// Missing flags (e.g. no trimming map registered) count as `false`.
    pub fn compute(sequence: &[usize], trimmed: &[bool], hidden: &[bool]) -> Self {
        let is_trimmed = |physical: usize| trimmed.get(physical).copied().unwrap_or(false);
        let is_hidden = |physical: usize| hidden.get(physical).copied().unwrap_or(false);

        let mut cache = Self {
            not_trimmed: Vec::with_capacity(sequence.len()),
            not_hidden: Vec::with_capacity(sequence.len()),
            renderable: Vec::with_capacity(sequence.len()),
            visual_of: alloc::vec![None; sequence.len()],
            renderable_of: alloc::vec![None; sequence.len()],
        };

        for &physical in sequence {
            let trimmed = is_trimmed(physical);
            let hidden = is_hidden(physical);

            if !trimmed {
                if let Some(slot) = cache.visual_of.get_mut(physical) {
                    *slot = Some(cache.not_trimmed.len());
                }
                cache.not_trimmed.push(physical);
            }
            if !hidden {
                cache.not_hidden.push(physical);
            }
            if !trimmed && !hidden {
                if let Some(slot) = cache.renderable_of.get_mut(physical) {
                    *slot = Some(cache.renderable.len());
                }
                cache.renderable.push(physical);
            }
        }

        cache
    }

    /// Physical indexes in visual order, excluding trimmed ones. Position = visual index.
    pub fn not_trimmed(&self) -> &[usize] {
        &self.not_trimmed
    }

    /// Physical indexes in sequence order, excluding hidden ones.
    pub fn not_hidden(&self) -> &[usize] {
        &self.not_hidden
    }

    /// Physical indexes that are neither trimmed nor hidden. Position = renderable index.
    pub fn renderable(&self) -> &[usize] {
        &self.renderable
    }

    pub fn visual_of(&self, physical: usize) -> Option<usize> {
        self.visual_of.get(physical).copied().flatten()
    }

    pub fn renderable_of(&self, physical: usize) -> Option<usize> {
        self.renderable_of.get(physical).copied().flatten()
    }
}
