/// The collection a map is registered into.
///
/// The category is fixed when the map is constructed (see [`crate::IndexMap::trimming`] and
/// [`crate::IndexMap::hiding`]); everything else is [`MapCategory::Generic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapCategory {
    /// Excluded from data iteration and rendering.
    Trimming,
    /// Excluded from rendering only.
    Hiding,
    /// Values carried along with physical indexes (sizes, metadata).
    Generic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Moves `index` one step in this direction, or `None` when that leaves `usize`.
    pub fn step(self, index: usize) -> Option<usize> {
        match self {
            Self::Forward => index.checked_add(1),
            Self::Backward => index.checked_sub(1),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Which parts of the structural state changed since the previous cache rebuild.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheChanges {
    pub indexes_sequence: bool,
    pub trimmed: bool,
    pub hidden: bool,
}

impl CacheChanges {
    pub fn any(&self) -> bool {
        self.indexes_sequence || self.trimmed || self.hidden
    }

    pub(crate) fn mark(&mut self, source: ChangeSource) {
        match source {
            ChangeSource::IndexesSequence => self.indexes_sequence = true,
            ChangeSource::Collection(MapCategory::Trimming) => self.trimmed = true,
            ChangeSource::Collection(MapCategory::Hiding) => self.hidden = true,
            ChangeSource::Collection(MapCategory::Generic) => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeSource {
    IndexesSequence,
    Collection(MapCategory),
}

/// Payload of the `on_change` callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapChange<'a> {
    pub source: ChangeSource,
    /// Name of the changed map; `None` for the indexes sequence.
    pub name: Option<&'a str>,
}
