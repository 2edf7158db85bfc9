use alloc::string::String;

use crate::MapCategory;

/// Contract violations reported by the index mapper and its maps.
///
/// Lookups that simply have no answer (an out-of-range visual index, a trimmed physical index)
/// return `None` instead; an `Error` always points at a bug in the calling plugin.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A map with this name is already registered in one of the mapper's collections.
    #[error("map with name {name:?} has already been registered")]
    DuplicateName { name: String },

    #[error("map with name {name:?} is not registered")]
    MapNotFound { name: String },

    /// The registered map holds a different value type than the one requested.
    #[error("map with name {name:?} does not hold values of the requested type")]
    TypeMismatch { name: String },

    /// Trimming and hiding maps must hold boolean flags.
    #[error("{category:?} map {name:?} must hold boolean flags")]
    CategoryMismatch { name: String, category: MapCategory },

    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The list passed as an indexes sequence is not a permutation of `0..length`.
    #[error("indexes sequence is not a permutation of 0..{length}")]
    InvalidSequence { length: usize },

    #[error("visual index {index} is out of range (length {length})")]
    VisualIndexOutOfRange { index: usize, length: usize },

    #[error("physical index {index} is out of range (length {length})")]
    PhysicalIndexOutOfRange { index: usize, length: usize },

    #[error("index {index} was given more than once")]
    DuplicateIndex { index: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
