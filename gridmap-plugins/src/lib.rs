//! Plugin helpers for the `gridmap` crate.
//!
//! `gridmap` only knows about maps and index spaces. Grid features are built on top of it by
//! registering a uniquely named map at enablement and unregistering it at disablement. This
//! crate provides small, framework-neutral versions of the common ones:
//!
//! - [`HiddenIndexes`] / [`TrimmedIndexes`]: hide or trim rows/columns
//! - [`SizeMap`]: per-row/column sizes that follow their index through moves
//! - [`HeaderBindings`]: header numbers bound to rows rather than to visual positions
//! - [`moving`] and [`navigation`]: drag-and-drop moves and keyboard traversal
//! - [`Grid`]: a row and a column mapper translating cell coordinates together
//!
//! Every helper talks to [`gridmap::IndexMapper`] through its public API only.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bindings;
mod grid;
mod hidden;
pub mod moving;
pub mod navigation;
mod sizes;
mod trimmed;


pub use bindings::HeaderBindings;
pub use grid::{CellCoords, Grid};
pub use hidden::HiddenIndexes;
pub use sizes::SizeMap;
pub use trimmed::TrimmedIndexes;

use alloc::vec::Vec;

use gridmap::{Error, IndexMapper, Result};

/// Resolves visual indexes to physical ones, failing on the first one out of range.
pub(crate) fn physical_indexes(mapper: &IndexMapper, visual: &[usize]) -> Result<Vec<usize>> {
    visual
        .iter()
        .map(|&index| {
            mapper
                .physical_from_visual(index)
                .ok_or(Error::VisualIndexOutOfRange {
                    index,
                    length: mapper.not_trimmed_indexes_length(),
                })
        })
        .collect()
}

pub(crate) fn check_physical(mapper: &IndexMapper, physical: &[usize]) -> Result<()> {
    let length = mapper.number_of_indexes();
    match physical.iter().find(|&&index| index >= length) {
        Some(&index) => Err(Error::PhysicalIndexOutOfRange { index, length }),
        None => Ok(()),
    }
}
