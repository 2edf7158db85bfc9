//! A headless index mapper for data grids.
//!
//! For plugin-level helpers (hiding, trimming, sizes, moves, navigation), see the
//! `gridmap-plugins` crate.
//!
//! A grid axis (rows or columns) is addressed in three index spaces:
//! - physical: the stable slot of a row/column in the data source (`0..N`)
//! - visual: the position the user sees after reordering and trimming
//! - renderable: the position used by the paint loop after hiding
//!
//! [`IndexMapper`] owns the sequence of physical indexes plus any number of named
//! [`IndexMap`]s registered by plugins (trimming flags, hiding flags, arbitrary values) and
//! keeps them consistent under insert/remove/move. All translations are served from a cache
//! that is rebuilt once per structural change, so lookups stay O(1) on every paint pass.
//!
//! It is UI-agnostic. A rendering layer is expected to:
//! - call `init_to_length` once the data source length is known
//! - forward row/column CRUD to `insert_indexes` / `remove_indexes` / `move_indexes`
//! - query the translation API while painting
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod aggregated;
mod cache;
mod collection;
mod error;
mod index_map;
mod mapper;
mod options;
mod registry;
mod renumber;
mod types;

#[cfg(test)]
mod tests;

pub use aggregated::{AggregatedCollection, Aggregation, any_true};
pub use cache::IndexCache;
pub use collection::{AnyIndexMap, IndexMapOps, MapCollection};
pub use error::{Error, Result};
pub use index_map::{IndexMap, InitialValue};
pub use mapper::{BatchGuard, IndexMapper};
pub use options::{IndexMapperOptions, OnCacheUpdatedCallback, OnChangeCallback, OnInitCallback};
pub use renumber::{RenumberInsertFn, RenumberRemoveFn, Renumbering};
pub use types::{CacheChanges, ChangeSource, Direction, MapCategory, MapChange};
