//! Drag-and-drop moves of rows or columns.
//!
//! A drop lands *between* two visual indexes: drop index `i` means "in front of the item
//! currently at visual `i`", and `len` means "after the last one". The mapper itself works
//! with the final index the moved block starts at once it has been taken out.

use alloc::vec::Vec;

use gridmap::{IndexMapper, Result};

/// Whether `moved` (visual indexes) can be moved so they start at `final_index`.
///
/// Not possible when nothing is moved, when a moved index is out of range or repeated, or
/// when the block would not fit in front of `final_index`.
pub fn is_move_possible(mapper: &IndexMapper, moved: &[usize], final_index: usize) -> bool {
    let length = mapper.not_trimmed_indexes_length();
    if moved.is_empty() || moved.len() > length {
        return false;
    }
    if final_index > length - moved.len() {
        return false;
    }
    let mut seen = alloc::vec![false; length];
    moved.iter().all(|&index| match seen.get_mut(index) {
        Some(slot) if !*slot => {
            *slot = true;
            true
        }
        _ => false,
    })
}

/// Converts a drop index into the final index for [`move_indexes`].
///
/// Every moved index in front of the drop position shifts the final index back by one, since
/// it is taken out before the block is put back.
pub fn final_index_for_drop(mapper: &IndexMapper, moved: &[usize], drop_index: usize) -> usize {
    let length = mapper.not_trimmed_indexes_length();
    let drop_index = drop_index.min(length);
    let before = moved.iter().filter(|&&index| index < drop_index).count();
    (drop_index - before).min(length.saturating_sub(moved.len()))
}

/// Moves `moved` so they start at `final_index`. Returns `Ok(false)` (and changes nothing)
/// when [`is_move_possible`] says no.
pub fn move_indexes(
    mapper: &mut IndexMapper,
    moved: &[usize],
    final_index: usize,
) -> Result<bool> {
    if !is_move_possible(mapper, moved, final_index) {
        pdebug!(moved = moved.len(), final_index, "moving::move_indexes: rejected");
        return Ok(false);
    }
    mapper.move_indexes(moved, final_index)?;
    Ok(true)
}

/// Physical indexes in visual order as they would be after the move, without applying it.
///
/// Useful for previewing a drag.
pub fn preview_move(
    mapper: &IndexMapper,
    moved: &[usize],
    final_index: usize,
) -> Option<Vec<usize>> {
    if !is_move_possible(mapper, moved, final_index) {
        return None;
    }
    let visual = mapper.not_trimmed_indexes();
    let block: Vec<usize> = moved.iter().map(|&index| visual[index]).collect();
    let mut rest: Vec<usize> = visual
        .iter()
        .copied()
        .filter(|physical| !block.contains(physical))
        .collect();
    rest.splice(final_index..final_index, block);
    Some(rest)
}
