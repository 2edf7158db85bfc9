//! Keyboard traversal over visual indexes that skips hidden rows/columns.

use gridmap::{Direction, IndexMapper};

/// The next not-hidden visual index after `from_visual` in `direction`.
///
/// Returns `None` when there is none, in which case the selection should stay put.
pub fn next_visible(
    mapper: &IndexMapper,
    from_visual: usize,
    direction: Direction,
) -> Option<usize> {
    let start = direction.step(from_visual)?;
    mapper.first_not_hidden_index(start, direction)
}

pub fn first_visible(mapper: &IndexMapper) -> Option<usize> {
    mapper.first_not_hidden_index(0, Direction::Forward)
}

pub fn last_visible(mapper: &IndexMapper) -> Option<usize> {
    let last = mapper.not_trimmed_indexes_length().checked_sub(1)?;
    mapper.first_not_hidden_index(last, Direction::Backward)
}

/// The visual index closest to `visual` (searching forward first) that is not hidden.
///
/// `visual` past the end is clamped to the last visual index first.
pub fn clamp_to_visible(mapper: &IndexMapper, visual: usize) -> Option<usize> {
    let last = mapper.not_trimmed_indexes_length().checked_sub(1)?;
    mapper.nearest_not_hidden_index(visual.min(last), Direction::Forward)
}
