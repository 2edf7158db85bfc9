use gridmap::{IndexMapper, Result};

/// A cell address. Which index space it lives in (physical, visual or renderable) is up to
/// the caller.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoords {
    pub row: usize,
    pub col: usize,
}

impl CellCoords {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Both axes of a grid: one [`IndexMapper`] for rows and one for columns.
///
/// Cell translations succeed only when both axes translate.
#[derive(Debug, Default)]
pub struct Grid {
    rows: IndexMapper,
    columns: IndexMapper,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        let mut grid = Self::default();
        grid.rows.init_to_length(rows);
        grid.columns.init_to_length(columns);
        grid
    }

    pub fn from_mappers(rows: IndexMapper, columns: IndexMapper) -> Self {
        Self { rows, columns }
    }

    pub fn rows(&self) -> &IndexMapper {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut IndexMapper {
        &mut self.rows
    }

    pub fn columns(&self) -> &IndexMapper {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut IndexMapper {
        &mut self.columns
    }

    pub fn physical_from_visual(&self, visual: CellCoords) -> Option<CellCoords> {
        Some(CellCoords {
            row: self.rows.physical_from_visual(visual.row)?,
            col: self.columns.physical_from_visual(visual.col)?,
        })
    }

    pub fn visual_from_physical(&self, physical: CellCoords) -> Option<CellCoords> {
        Some(CellCoords {
            row: self.rows.visual_from_physical(physical.row)?,
            col: self.columns.visual_from_physical(physical.col)?,
        })
    }

    /// `None` when the cell is out of range or its row or column is hidden.
    pub fn renderable_from_visual(&self, visual: CellCoords) -> Option<CellCoords> {
        Some(CellCoords {
            row: self.rows.renderable_from_visual(visual.row)?,
            col: self.columns.renderable_from_visual(visual.col)?,
        })
    }

    pub fn visual_from_renderable(&self, renderable: CellCoords) -> Option<CellCoords> {
        Some(CellCoords {
            row: self.rows.visual_from_renderable(renderable.row)?,
            col: self.columns.visual_from_renderable(renderable.col)?,
        })
    }

    pub fn physical_from_renderable(&self, renderable: CellCoords) -> Option<CellCoords> {
        Some(CellCoords {
            row: self.rows.physical_from_renderable(renderable.row)?,
            col: self.columns.physical_from_renderable(renderable.col)?,
        })
    }

    /// Number of renderable rows and columns.
    pub fn renderable_size(&self) -> (usize, usize) {
        (
            self.rows.renderable_indexes_length(),
            self.columns.renderable_indexes_length(),
        )
    }

    pub fn visual_size(&self) -> (usize, usize) {
        (
            self.rows.not_trimmed_indexes_length(),
            self.columns.not_trimmed_indexes_length(),
        )
    }

    pub fn insert_rows(&mut self, first_visual: usize, amount: usize) {
        self.rows.insert_indexes(first_visual, amount);
    }

    pub fn remove_rows(&mut self, physical: &[usize]) -> Result<()> {
        self.rows.remove_indexes(physical)
    }

    pub fn move_rows(&mut self, moved: &[usize], final_index: usize) -> Result<()> {
        self.rows.move_indexes(moved, final_index)
    }

    pub fn insert_columns(&mut self, first_visual: usize, amount: usize) {
        self.columns.insert_indexes(first_visual, amount);
    }

    pub fn remove_columns(&mut self, physical: &[usize]) -> Result<()> {
        self.columns.remove_indexes(physical)
    }

    pub fn move_columns(&mut self, moved: &[usize], final_index: usize) -> Result<()> {
        self.columns.move_indexes(moved, final_index)
    }
}
