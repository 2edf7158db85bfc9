// Example: a small spreadsheet with a filter, hidden columns, widths and a column drag.
use gridmap_plugins::{CellCoords, Grid, HiddenIndexes, SizeMap, TrimmedIndexes, moving, navigation};

fn main() {
    let mut grid = Grid::new(6, 5);
    let filter = TrimmedIndexes::register(grid.rows_mut()).unwrap();
    let hidden = HiddenIndexes::register(grid.columns_mut()).unwrap();
    let widths = SizeMap::register(grid.columns_mut(), "width", 80).unwrap();

    filter.trim(grid.rows_mut(), &[1, 4]).unwrap();
    hidden.hide(grid.columns_mut(), &[2]).unwrap();
    widths.set_size(grid.columns_mut(), 0, 140).unwrap();

    // Drag visual column 0 so it drops in front of visual column 4.
    let final_index = moving::final_index_for_drop(grid.columns(), &[0], 4);
    moving::move_indexes(grid.columns_mut(), &[0], final_index).unwrap();

    let (rows, cols) = grid.renderable_size();
    println!("renderable size: {rows}x{cols}");
    for col in 0..cols {
        let cell = grid.visual_from_renderable(CellCoords::new(0, col)).unwrap();
        println!(
            "renderable col={col} visual col={} width={}",
            cell.col,
            widths.effective_size(grid.columns(), cell.col)
        );
    }
    println!(
        "total renderable width={}",
        widths.renderable_total(grid.columns())
    );

    let cursor = navigation::first_visible(grid.columns());
    println!("cursor starts at visual column {cursor:?}");
}
