//! Block aggregation: unit-stride sliding windows over the cell grid.

use crate::parallel::for_each_chunk_mut;
use crate::{BlockGrid, CellGrid, HogParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// `(rows, cols)` of the block grid over a `cell_rows × cell_cols` cell grid.
///
/// Blocks advance one cell at a time, and the count along each axis is the
/// cell count minus the block extent (saturating at zero).
pub fn block_grid_dims(cell_rows: usize, cell_cols: usize, params: &HogParams) -> (usize, usize) {
    (
        cell_rows.saturating_sub(params.cells_per_block_y as usize),
        cell_cols.saturating_sub(params.cells_per_block_x as usize),
    )
}

/// Concatenate the cells of every block window, row-major within the window.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(cells, params), fields(rows = cells.rows(), cols = cells.cols()))
)]
pub fn compute_blocks(cells: &CellGrid, params: &HogParams) -> BlockGrid {
    let (rows, cols) = block_grid_dims(cells.rows(), cells.cols(), params);
    let bins = cells.hist_len();
    let bx = params.cells_per_block_x as usize;
    let by = params.cells_per_block_y as usize;
    let mut grid = BlockGrid::zeros(rows, cols, params.block_len(bins));
    if cols == 0 || bins == 0 {
        return grid;
    }

    for_each_chunk_mut(grid.as_mut_slice(), params.block_len(bins), |k, out| {
        let (row, col) = (k / cols, k % cols);
        let mut parts = out.chunks_exact_mut(bins);
        for j in 0..by {
            for i in 0..bx {
                if let Some(dst) = parts.next() {
                    dst.copy_from_slice(cells.at(row + j, col + i));
                }
            }
        }
    });
    grid
}
