//! Cell aggregation: tile a region and query one histogram per cell.

use crate::parallel::{for_each_chunk_mut, MaybeSync};
use crate::{CellGrid, HogParams};
use dense_hog_core::{normalize_l2_in_place, HistogramSource, Region};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Cells covering `extent` pixels, rounding half a cell up:
/// `(extent + cell_size / 2) / cell_size` in integer arithmetic.
#[inline]
pub fn cell_count(extent: u32, cell_size: u32) -> usize {
    debug_assert!(cell_size > 0);
    ((extent as u64 + (cell_size / 2) as u64) / cell_size as u64) as usize
}

/// `(rows, cols)` of the cell grid over `region`.
pub fn cell_grid_dims(region: Region, params: &HogParams) -> (usize, usize) {
    (
        cell_count(region.height, params.cell_height),
        cell_count(region.width, params.cell_width),
    )
}

/// Source window of cell `(row, col)`.
///
/// Cells start at the region origin and advance by one cell size; with
/// half-cell rounding the last row/column may reach past the region.
pub fn cell_window(region: Region, params: &HogParams, row: usize, col: usize) -> Region {
    let x = region.x as i64 + col as i64 * params.cell_width as i64;
    let y = region.y as i64 + row as i64 * params.cell_height as i64;
    Region::new(
        saturate_i32(x),
        saturate_i32(y),
        params.cell_width,
        params.cell_height,
    )
}

#[inline]
fn saturate_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Query and L2-normalize every cell histogram of `region`.
///
/// A cell whose histogram is all zeros stays all zeros.
///
/// # Panics
/// If `source` returns a histogram whose length differs from its
/// `bin_count()`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(source, params), fields(bins = source.bin_count()))
)]
pub fn compute_cells<S>(source: &S, region: Region, params: &HogParams) -> CellGrid
where
    S: HistogramSource + MaybeSync + ?Sized,
{
    let (rows, cols) = cell_grid_dims(region, params);
    let bins = source.bin_count();
    let mut grid = CellGrid::zeros(rows, cols, bins);
    if cols == 0 {
        return grid;
    }

    for_each_chunk_mut(grid.as_mut_slice(), bins, |k, out| {
        let window = cell_window(region, params, k / cols, k % cols);
        let hist = source.compute_histogram(window);
        assert_eq!(
            hist.len(),
            bins,
            "histogram source returned {} bins for {window:?}, declared {bins}",
            hist.len()
        );
        out.copy_from_slice(hist.values());
        normalize_l2_in_place(out);
    });
    grid
}
