use super::HogParamsError;
use serde::{Deserialize, Serialize};

/// Cell and block geometry of the descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct HogParams {
    /// Cell width in pixels.
    pub cell_width: u32,
    /// Cell height in pixels.
    pub cell_height: u32,
    /// Block width in cells.
    pub cells_per_block_x: u32,
    /// Block height in cells.
    pub cells_per_block_y: u32,
}

impl Default for HogParams {
    fn default() -> Self {
        Self {
            cell_width: 6,
            cell_height: 6,
            cells_per_block_x: 3,
            cells_per_block_y: 3,
        }
    }
}

impl HogParams {
    /// Square cells of `cell_size` pixels, square blocks of `cells_per_block` cells.
    pub fn square(cell_size: u32, cells_per_block: u32) -> Self {
        Self {
            cell_width: cell_size,
            cell_height: cell_size,
            cells_per_block_x: cells_per_block,
            cells_per_block_y: cells_per_block,
        }
    }

    pub fn validate(&self) -> Result<(), HogParamsError> {
        let max = i32::MAX as u32;
        if self.cell_width == 0
            || self.cell_height == 0
            || self.cell_width > max
            || self.cell_height > max
        {
            return Err(HogParamsError::InvalidCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        if self.cells_per_block_x == 0 || self.cells_per_block_y == 0 {
            return Err(HogParamsError::InvalidBlockSize {
                x: self.cells_per_block_x,
                y: self.cells_per_block_y,
            });
        }
        Ok(())
    }

    /// Number of cells in one block.
    #[inline]
    pub fn cells_per_block(&self) -> usize {
        self.cells_per_block_x as usize * self.cells_per_block_y as usize
    }

    /// Length of one block histogram for cells of `bin_count` bins.
    #[inline]
    pub fn block_len(&self, bin_count: usize) -> usize {
        self.cells_per_block() * bin_count
    }
}
