use crate::BlockNorm;
use dense_hog_core::Histogram;
use serde::{Deserialize, Serialize};

/// Flat descriptor plus the geometry needed to interpret it.
///
/// Layout: blocks in row-major order; within a block, the four
/// [`BlockNorm`] variants in [`BlockNorm::ALL`] order, each `block_len` long.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HogDescriptor {
    /// Cell grid rows the descriptor was built from.
    pub cell_rows: usize,
    /// Cell grid columns the descriptor was built from.
    pub cell_cols: usize,
    pub block_rows: usize,
    pub block_cols: usize,
    /// Length of one block histogram (cells per block × bins per cell).
    pub block_len: usize,
    pub values: Histogram,
}

impl HogDescriptor {
    /// Descriptor with no blocks.
    pub fn empty(cell_rows: usize, cell_cols: usize, block_len: usize) -> Self {
        Self {
            cell_rows,
            cell_cols,
            block_rows: 0,
            block_cols: 0,
            block_len,
            values: Histogram::default(),
        }
    }

    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.block_rows * self.block_cols
    }

    /// Total length, `4 × blocks × block_len`.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        self.values.values()
    }

    pub fn into_histogram(self) -> Histogram {
        self.values
    }

    /// All four variants of block `(row, col)`.
    pub fn block(&self, row: usize, col: usize) -> Option<&[f64]> {
        if row >= self.block_rows || col >= self.block_cols {
            return None;
        }
        let stride = BlockNorm::COUNT * self.block_len;
        let start = (row * self.block_cols + col) * stride;
        self.values().get(start..start + stride)
    }

    /// One normalized variant of block `(row, col)`.
    pub fn variant(&self, row: usize, col: usize, norm: BlockNorm) -> Option<&[f64]> {
        let block = self.block(row, col)?;
        let start = norm.index() * self.block_len;
        block.get(start..start + self.block_len)
    }

    /// True if no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.values.is_finite()
    }
}
