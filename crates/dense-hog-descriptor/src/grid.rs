//! Contiguous 2D grids of equal-length histograms.

use dense_hog_core::Histogram;
use serde::{Deserialize, Serialize};

/// `rows × cols` histograms of `hist_len` bins each, stored row-major in one
/// flat buffer. Entry `(r, c)` occupies
/// `data[(r * cols + c) * hist_len..][..hist_len]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramGrid {
    rows: usize,
    cols: usize,
    hist_len: usize,
    data: Vec<f64>,
}

/// Grid of per-cell histograms.
pub type CellGrid = HistogramGrid;

/// Grid of concatenated block histograms.
pub type BlockGrid = HistogramGrid;

impl HistogramGrid {
    pub fn zeros(rows: usize, cols: usize, hist_len: usize) -> Self {
        Self {
            rows,
            cols,
            hist_len,
            data: vec![0.0; rows * cols * hist_len],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bins per entry.
    #[inline]
    pub fn hist_len(&self) -> usize {
        self.hist_len
    }

    /// Number of entries (`rows * cols`).
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The flat row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        (row * self.cols + col) * self.hist_len
    }

    /// Entry at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&[f64]> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let start = self.offset(row, col);
        Some(&self.data[start..start + self.hist_len])
    }

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    /// If `(row, col)` is outside the grid.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> &[f64] {
        assert!(
            row < self.rows && col < self.cols,
            "grid index ({row}, {col}) out of range for {}x{}",
            self.rows,
            self.cols
        );
        let start = self.offset(row, col);
        &self.data[start..start + self.hist_len]
    }

    /// Owned copy of the entry at `(row, col)`.
    pub fn histogram(&self, row: usize, col: usize) -> Option<Histogram> {
        self.get(row, col).map(|v| Histogram::new(v.to_vec()))
    }

    /// Entries in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        let n = self.hist_len;
        (0..self.len()).map(move |k| &self.data[k * n..(k + 1) * n])
    }
}
