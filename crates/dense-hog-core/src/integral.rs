//! Integral-histogram backed [`HistogramSource`].
//!
//! The input is a per-pixel orientation bin plus a non-negative weight
//! (typically the gradient magnitude), produced by an upstream gradient stage.
//! One summed-area table per bin makes every window query O(bins),
//! independent of the window size.

use crate::{Histogram, HistogramSource, Region};
use serde::{Deserialize, Serialize};

/// Errors raised when validating [`BinnedPixels`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BinnedPixelsError {
    #[error("num_bins must be > 0")]
    NoBins,
    #[error("expected {expected} pixels, got {bins} bin indices and {weights} weights")]
    LengthMismatch {
        expected: usize,
        bins: usize,
        weights: usize,
    },
    #[error("pixel {index}: bin {bin} out of range for {num_bins} bins")]
    BinOutOfRange {
        index: usize,
        bin: u32,
        num_bins: usize,
    },
    #[error("pixel {index}: weight {weight} must be finite and >= 0")]
    InvalidWeight { index: usize, weight: f32 },
}

/// Per-pixel orientation bin assignment, row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinnedPixels {
    pub width: u32,
    pub height: u32,
    pub num_bins: usize,
    /// Bin index per pixel, `len = width * height`.
    pub bins: Vec<u32>,
    /// Weight per pixel, `len = width * height`.
    pub weights: Vec<f32>,
}

impl BinnedPixels {
    /// Build from a per-pixel `(bin, weight)` callback.
    pub fn from_fn<F>(width: u32, height: u32, num_bins: usize, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> (u32, f32),
    {
        let n = width as usize * height as usize;
        let mut bins = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);
        for y in 0..height {
            for x in 0..width {
                let (b, w) = f(x, y);
                bins.push(b);
                weights.push(w);
            }
        }
        Self {
            width,
            height,
            num_bins,
            bins,
            weights,
        }
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> Result<(), BinnedPixelsError> {
        if self.num_bins == 0 {
            return Err(BinnedPixelsError::NoBins);
        }
        let expected = self.pixel_count();
        if self.bins.len() != expected || self.weights.len() != expected {
            return Err(BinnedPixelsError::LengthMismatch {
                expected,
                bins: self.bins.len(),
                weights: self.weights.len(),
            });
        }
        for (index, (&bin, &weight)) in self.bins.iter().zip(&self.weights).enumerate() {
            if bin as usize >= self.num_bins {
                return Err(BinnedPixelsError::BinOutOfRange {
                    index,
                    bin,
                    num_bins: self.num_bins,
                });
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(BinnedPixelsError::InvalidWeight { index, weight });
            }
        }
        Ok(())
    }
}

/// Per-bin summed-area tables over a [`BinnedPixels`] map.
#[derive(Clone, Debug)]
pub struct IntegralHistogram {
    width: u32,
    height: u32,
    num_bins: usize,
    // (height + 1) rows of (width + 1) entries, `num_bins` values each.
    table: Vec<f64>,
}

impl IntegralHistogram {
    pub fn new(pixels: &BinnedPixels) -> Result<Self, BinnedPixelsError> {
        pixels.validate()?;

        let w = pixels.width as usize;
        let h = pixels.height as usize;
        let nb = pixels.num_bins;
        let row_stride = (w + 1) * nb;
        let mut table = vec![0.0f64; (h + 1) * row_stride];
        let mut row_sum = vec![0.0f64; nb];

        for y in 0..h {
            row_sum.iter_mut().for_each(|v| *v = 0.0);
            for x in 0..w {
                let p = y * w + x;
                row_sum[pixels.bins[p] as usize] += pixels.weights[p] as f64;

                let above = y * row_stride + (x + 1) * nb;
                let here = (y + 1) * row_stride + (x + 1) * nb;
                for b in 0..nb {
                    table[here + b] = table[above + b] + row_sum[b];
                }
            }
        }

        Ok(Self {
            width: pixels.width,
            height: pixels.height,
            num_bins: nb,
            table,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn entry(&self, x: usize, y: usize) -> &[f64] {
        let start = (y * (self.width as usize + 1) + x) * self.num_bins;
        &self.table[start..start + self.num_bins]
    }
}

impl HistogramSource for IntegralHistogram {
    fn bin_count(&self) -> usize {
        self.num_bins
    }

    fn compute_histogram(&self, window: Region) -> Histogram {
        let Some(clipped) = window.clip_to(self.width, self.height) else {
            return Histogram::zeros(self.num_bins);
        };
        let x0 = clipped.x as usize;
        let y0 = clipped.y as usize;
        let x1 = x0 + clipped.width as usize;
        let y1 = y0 + clipped.height as usize;

        let br = self.entry(x1, y1);
        let bl = self.entry(x0, y1);
        let tr = self.entry(x1, y0);
        let tl = self.entry(x0, y0);

        // Cancellation can leave tiny negative residues; bins are never negative.
        let values = (0..self.num_bins)
            .map(|b| (br[b] - bl[b] - tr[b] + tl[b]).max(0.0))
            .collect();
        Histogram::new(values)
    }
}
