//! Dense histogram-of-oriented-gradients descriptor.
//!
//! ## Quickstart
//!
//! ```
//! use dense_hog_core::{BinnedPixels, IntegralHistogram, Region};
//! use dense_hog_descriptor::{HogExtractor, HogParams};
//!
//! // 9 orientation bins, produced by some upstream gradient stage.
//! let pixels = BinnedPixels::from_fn(64, 64, 9, |x, y| ((x + 2 * y) % 9, 1.0));
//! let source = IntegralHistogram::new(&pixels).unwrap();
//!
//! let extractor = HogExtractor::new(HogParams::default()).unwrap();
//! let descriptor = extractor.extract(&source, Region::full(64, 64));
//! assert_eq!(descriptor.len(), 4 * 8 * 8 * 81);
//! ```
//!
//! Pipeline:
//! 1. Tile the region into `cell_width × cell_height` cells
//!    (`(extent + cell / 2) / cell` per axis) and L2-normalize each cell's
//!    histogram.
//! 2. Slide a `cells_per_block_x × cells_per_block_y` window over the cells
//!    with unit stride; `cells − block` blocks per axis.
//! 3. Emit L2, L2-clip, L1 and L1-sqrt variants of every block, row-major.
//!
//! Zero-norm vectors are never divided, so non-negative finite input always
//! yields a finite descriptor.

mod blocks;
mod cells;
mod extractor;
mod grid;
mod io;
mod normalize;
mod parallel;

pub use blocks::{block_grid_dims, compute_blocks};
pub use cells::{cell_count, cell_grid_dims, cell_window, compute_cells};
pub use extractor::{HogDescriptor, HogExtractor, HogParams, HogParamsError};
pub use grid::{BlockGrid, CellGrid, HistogramGrid};
pub use io::{load_binned_pixels, HogConfigError, HogExtractConfig, HogIoError, HogReport};
pub use normalize::{normalize_block, normalize_block_into, BlockNorm, L2_CLIP_MAX};
pub use parallel::MaybeSync;
