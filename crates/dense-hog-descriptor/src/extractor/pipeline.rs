use super::{HogDescriptor, HogParams, HogParamsError};
use crate::blocks::{block_grid_dims, compute_blocks};
use crate::cells::{cell_grid_dims, compute_cells};
use crate::normalize::normalize_block_into;
use crate::parallel::{for_each_chunk_mut, MaybeSync};
use crate::{BlockGrid, BlockNorm, CellGrid};
use dense_hog_core::{Histogram, HistogramSource, Region};
use log::{debug, trace};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Dense HOG extractor with validated cell/block geometry.
///
/// Extraction is a pure function of the source, the region and the
/// parameters; an extractor can be shared freely across threads.
#[derive(Clone, Debug)]
pub struct HogExtractor {
    params: HogParams,
}

impl HogExtractor {
    /// Validate `params` and build an extractor.
    pub fn new(params: HogParams) -> Result<Self, HogParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Square cells and blocks, see [`HogParams::square`].
    pub fn square(cell_size: u32, cells_per_block: u32) -> Result<Self, HogParamsError> {
        Self::new(HogParams::square(cell_size, cells_per_block))
    }

    #[inline]
    pub fn params(&self) -> &HogParams {
        &self.params
    }

    /// `(rows, cols)` of the block grid for `region`.
    pub fn block_grid_dims(&self, region: Region) -> (usize, usize) {
        let (cell_rows, cell_cols) = cell_grid_dims(region, &self.params);
        block_grid_dims(cell_rows, cell_cols, &self.params)
    }

    /// Descriptor length for `region` and a source with `bin_count` bins.
    pub fn descriptor_len(&self, region: Region, bin_count: usize) -> usize {
        let (rows, cols) = self.block_grid_dims(region);
        BlockNorm::COUNT * rows * cols * self.params.block_len(bin_count)
    }

    /// Stage 1: L2-normalized cell histograms.
    pub fn compute_cells<S>(&self, source: &S, region: Region) -> CellGrid
    where
        S: HistogramSource + MaybeSync + ?Sized,
    {
        compute_cells(source, region, &self.params)
    }

    /// Stage 2: overlapping block histograms.
    pub fn compute_blocks(&self, cells: &CellGrid) -> BlockGrid {
        compute_blocks(cells, &self.params)
    }

    /// Stage 3: the four normalized variants of every block, concatenated
    /// row-major.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, blocks), fields(blocks = blocks.len()))
    )]
    pub fn normalize_blocks(&self, blocks: &BlockGrid) -> Histogram {
        let block_len = blocks.hist_len();
        let area = self.params.cells_per_block() as f64;
        let mut values = vec![0.0; BlockNorm::COUNT * blocks.len() * block_len];
        for_each_chunk_mut(&mut values, BlockNorm::COUNT * block_len, |k, out| {
            let block = blocks.at(k / blocks.cols(), k % blocks.cols());
            normalize_block_into(block, area, out);
        });
        Histogram::new(values)
    }

    /// Run all three stages over `region`.
    ///
    /// A region too small for a single block yields an empty descriptor.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, source), fields(bins = source.bin_count()))
    )]
    pub fn extract<S>(&self, source: &S, region: Region) -> HogDescriptor
    where
        S: HistogramSource + MaybeSync + ?Sized,
    {
        let cells = self.compute_cells(source, region);
        let blocks = self.compute_blocks(&cells);
        if blocks.is_empty() {
            debug!(
                "region {region:?} gives {}x{} cells, one block needs at least {}x{}; empty descriptor",
                cells.rows(),
                cells.cols(),
                self.params.cells_per_block_y + 1,
                self.params.cells_per_block_x + 1,
            );
            return HogDescriptor::empty(cells.rows(), cells.cols(), blocks.hist_len());
        }

        let values = self.normalize_blocks(&blocks);
        debug_assert!(values.is_finite(), "non-finite descriptor component");
        trace!(
            "region {region:?}: {}x{} cells, {}x{} blocks, {} values",
            cells.rows(),
            cells.cols(),
            blocks.rows(),
            blocks.cols(),
            values.len()
        );

        HogDescriptor {
            cell_rows: cells.rows(),
            cell_cols: cells.cols(),
            block_rows: blocks.rows(),
            block_cols: blocks.cols(),
            block_len: blocks.hist_len(),
            values,
        }
    }

    /// [`HogExtractor::extract`] without the geometry metadata.
    pub fn extract_histogram<S>(&self, source: &S, region: Region) -> Histogram
    where
        S: HistogramSource + MaybeSync + ?Sized,
    {
        self.extract(source, region).into_histogram()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(Vec<f64>);

    impl HistogramSource for Constant {
        fn bin_count(&self) -> usize {
            self.0.len()
        }

        fn compute_histogram(&self, _: Region) -> Histogram {
            Histogram::new(self.0.clone())
        }
    }

    #[test]
    fn invalid_params_fail_at_construction() {
        assert!(HogExtractor::square(0, 3).is_err());
        assert!(HogExtractor::square(6, 0).is_err());
        assert!(HogExtractor::new(HogParams::default()).is_ok());
    }

    #[test]
    fn descriptor_len_matches_extraction() {
        let source = Constant(vec![1.0, 2.0, 0.0, 4.0, 0.5]);
        let extractor = HogExtractor::new(HogParams {
            cell_width: 4,
            cell_height: 5,
            cells_per_block_x: 2,
            cells_per_block_y: 3,
        })
        .unwrap();
        for region in [
            Region::new(0, 0, 40, 40),
            Region::new(3, -7, 23, 31),
            Region::new(0, 0, 8, 15),
            Region::new(0, 0, 0, 0),
        ] {
            let d = extractor.extract(&source, region);
            assert_eq!(d.len(), extractor.descriptor_len(region, 5), "{region:?}");
            assert_eq!(d.len(), 4 * d.num_blocks() * d.block_len);
        }
    }

    #[test]
    fn extract_histogram_is_flat_descriptor() {
        let source = Constant(vec![1.0, 3.0]);
        let extractor = HogExtractor::square(2, 1).unwrap();
        let region = Region::full(6, 4);
        let d = extractor.extract(&source, region);
        assert_eq!(extractor.extract_histogram(&source, region), d.values);
        assert_eq!((d.block_rows, d.block_cols), (1, 2));
    }
}
