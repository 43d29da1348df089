use crate::{Histogram, Region};

/// Anything that can summarize a pixel window as a fixed-length histogram.
///
/// Implementations must be pure reads: repeated or concurrent queries for the
/// same window return the same histogram, and every returned histogram has
/// exactly [`HistogramSource::bin_count`] non-negative, finite components.
/// Windows may extend past the source's extent; the out-of-range part simply
/// contributes nothing.
pub trait HistogramSource {
    /// Length of every histogram returned by [`HistogramSource::compute_histogram`].
    fn bin_count(&self) -> usize;

    /// Histogram of the pixels inside `window`.
    fn compute_histogram(&self, window: Region) -> Histogram;
}

impl<S: HistogramSource + ?Sized> HistogramSource for &S {
    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }

    fn compute_histogram(&self, window: Region) -> Histogram {
        (**self).compute_histogram(window)
    }
}

impl<S: HistogramSource + ?Sized> HistogramSource for Box<S> {
    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }

    fn compute_histogram(&self, window: Region) -> Histogram {
        (**self).compute_histogram(window)
    }
}
