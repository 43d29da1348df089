//! Core types for dense histogram-of-oriented-gradients descriptors.
//!
//! This crate does not compute gradients or assign orientations. It defines
//! the histogram value type, the integer [`Region`] geometry, and the
//! [`HistogramSource`] interface the descriptor pipeline queries, plus one
//! concrete source ([`IntegralHistogram`]) built from pre-binned pixels.

mod histogram;
mod integral;
mod logger;
mod region;
mod source;

pub use histogram::{
    divide_in_place, l1_norm, l2_norm, normalize_l1_in_place, normalize_l2_in_place, Histogram,
};
pub use integral::{BinnedPixels, BinnedPixelsError, IntegralHistogram};
pub use region::Region;
pub use source::HistogramSource;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
