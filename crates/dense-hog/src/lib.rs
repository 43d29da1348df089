//! High-level facade crate for the `dense-hog-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core types and the descriptor pipeline
//! - end-to-end helpers that build an integral-histogram source from a
//!   pre-binned pixel map and extract a descriptor from it
//! - (feature `cli`) the `dense-hog` command-line tool
//!
//! ## Quickstart
//!
//! ```
//! use dense_hog::core::BinnedPixels;
//! use dense_hog::extract::extract_from_binned;
//! use dense_hog::HogParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pixels = BinnedPixels::from_fn(48, 48, 9, |x, y| ((x * y) % 9, 1.0));
//! let descriptor = extract_from_binned(&pixels, None, HogParams::default())?;
//! assert!(descriptor.is_finite());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `dense_hog::core`: histograms, regions, the `HistogramSource` trait and
//!   the integral-histogram source.
//! - `dense_hog::descriptor`: cell/block aggregation, block normalization,
//!   `HogExtractor`, JSON config and report types.
//! - `dense_hog::extract`: one-call helpers from `BinnedPixels`.

pub use dense_hog_core as core;
pub use dense_hog_descriptor as descriptor;

pub use dense_hog_core::{BinnedPixels, Histogram, HistogramSource, IntegralHistogram, Region};
pub use dense_hog_descriptor::{BlockNorm, HogDescriptor, HogExtractor, HogParams};

pub mod extract;
