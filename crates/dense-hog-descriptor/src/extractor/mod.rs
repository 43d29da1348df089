//! Dense HOG extraction pipeline.
//!
//! Wires together cell aggregation, block aggregation and block
//! normalization behind a validated [`HogExtractor`].

mod error;
mod params;
mod pipeline;
mod result;

pub use error::HogParamsError;
pub use params::HogParams;
pub use pipeline::HogExtractor;
pub use result::HogDescriptor;
