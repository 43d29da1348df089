use crate::{core, descriptor};
use log::info;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Pixels(#[from] core::BinnedPixelsError),

    #[error(transparent)]
    Params(#[from] descriptor::HogParamsError),

    #[error(transparent)]
    Config(#[from] descriptor::HogConfigError),

    #[error(transparent)]
    Io(#[from] descriptor::HogIoError),
}

/// Build the integral-histogram source for `pixels` and extract a descriptor
/// over `region` (the whole map when `None`).
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(pixels, params),
        fields(width = pixels.width, height = pixels.height, bins = pixels.num_bins)
    )
)]
pub fn extract_from_binned(
    pixels: &core::BinnedPixels,
    region: Option<core::Region>,
    params: descriptor::HogParams,
) -> Result<descriptor::HogDescriptor, ExtractError> {
    let extractor = descriptor::HogExtractor::new(params)?;
    let source = core::IntegralHistogram::new(pixels)?;
    let region = region.unwrap_or(core::Region::full(pixels.width, pixels.height));
    Ok(extractor.extract(&source, region))
}

/// Run a whole [`descriptor::HogExtractConfig`]: load the input, extract, and
/// return the report. Nothing is written to disk.
pub fn run_config(
    cfg: &descriptor::HogExtractConfig,
    config_path: Option<&std::path::Path>,
) -> Result<descriptor::HogReport, ExtractError> {
    let extractor = cfg.build_extractor()?;
    let pixels = cfg.load_input()?;
    let source = core::IntegralHistogram::new(&pixels)?;
    let region = cfg.resolve_region(pixels.width, pixels.height);

    let descriptor = extractor.extract(&source, region);
    info!(
        "{}: {}x{} cells, {}x{} blocks, {} values",
        cfg.input_path,
        descriptor.cell_rows,
        descriptor.cell_cols,
        descriptor.block_rows,
        descriptor.block_cols,
        descriptor.len()
    );

    Ok(descriptor::HogReport::new(
        cfg,
        config_path,
        region,
        pixels.num_bins,
        descriptor,
    ))
}
