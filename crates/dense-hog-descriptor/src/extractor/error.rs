/// Invalid extractor configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HogParamsError {
    #[error("cell size must be in 1..=i32::MAX (got {width}x{height})")]
    InvalidCellSize { width: u32, height: u32 },
    #[error("cells per block must be > 0 (got {x}x{y})")]
    InvalidBlockSize { x: u32, y: u32 },
}
