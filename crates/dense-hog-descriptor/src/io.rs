//! JSON configuration and report helpers for descriptor extraction.

use crate::{HogDescriptor, HogExtractor, HogParams, HogParamsError};
use dense_hog_core::{BinnedPixels, Region};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum HogIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum HogConfigError {
    #[error(transparent)]
    Params(#[from] HogParamsError),
}

/// Configuration for one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HogExtractConfig {
    /// JSON file holding a [`BinnedPixels`] map.
    pub input_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Region to describe; the whole input when absent.
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub params: HogParams,
}

impl HogExtractConfig {
    pub fn new(input_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            region: None,
            params: HogParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, HogIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), HogIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("hog_descriptor_report.json"))
    }

    /// The configured region, or the full `width × height` input.
    pub fn resolve_region(&self, width: u32, height: u32) -> Region {
        self.region.unwrap_or(Region::full(width, height))
    }

    /// Build a validated extractor from the config.
    pub fn build_extractor(&self) -> Result<HogExtractor, HogConfigError> {
        Ok(HogExtractor::new(self.params)?)
    }

    /// Load the input map referenced by `input_path`.
    pub fn load_input(&self) -> Result<BinnedPixels, HogIoError> {
        load_binned_pixels(&self.input_path)
    }
}

/// Read a [`BinnedPixels`] map from JSON. The map is not validated here.
pub fn load_binned_pixels(path: impl AsRef<Path>) -> Result<BinnedPixels, HogIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Extraction output written by the tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HogReport {
    pub input_path: String,
    #[serde(default)]
    pub config_path: Option<String>,
    pub region: Region,
    pub params: HogParams,
    pub bin_count: usize,
    pub descriptor: HogDescriptor,
}

impl HogReport {
    pub fn new(
        cfg: &HogExtractConfig,
        config_path: Option<&Path>,
        region: Region,
        bin_count: usize,
        descriptor: HogDescriptor,
    ) -> Self {
        Self {
            input_path: cfg.input_path.clone(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            region,
            params: cfg.params,
            bin_count,
            descriptor,
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, HogIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), HogIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
