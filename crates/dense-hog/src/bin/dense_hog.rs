use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dense_hog::descriptor::HogExtractConfig;
use dense_hog::extract::run_config;
use dense_hog::Region;

#[cfg(not(feature = "tracing"))]
use log::{info, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::info;

#[cfg(feature = "tracing")]
use dense_hog::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use dense_hog::core::init_with_level;

/// Extract a dense HOG descriptor from a pre-binned pixel map.
#[derive(Debug, Parser)]
#[command(name = "dense-hog", version)]
struct Cli {
    /// `BinnedPixels` JSON file. Overrides the config's `input_path`.
    input: Option<PathBuf>,

    /// Extraction config JSON (`HogExtractConfig`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report path; defaults to the config's `output_path`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report to stdout instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Region as `x,y,width,height`; defaults to the whole input.
    #[arg(long, value_parser = parse_region)]
    region: Option<Region>,

    /// Square cell size in pixels.
    #[arg(long)]
    cell_size: Option<u32>,

    /// Square block size in cells.
    #[arg(long)]
    block_size: Option<u32>,

    /// Log level (off, error, warn, info, debug, trace).
    #[cfg(not(feature = "tracing"))]
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    {
        if let Err(err) = init_with_level(cli.log_level) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    #[cfg(feature = "tracing")]
    init_tracing(false);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = match (&cli.config, &cli.input) {
        (Some(path), _) => HogExtractConfig::load_json(path)?,
        (None, Some(input)) => HogExtractConfig::new(input.to_string_lossy()),
        (None, None) => return Err("either an INPUT file or --config is required".into()),
    };
    apply_overrides(&mut cfg, &cli);

    let report = run_config(&cfg, cli.config.as_deref())?;
    let json = serde_json::to_string_pretty(&report)?;
    if cli.stdout {
        println!("{json}");
        return Ok(());
    }

    let output_path = cfg.output_path();
    std::fs::write(&output_path, json)?;
    info!("descriptor length {}", report.descriptor.len());
    println!("wrote descriptor report to {}", output_path.display());
    Ok(())
}

fn apply_overrides(cfg: &mut HogExtractConfig, cli: &Cli) {
    if let Some(input) = &cli.input {
        cfg.input_path = input.to_string_lossy().into_owned();
    }
    if let Some(output) = &cli.output {
        cfg.output_path = Some(output.to_string_lossy().into_owned());
    }
    if let Some(region) = cli.region {
        cfg.region = Some(region);
    }
    if let Some(cell) = cli.cell_size {
        cfg.params.cell_width = cell;
        cfg.params.cell_height = cell;
    }
    if let Some(block) = cli.block_size {
        cfg.params.cells_per_block_x = block;
        cfg.params.cells_per_block_y = block;
    }
}

fn parse_region(raw: &str) -> Result<Region, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(format!("expected x,y,width,height, got `{raw}`"));
    };
    let int = |s: &str| s.parse::<i32>().map_err(|e| format!("`{s}`: {e}"));
    let uint = |s: &str| s.parse::<u32>().map_err(|e| format!("`{s}`: {e}"));
    Ok(Region::new(int(*x)?, int(*y)?, uint(*w)?, uint(*h)?))
}
