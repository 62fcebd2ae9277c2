//! Stretch command.
//!
//! Loads an image, applies the statistical stretch and saves the result.
//! Parameters come from an optional YAML file; flags given on the command
//! line win over the file.

use anyhow::{Context, Result};
use astro_ops::{stretch_with_report, StretchParams};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{load_image, save_image};

/// Arguments for the `stretch` command.
#[derive(Args, Debug, Default)]
pub struct StretchArgs {
    /// Input image (PNG, TIFF, or FITS with the `fits` feature)
    pub input: PathBuf,

    /// Output image; format from extension (.png 8-bit, .tif/.fits 32-bit float)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target median, in (0, 1)
    #[arg(short = 'm', long)]
    pub target_median: Option<f32>,

    /// Stretch each color channel on its own statistics
    #[arg(long)]
    pub unlinked: bool,

    /// Scale the result so its brightest sample is 1.0
    #[arg(long)]
    pub normalize: bool,

    /// Apply the curves boost after stretching
    #[arg(long)]
    pub curves: bool,

    /// Curves boost amount (typically 0 to 0.5); implies --curves
    #[arg(long)]
    pub curves_boost: Option<f32>,

    /// YAML file with stretch parameters
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the stretch command.
pub fn run(args: StretchArgs) -> Result<()> {
    let params = resolve_params(&args)?;
    info!("Stretching: {}", args.input.display());
    debug!(?params, "parameters");

    let loaded = load_image(&args.input)?;
    debug!(
        shape = ?loaded.image.shape(),
        bit_depth = ?loaded.source.bit_depth,
        "loaded"
    );

    let (output, report) = stretch_with_report(&loaded.image, &params)
        .with_context(|| format!("Failed to stretch: {}", args.input.display()))?;

    for group in &report.groups {
        let label = match group.channel {
            Some(c) => format!("channel {}", c),
            None => "all channels".to_string(),
        };
        info!(
            "  {}: median {:.5}, black point {:.5}",
            label, group.input.median, group.black_point
        );
    }
    if let Some(max) = report.normalized_by {
        info!("  normalized by {:.5}", max);
    }

    save_image(&args.output, &output)?;
    info!("Saved: {}", args.output.display());
    Ok(())
}

/// Builds parameters from the config file (if any) and command-line flags.
fn resolve_params(args: &StretchArgs) -> Result<StretchParams> {
    let mut params = match &args.config {
        Some(path) => load_config(path)?,
        None => StretchParams::default(),
    };

    if let Some(m) = args.target_median {
        params.target_median = m;
    }
    if args.unlinked {
        params.linked = false;
    }
    if args.normalize {
        params.normalize = true;
    }
    if args.curves {
        params.apply_curves = true;
    }
    if let Some(boost) = args.curves_boost {
        params.apply_curves = true;
        params.curves_boost = boost;
    }

    params.validate().context("Invalid stretch parameters")?;
    Ok(params)
}

fn load_config(path: &Path) -> Result<StretchParams> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("Invalid config: {}", path.display()))
}
