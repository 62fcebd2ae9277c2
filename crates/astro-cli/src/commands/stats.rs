//! Stats command.
//!
//! Prints the statistics the stretch works from, per channel and over the
//! whole image, with the black point each would produce.

use anyhow::Result;
use astro_core::Stats;
use astro_ops::black_point::black_point_from_stats;
use clap::Args;
use std::path::PathBuf;

use super::load_image;

/// Arguments for the `stats` command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Input image (PNG, TIFF, or FITS with the `fits` feature)
    pub input: PathBuf,
}

/// Run the stats command.
pub fn run(args: StatsArgs) -> Result<()> {
    let loaded = load_image(&args.input)?;
    let image = &loaded.image;

    println!("{}", args.input.display());
    println!(
        "  {}x{}, {} channel(s), {:?} {:?}",
        image.width(),
        image.height(),
        image.channels(),
        loaded.source.format,
        loaded.source.bit_depth
    );
    println!(
        "  {:<8} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "channel", "min", "max", "mean", "std", "median", "black"
    );

    if image.channels() > 1 {
        for c in 0..image.channels() {
            let stats = Stats::compute(&image.channel(c))?;
            print_row(&c.to_string(), &stats);
        }
    }
    let all = Stats::compute(image.samples())?;
    print_row("all", &all);

    Ok(())
}

fn print_row(label: &str, s: &Stats) {
    println!(
        "  {:<8} {:>9.5} {:>9.5} {:>9.5} {:>9.5} {:>9.5} {:>9.5}",
        label,
        s.min,
        s.max,
        s.mean,
        s.std_dev,
        s.median,
        black_point_from_stats(s)
    );
}
