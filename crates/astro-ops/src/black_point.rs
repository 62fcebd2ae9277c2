//! Black point estimation.
//!
//! The black point is the shadow clip level subtracted before the tone
//! curve runs:
//!
//! ```text
//! black_point = max(min, median - 2.7 * std_dev)
//! ```
//!
//! The `max` with the minimum keeps the estimate from falling below the
//! darkest real sample, so noise-dominated frames clip at their floor
//! instead of at a negative level.

use astro_core::{Result, Stats};

/// Number of standard deviations below the median at which shadows clip.
///
/// Changing it changes every stretched output.
pub const BLACK_POINT_SIGMA: f32 = 2.7;

/// Estimates the black point of a sample population.
///
/// Pass one channel for an unlinked stretch or all samples for a linked
/// or mono stretch.
///
/// # Errors
///
/// Returns [`astro_core::Error::InvalidDimensions`] for an empty slice.
///
/// # Example
///
/// ```rust
/// use astro_ops::black_point::black_point;
///
/// // Wide spread: median - 2.7 * std falls below the minimum.
/// let samples = [0.0, 0.5, 1.0];
/// assert_eq!(black_point(&samples).unwrap(), 0.0);
/// ```
pub fn black_point(samples: &[f32]) -> Result<f32> {
    Ok(black_point_from_stats(&Stats::compute(samples)?))
}

/// Black point from precomputed statistics.
#[inline]
pub fn black_point_from_stats(stats: &Stats) -> f32 {
    stats.min.max(stats.median - BLACK_POINT_SIGMA * stats.std_dev)
}
