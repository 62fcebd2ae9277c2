//! Sample statistics used by the stretch.
//!
//! Functions here operate on flat sample slices: a whole image, one
//! extracted channel, or all channels combined. Means and variances are
//! accumulated in `f64`; the standard deviation is the population value
//! (divisor `N`), matching how astronomy tools usually report noise.
//!
//! - [`min`] / [`max`] - Extremes
//! - [`mean`] / [`std_dev`] - Moments
//! - [`median`] - Middle order statistic (mean of the two central
//!   values for even counts)
//! - [`Stats`] - All of the above in one pass plus a selection
//!
//! # Example
//!
//! ```rust
//! use astro_core::stats::{median, Stats};
//!
//! let samples = [0.1, 0.4, 0.2, 0.3];
//! assert!((median(&samples).unwrap() - 0.25).abs() < 1e-6);
//!
//! let stats = Stats::compute(&samples).unwrap();
//! assert_eq!(stats.min, 0.1);
//! assert_eq!(stats.max, 0.4);
//! ```

use crate::{Error, Result};

/// Summary statistics of a sample population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Smallest sample.
    pub min: f32,
    /// Largest sample.
    pub max: f32,
    /// Arithmetic mean.
    pub mean: f32,
    /// Population standard deviation.
    pub std_dev: f32,
    /// Median.
    pub median: f32,
    /// Number of samples.
    pub count: usize,
}

impl Stats {
    /// Computes min, max, mean, standard deviation and median.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for an empty slice.
    pub fn compute(samples: &[f32]) -> Result<Self> {
        ensure_non_empty(samples)?;

        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for &v in samples {
            lo = lo.min(v);
            hi = hi.max(v);
            sum += v as f64;
        }
        let n = samples.len() as f64;
        let mean = sum / n;
        let var = samples
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Ok(Self {
            min: lo,
            max: hi,
            mean: mean as f32,
            std_dev: var.sqrt() as f32,
            median: median_unchecked(samples),
            count: samples.len(),
        })
    }
}

fn ensure_non_empty(samples: &[f32]) -> Result<()> {
    if samples.is_empty() {
        Err(Error::invalid_dimensions("statistics of an empty sample set"))
    } else {
        Ok(())
    }
}

/// Smallest sample.
pub fn min(samples: &[f32]) -> Result<f32> {
    ensure_non_empty(samples)?;
    Ok(samples.iter().copied().fold(f32::INFINITY, f32::min))
}

/// Largest sample.
pub fn max(samples: &[f32]) -> Result<f32> {
    ensure_non_empty(samples)?;
    Ok(samples.iter().copied().fold(f32::NEG_INFINITY, f32::max))
}

/// Arithmetic mean, accumulated in `f64`.
pub fn mean(samples: &[f32]) -> Result<f32> {
    ensure_non_empty(samples)?;
    let sum: f64 = samples.iter().map(|&v| v as f64).sum();
    Ok((sum / samples.len() as f64) as f32)
}

/// Population standard deviation (divisor `N`).
pub fn std_dev(samples: &[f32]) -> Result<f32> {
    ensure_non_empty(samples)?;
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = samples
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    Ok(var.sqrt() as f32)
}

/// Median of the samples.
///
/// The input is not reordered; selection runs on a scratch copy.
pub fn median(samples: &[f32]) -> Result<f32> {
    ensure_non_empty(samples)?;
    Ok(median_unchecked(samples))
}

fn median_unchecked(samples: &[f32]) -> f32 {
    let mut scratch = samples.to_vec();
    let n = scratch.len();
    let mid = n / 2;
    let (lower, upper, _) = scratch.select_nth_unstable_by(mid, f32::total_cmp);
    let upper = *upper;
    if n % 2 == 1 {
        upper
    } else {
        // Largest element of the lower half is the other central value.
        let lower_max = lower.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        ((lower_max as f64 + upper as f64) * 0.5) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[0.5, 0.1, 0.9]).unwrap(), 0.5);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[0.4, 0.1, 0.3, 0.2]).unwrap(), 0.25, epsilon = 1e-7);
    }

    #[test]
    fn test_median_does_not_reorder() {
        let samples = [0.9, 0.1, 0.5];
        let _ = median(&samples).unwrap();
        assert_eq!(samples, [0.9, 0.1, 0.5]);
    }

    #[test]
    fn test_std_dev_population() {
        // Population std of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2.
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(std_dev(&samples).unwrap(), 2.0, epsilon = 1e-6);
        assert_relative_eq!(mean(&samples).unwrap(), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_constant_has_zero_std() {
        let samples = vec![0.3f32; 1000];
        assert_eq!(std_dev(&samples).unwrap(), 0.0);
        assert_eq!(median(&samples).unwrap(), 0.3);
    }

    #[test]
    fn test_stats_compute_matches_functions() {
        let samples: Vec<f32> = (0..101).map(|i| (i as f32 / 100.0).powi(2)).collect();
        let s = Stats::compute(&samples).unwrap();
        assert_eq!(s.min, min(&samples).unwrap());
        assert_eq!(s.max, max(&samples).unwrap());
        assert_eq!(s.median, median(&samples).unwrap());
        assert_relative_eq!(s.mean, mean(&samples).unwrap(), epsilon = 1e-7);
        assert_relative_eq!(s.std_dev, std_dev(&samples).unwrap(), epsilon = 1e-7);
        assert_eq!(s.count, 101);
        assert_eq!(s.median, 0.25);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(median(&[]).is_err());
        assert!(Stats::compute(&[]).is_err());
        assert!(min(&[]).is_err());
    }
}
