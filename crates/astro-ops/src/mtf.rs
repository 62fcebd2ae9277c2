//! Median-anchored rational tone curve.
//!
//! After black point subtraction the image is rescaled:
//!
//! ```text
//! r = (v - black_point) / (1 - black_point)
//! ```
//!
//! and every rescaled sample goes through a midtones transfer function
//! fitted so the image median `M` lands on the target median `m`:
//!
//! ```text
//!            (M - 1) * m * x
//! f(x) = -------------------------
//!        M * (m + x - 1) - m * x
//! ```
//!
//! `f(0) = 0`, `f(1) = 1` and `f(M) = m`. Below the median the curve
//! lifts shadows, above it compresses highlights.

use astro_core::{Error, Result, stats};

/// Rescales samples in place so `black_point` maps to 0 and 1 stays at 1.
///
/// Samples below the black point become negative; the final clip of the
/// stretch removes them.
///
/// # Errors
///
/// Returns [`Error::DegenerateStatistics`] if `black_point >= 1`, where
/// the rescale divides by zero or flips sign.
pub fn rescale_inplace(samples: &mut [f32], black_point: f32) -> Result<()> {
    if !(black_point < 1.0) {
        return Err(Error::degenerate(format!(
            "black point {} is not below 1.0",
            black_point
        )));
    }
    let range = 1.0 - black_point;
    for v in samples.iter_mut() {
        *v = (*v - black_point) / range;
    }
    Ok(())
}

/// Tone curve that maps a measured median onto a target median.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedianStretch {
    /// Median of the rescaled samples.
    pub median: f32,
    /// Value the median is mapped to.
    pub target: f32,
}

impl MedianStretch {
    /// Creates the curve for a known rescaled median.
    pub fn new(median: f32, target: f32) -> Self {
        Self { median, target }
    }

    /// Measures the median of already rescaled samples and builds the curve.
    pub fn fit(rescaled: &[f32], target: f32) -> Result<Self> {
        Ok(Self::new(stats::median(rescaled)?, target))
    }

    /// Evaluates the curve at `x`.
    ///
    /// A zero denominator yields a non-finite value (see
    /// [`apply_inplace`](Self::apply_inplace)); with a zero median that
    /// happens at `x = 0`.
    ///
    /// ```rust
    /// use astro_ops::mtf::MedianStretch;
    ///
    /// let curve = MedianStretch::new(0.02, 0.25);
    /// assert_eq!(curve.eval(0.0), 0.0);
    /// assert!((curve.eval(0.02) - 0.25).abs() < 1e-6);
    /// assert!((curve.eval(1.0) - 1.0).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        let (md, m) = (self.median, self.target);
        ((md - 1.0) * m * x) / (md * (m + x - 1.0) - m * x)
    }

    /// Applies the curve to every sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateStatistics`] if any result is NaN or
    /// infinite. The buffer contents are unspecified after an error.
    pub fn apply_inplace(&self, samples: &mut [f32]) -> Result<()> {
        let mut bad = None;
        for (i, v) in samples.iter_mut().enumerate() {
            let y = self.eval(*v);
            if !y.is_finite() && bad.is_none() {
                bad = Some((i, *v));
            }
            *v = y;
        }
        match bad {
            Some((index, x)) => Err(Error::degenerate(format!(
                "tone curve denominator vanishes at sample {} (x = {}, median = {}, target = {})",
                index, x, self.median, self.target
            ))),
            None => Ok(()),
        }
    }
}
